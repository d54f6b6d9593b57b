//! Snapshot file parser with validation
//!
//! Parses YAML or JSON and validates schema version, object names, and
//! per-kind uniqueness

use std::path::Path;

use schemasync_core::errors::{ExError, ExErrorKind};
use schemasync_core::model::{
    FunctionDefinition, ObjectKind, SchemaObject, SchemaSnapshot, TableDefinition,
};

use crate::errors::{snapshot_validation, Result};
use crate::snapshot_file::format_v1::{FileFunction, FileTable, SnapshotFileV1};

/// The only supported `schema_version`
pub const SCHEMA_VERSION: u32 = 1;

/// On-disk encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// `.yaml`/`.yml` or `.json` (case-insensitive)
    ///
    /// # Errors
    ///
    /// `InvalidInput` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("snapshot_file_format")
                .with_message(format!(
                    "Unsupported schema file extension: {} (expected .yaml, .yml or .json)",
                    path.display()
                ))),
        }
    }
}

/// Parse a snapshot document
///
/// # Errors
///
/// `InvalidSnapshot` for syntax errors or an unsupported version,
/// `UnknownObjectKind` for unrecognized sections, `InvalidInput` for empty
/// names, `DuplicateObject` for repeated names.
pub fn parse_snapshot_str(content: &str, format: FileFormat) -> Result<SchemaSnapshot> {
    let file: SnapshotFileV1 = match format {
        FileFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| snapshot_validation(&format!("YAML parse error: {}", e)))?,
        FileFormat::Json => serde_json::from_str(content)
            .map_err(|e| snapshot_validation(&format!("JSON parse error: {}", e)))?,
    };

    into_snapshot(file)
}

/// Validate a parsed document and build the snapshot
///
/// # Errors
///
/// See [`parse_snapshot_str`].
pub fn into_snapshot(file: SnapshotFileV1) -> Result<SchemaSnapshot> {
    if file.schema_version != SCHEMA_VERSION {
        return Err(snapshot_validation(&format!(
            "Unsupported schema_version: {}. Expected {}",
            file.schema_version, SCHEMA_VERSION
        )));
    }

    // An unrecognized section is a kind we cannot sync, never silently dropped
    if let Some(section) = file.other.keys().next() {
        let err = match section.parse::<ObjectKind>() {
            Ok(kind) => snapshot_validation(&format!(
                "Section '{}' must be spelled '{}s'",
                section, kind
            )),
            Err(e) => e.with_op("parse_snapshot"),
        };
        return Err(err);
    }

    let tables = file.tables.into_iter().map(|t| {
        SchemaObject::table(
            t.name,
            TableDefinition {
                columns: t.columns,
                folder: t.folder,
                doc_string: t.doc_string,
            },
        )
    });
    let functions = file.functions.into_iter().map(|f| {
        SchemaObject::function(
            f.name,
            FunctionDefinition {
                parameters: f.parameters,
                body: f.body,
                folder: f.folder,
                doc_string: f.doc_string,
            },
        )
    });

    let objects = tables.chain(functions).collect::<Result<Vec<_>>>()?;
    SchemaSnapshot::from_objects(objects).map_err(|e| e.with_op("parse_snapshot"))
}

/// Build the v1 document for a snapshot
pub fn from_snapshot(snapshot: &SchemaSnapshot, database: Option<String>) -> SnapshotFileV1 {
    use schemasync_core::model::Definition;

    let mut file = SnapshotFileV1 {
        schema_version: SCHEMA_VERSION,
        database,
        tables: Vec::new(),
        functions: Vec::new(),
        other: Default::default(),
    };
    for object in snapshot.iter() {
        match object.definition() {
            Definition::Table(def) => file.tables.push(FileTable {
                name: object.name().to_string(),
                columns: def.columns.clone(),
                folder: def.folder.clone(),
                doc_string: def.doc_string.clone(),
            }),
            Definition::Function(def) => file.functions.push(FileFunction {
                name: object.name().to_string(),
                parameters: def.parameters.clone(),
                body: def.body.clone(),
                folder: def.folder.clone(),
                doc_string: def.doc_string.clone(),
            }),
        }
    }
    file
}

/// Serialize a snapshot as a v1 document
///
/// # Errors
///
/// `Serialization` if the encoder fails.
pub fn render_snapshot(
    snapshot: &SchemaSnapshot,
    database: Option<String>,
    format: FileFormat,
) -> Result<String> {
    let file = from_snapshot(snapshot, database);
    match format {
        FileFormat::Yaml => serde_yaml::to_string(&file).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("render_snapshot")
                .with_message(e.to_string())
        }),
        FileFormat::Json => serde_json::to_string_pretty(&file)
            .map_err(|e| ExError::from(e).with_op("render_snapshot")),
    }
}
