//! Directory-backed schema store
//!
//! Layout: `<root>/tables/<name>.json` and `<root>/functions/<name>.json`,
//! each file holding one serialized definition. The store is both a
//! snapshot provider and a schema writer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use schemasync_core::contracts::{SchemaWriter, SnapshotProvider};
use schemasync_core::errors::{ExError, ExErrorKind};
use schemasync_core::model::{
    Definition, FunctionDefinition, ObjectKind, SchemaObject, SchemaSnapshot, TableDefinition,
};
use schemasync_core::policy::WriteOptions;

use crate::errors::{database_not_found, io_error, object_not_found, Result};
use crate::fs::atomic::atomic_write;
use crate::fs::naming::{kind_dir, object_path, validate_object_name, DEFINITION_EXTENSION};
use crate::validation::validate_for_write;

/// Schema store rooted at a directory
#[derive(Debug, Clone)]
pub struct FsSchemaStore {
    root: PathBuf,
}

impl FsSchemaStore {
    /// Open an existing store
    ///
    /// # Errors
    ///
    /// `DatabaseNotFound` if `root` does not exist or is not a directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        match tokio::fs::metadata(&root).await {
            Ok(meta) if meta.is_dir() => Ok(Self { root }),
            Ok(_) => Err(database_not_found(&root)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(database_not_found(&root)),
            Err(e) => Err(io_error("open_store", &root, e)),
        }
    }

    /// Create the store directories if needed, then open it
    ///
    /// # Errors
    ///
    /// IO failures creating the directories.
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for kind in ObjectKind::ALL {
            let dir = kind_dir(&root, kind);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| io_error("create_store", &dir, e))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn load_kind(&self, kind: ObjectKind, snapshot: &mut SchemaSnapshot) -> Result<()> {
        let dir = kind_dir(&self.root, kind);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // a store without any object of this kind
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(io_error("load_store", &dir, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error("load_store", &dir, e))?
        {
            let path = entry.path();
            let Some(name) = definition_name(kind, &path)? else {
                continue;
            };
            let content = tokio::fs::read(&path)
                .await
                .map_err(|e| io_error("load_store", &path, e))?;
            let definition = decode_definition(kind, &content).map_err(|e| {
                let message = format!("{}: {}", path.display(), e.message());
                e.with_op("load_store")
                    .with_object_kind(kind)
                    .with_object_name(name.clone())
                    .with_message(message)
            })?;
            snapshot.insert(SchemaObject::new(name, definition)?)?;
        }
        Ok(())
    }
}

/// Object name for a definition file
///
/// Hidden and temp files are `None`; other files without the `.json`
/// extension are skipped with a warning.
///
/// # Errors
///
/// `InvalidInput` for a definition file whose name is not valid UTF-8 or
/// could not be written back by this store, so every loaded object can also
/// be altered and deleted.
fn definition_name(kind: ObjectKind, path: &Path) -> Result<Option<String>> {
    let Some(file_name) = path.file_name() else {
        return Ok(None);
    };
    if file_name.to_string_lossy().starts_with('.') {
        return Ok(None);
    }
    if path.extension().and_then(|e| e.to_str()) != Some(DEFINITION_EXTENSION) {
        tracing::warn!(
            path = %path.display(),
            object_kind = %kind,
            "skipping file without .{} extension",
            DEFINITION_EXTENSION
        );
        return Ok(None);
    }

    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("load_store")
            .with_object_kind(kind)
            .with_message(format!("{}: file name is not valid UTF-8", path.display())));
    };
    validate_object_name(kind, stem).map_err(|e| {
        let message = format!("{}: {}", path.display(), e.message());
        e.with_op("load_store").with_message(message)
    })?;
    Ok(Some(stem.to_string()))
}

fn decode_definition(kind: ObjectKind, content: &[u8]) -> Result<Definition> {
    let definition = match kind {
        ObjectKind::Table => Definition::Table(serde_json::from_slice::<TableDefinition>(content)?),
        ObjectKind::Function => {
            Definition::Function(serde_json::from_slice::<FunctionDefinition>(content)?)
        }
    };
    Ok(definition)
}

fn encode_definition(definition: &Definition, pretty: bool) -> Result<Vec<u8>> {
    let bytes = match (definition, pretty) {
        (Definition::Table(def), true) => serde_json::to_vec_pretty(def)?,
        (Definition::Table(def), false) => serde_json::to_vec(def)?,
        (Definition::Function(def), true) => serde_json::to_vec_pretty(def)?,
        (Definition::Function(def), false) => serde_json::to_vec(def)?,
    };
    Ok(bytes)
}

#[async_trait]
impl SnapshotProvider for FsSchemaStore {
    async fn load_snapshot(&self) -> Result<SchemaSnapshot> {
        let mut snapshot = SchemaSnapshot::new();
        for kind in ObjectKind::ALL {
            self.load_kind(kind, &mut snapshot).await?;
        }
        tracing::debug!(
            root = %self.root.display(),
            objects = snapshot.len() as u64,
            "loaded directory store"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

#[async_trait]
impl SchemaWriter for FsSchemaStore {
    async fn create_or_alter(&self, object: &SchemaObject, options: &WriteOptions) -> Result<()> {
        let path = object_path(&self.root, object.kind(), object.name())?;
        validate_for_write(object, options)?;

        // Unchanged definitions are not rewritten
        if let Ok(existing) = tokio::fs::read(&path).await {
            if decode_definition(object.kind(), &existing).ok().as_ref() == Some(object.definition())
            {
                return Ok(());
            }
        }

        let bytes = encode_definition(object.definition(), options.pretty)
            .map_err(|e| e.with_op("create_or_alter").with_object_name(object.name()))?;
        atomic_write(&path, &bytes).await
    }

    async fn delete(&self, kind: ObjectKind, name: &str) -> Result<()> {
        let path = object_path(&self.root, kind, name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(object_not_found("delete", kind, name))
            }
            Err(e) => Err(io_error("delete", &path, e)
                .with_object_kind(kind)
                .with_object_name(name)),
        }
    }
}
