use std::path::{Path, PathBuf};

use schemasync_core::model::{Column, FunctionDefinition, SchemaObject, TableDefinition};

/// A sample schema file in YAML
#[allow(dead_code)]
pub const TELEMETRY_YAML: &str = r#"
schema_version: 1
database: Telemetry
tables:
  - name: Events
    columns:
      - { name: Timestamp, type: datetime }
      - { name: Payload, type: dynamic }
    folder: raw
  - name: Sessions
    columns:
      - { name: Id, type: string }
functions:
  - name: RecentEvents
    parameters: "(window: timespan)"
    body: "Events | where Timestamp > ago(window)"
    doc_string: Events in the trailing window
"#;

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[allow(dead_code)]
pub fn table(name: &str, columns: &[(&str, &str)]) -> SchemaObject {
    SchemaObject::table(
        name,
        TableDefinition {
            columns: columns.iter().map(|(n, t)| Column::new(*n, *t)).collect(),
            ..Default::default()
        },
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn function(name: &str, body: &str) -> SchemaObject {
    SchemaObject::function(
        name,
        FunctionDefinition {
            body: body.to_string(),
            ..Default::default()
        },
    )
    .unwrap()
}
