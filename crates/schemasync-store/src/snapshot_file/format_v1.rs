//! Snapshot file format v1
//!
//! Defines the YAML/JSON document for a schema snapshot on disk

use std::collections::BTreeMap;

use schemasync_core::model::Column;
use serde::{Deserialize, Serialize};

/// Top-level snapshot document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFileV1 {
    /// Schema version (must be 1 for this format)
    pub schema_version: u32,

    /// Optional label for the database the schema describes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(default)]
    pub tables: Vec<FileTable>,

    #[serde(default)]
    pub functions: Vec<FileFunction>,

    /// Any other top-level section; each is reported as an unknown object kind
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

/// Table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTable {
    pub name: String,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<String>,
}

/// Function entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFunction {
    pub name: String,

    #[serde(default)]
    pub parameters: String,

    /// Body text; a list of lines is joined with newlines
    #[serde(deserialize_with = "deserialize_body")]
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<String>,
}

/// Accept `body` as a single string or as a sequence of lines
fn deserialize_body<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct BodyVisitor;

    impl<'de> Visitor<'de> for BodyVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of lines")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<String, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut lines = Vec::new();
            while let Some(line) = seq.next_element::<String>()? {
                lines.push(line);
            }
            Ok(lines.join("\n"))
        }
    }

    deserializer.deserialize_any(BodyVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let yaml = r#"
schema_version: 1
tables:
  - name: Events
    columns:
      - { name: Timestamp, type: datetime }
"#;
        let file: SnapshotFileV1 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.schema_version, 1);
        assert!(file.database.is_none());
        assert_eq!(file.tables[0].columns[0].column_type, "datetime");
        assert!(file.functions.is_empty());
        assert!(file.other.is_empty());
    }

    #[test]
    fn test_body_as_lines() {
        let yaml = r#"
schema_version: 1
functions:
  - name: Recent
    body:
      - "Events"
      - "| where Timestamp > ago(1h)"
"#;
        let file: SnapshotFileV1 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            file.functions[0].body,
            "Events\n| where Timestamp > ago(1h)"
        );
    }

    #[test]
    fn test_unknown_sections_are_kept() {
        let json = r#"{ "schema_version": 1, "views": [{ "name": "V" }] }"#;
        let file: SnapshotFileV1 = serde_json::from_str(json).unwrap();
        assert!(file.other.contains_key("views"));
    }
}
