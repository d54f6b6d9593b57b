use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ExError, ExErrorKind};

/// Namespace a schema object lives in
///
/// Names are unique within a kind only; a table and a function may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Table,
    Function,
}

impl ObjectKind {
    /// All kinds, in the order differences are presented
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Table, ObjectKind::Function];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::Function => "function",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = ExError;

    /// Parse `table`/`tables`/`function`/`functions` (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `UnknownObjectKind` for anything else; there is no fallback kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "tables" => Ok(ObjectKind::Table),
            "function" | "functions" => Ok(ObjectKind::Function),
            other => Err(ExError::new(ExErrorKind::UnknownObjectKind)
                .with_op("parse_object_kind")
                .with_message(format!("Unknown object kind: '{}'", other))),
        }
    }
}

/// One column of a table definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// Full definition of a table
///
/// Compared as a whole: column order is part of the definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableDefinition {
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<String>,
}

/// Full definition of a stored query function
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Parameter signature text, e.g. `(window: timespan)`
    #[serde(default)]
    pub parameters: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<String>,
}

/// Kind-tagged definition; the tag is the object's kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Definition {
    Table(TableDefinition),
    Function(FunctionDefinition),
}

impl Definition {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Definition::Table(_) => ObjectKind::Table,
            Definition::Function(_) => ObjectKind::Function,
        }
    }
}

impl From<TableDefinition> for Definition {
    fn from(def: TableDefinition) -> Self {
        Definition::Table(def)
    }
}

impl From<FunctionDefinition> for Definition {
    fn from(def: FunctionDefinition) -> Self {
        Definition::Function(def)
    }
}

/// A named, immutable schema object
///
/// Equality is value equality over name and full definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaObject {
    name: String,
    definition: Definition,
}

impl SchemaObject {
    /// Build an object, rejecting empty names
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `name` is empty or only whitespace.
    pub fn new(name: impl Into<String>, definition: impl Into<Definition>) -> Result<Self, ExError> {
        let name = name.into();
        let definition = definition.into();
        if name.trim().is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("schema_object_new")
                .with_object_kind(definition.kind())
                .with_message("Object name cannot be empty"));
        }
        Ok(Self { name, definition })
    }

    /// Convenience constructor for a table
    ///
    /// # Errors
    ///
    /// See [`SchemaObject::new`].
    pub fn table(name: impl Into<String>, definition: TableDefinition) -> Result<Self, ExError> {
        Self::new(name, definition)
    }

    /// Convenience constructor for a function
    ///
    /// # Errors
    ///
    /// See [`SchemaObject::new`].
    pub fn function(
        name: impl Into<String>,
        definition: FunctionDefinition,
    ) -> Result<Self, ExError> {
        Self::new(name, definition)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.definition.kind()
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }
}

impl fmt::Display for SchemaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str) -> FunctionDefinition {
        FunctionDefinition {
            body: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_kind_follows_definition() {
        let t = SchemaObject::table("T", TableDefinition::default()).unwrap();
        let f = SchemaObject::function("F", body("T | take 1")).unwrap();
        assert_eq!(t.kind(), ObjectKind::Table);
        assert_eq!(f.kind(), ObjectKind::Function);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = SchemaObject::table("  ", TableDefinition::default()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.object_kind(), Some(ObjectKind::Table));
    }

    #[test]
    fn test_value_equality() {
        let a = SchemaObject::function("F", body("x")).unwrap();
        let b = SchemaObject::function("F", body("x")).unwrap();
        let c = SchemaObject::function("F", body("y")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_object_kind() {
        assert_eq!("Table".parse::<ObjectKind>().unwrap(), ObjectKind::Table);
        assert_eq!(
            "functions".parse::<ObjectKind>().unwrap(),
            ObjectKind::Function
        );
        let err = "view".parse::<ObjectKind>().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnknownObjectKind);
    }

    #[test]
    fn test_definition_serializes_with_kind_tag() {
        let def = Definition::Table(TableDefinition {
            columns: vec![Column::new("Id", "long")],
            ..Default::default()
        });
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["kind"], "table");
        assert_eq!(json["columns"][0]["type"], "long");
        let back: Definition = serde_json::from_value(json).unwrap();
        assert_eq!(back, def);
    }
}
