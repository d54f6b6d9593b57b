//! Point-in-time view of one side's schema
//!
//! A snapshot holds one name-keyed map per object kind. Maps are `BTreeMap`
//! so iteration, serialization, and the digest are name-ordered and stable.

use serde::Serialize;
use sha2::{Digest as _, Sha256};
use std::collections::BTreeMap;

use super::object::{ObjectKind, SchemaObject};
use crate::errors::{ExError, ExErrorKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    tables: BTreeMap<String, SchemaObject>,
    functions: BTreeMap<String, SchemaObject>,
}

impl SchemaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a list of objects
    ///
    /// # Errors
    ///
    /// Returns `DuplicateObject` if two objects of the same kind share a name.
    pub fn from_objects<I>(objects: I) -> Result<Self, ExError>
    where
        I: IntoIterator<Item = SchemaObject>,
    {
        let mut snapshot = Self::new();
        for object in objects {
            snapshot.insert(object)?;
        }
        Ok(snapshot)
    }

    /// Add a new object
    ///
    /// # Errors
    ///
    /// Returns `DuplicateObject` if an object of the same kind and name exists.
    pub fn insert(&mut self, object: SchemaObject) -> Result<(), ExError> {
        let map = self.map_mut(object.kind());
        if map.contains_key(object.name()) {
            return Err(ExError::new(ExErrorKind::DuplicateObject)
                .with_op("snapshot_insert")
                .with_object_kind(object.kind())
                .with_object_name(object.name())
                .with_message("Object is defined more than once"));
        }
        map.insert(object.name().to_string(), object);
        Ok(())
    }

    /// Create or replace an object, returning the replaced one
    pub fn upsert(&mut self, object: SchemaObject) -> Option<SchemaObject> {
        self.map_mut(object.kind())
            .insert(object.name().to_string(), object)
    }

    /// Remove an object, returning it if it was present
    pub fn remove(&mut self, kind: ObjectKind, name: &str) -> Option<SchemaObject> {
        self.map_mut(kind).remove(name)
    }

    pub fn get(&self, kind: ObjectKind, name: &str) -> Option<&SchemaObject> {
        self.objects(kind).get(name)
    }

    /// The name-keyed map for one kind
    pub fn objects(&self, kind: ObjectKind) -> &BTreeMap<String, SchemaObject> {
        match kind {
            ObjectKind::Table => &self.tables,
            ObjectKind::Function => &self.functions,
        }
    }

    pub fn tables(&self) -> &BTreeMap<String, SchemaObject> {
        &self.tables
    }

    pub fn functions(&self) -> &BTreeMap<String, SchemaObject> {
        &self.functions
    }

    /// All objects, tables first, each kind in name order
    pub fn iter(&self) -> impl Iterator<Item = &SchemaObject> {
        self.tables.values().chain(self.functions.values())
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects(kind).len()
    }

    pub fn len(&self) -> usize {
        self.tables.len() + self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// SHA-256 (hex) over the canonical JSON of the snapshot
    ///
    /// Two snapshots with equal content always have equal digests.
    pub fn digest(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    fn map_mut(&mut self, kind: ObjectKind) -> &mut BTreeMap<String, SchemaObject> {
        match kind {
            ObjectKind::Table => &mut self.tables,
            ObjectKind::Function => &mut self.functions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionDefinition, TableDefinition};

    fn table(name: &str) -> SchemaObject {
        SchemaObject::table(name, TableDefinition::default()).unwrap()
    }

    fn function(name: &str) -> SchemaObject {
        SchemaObject::function(
            name,
            FunctionDefinition {
                body: "print 1".to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_names_are_scoped_per_kind() {
        let snapshot = SchemaSnapshot::from_objects(vec![table("X"), function("X")]).unwrap();
        assert_eq!(snapshot.count(ObjectKind::Table), 1);
        assert_eq!(snapshot.count(ObjectKind::Function), 1);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = SchemaSnapshot::from_objects(vec![table("X"), table("X")]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::DuplicateObject);
        assert_eq!(err.object_name(), Some("X"));
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut snapshot = SchemaSnapshot::new();
        assert!(snapshot.upsert(table("A")).is_none());
        assert!(snapshot.upsert(table("A")).is_some());
        assert!(snapshot.remove(ObjectKind::Table, "A").is_some());
        assert!(snapshot.remove(ObjectKind::Table, "A").is_none());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_digest_ignores_insertion_order() {
        let a = SchemaSnapshot::from_objects(vec![table("A"), table("B"), function("F")]).unwrap();
        let b = SchemaSnapshot::from_objects(vec![function("F"), table("B"), table("A")]).unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);
        assert_ne!(a.digest(), SchemaSnapshot::new().digest());
    }

    #[test]
    fn test_iter_orders_tables_before_functions() {
        let snapshot =
            SchemaSnapshot::from_objects(vec![function("A"), table("Z"), table("B")]).unwrap();
        let names: Vec<_> = snapshot
            .iter()
            .map(|o| (o.kind(), o.name().to_string()))
            .collect();
        assert_eq!(
            names,
            vec![
                (ObjectKind::Table, "B".to_string()),
                (ObjectKind::Table, "Z".to_string()),
                (ObjectKind::Function, "A".to_string()),
            ]
        );
    }
}
