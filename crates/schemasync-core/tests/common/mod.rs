use schemasync_core::model::{
    Column, FunctionDefinition, SchemaObject, SchemaSnapshot, TableDefinition,
};

/// A table whose definition is identified by `version`
#[allow(dead_code)]
pub fn table(name: &str, version: &str) -> SchemaObject {
    SchemaObject::table(
        name,
        TableDefinition {
            columns: vec![Column::new("Id", "long"), Column::new(version, "string")],
            ..Default::default()
        },
    )
    .unwrap()
}

/// A function with the given body
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

#[allow(dead_code)]
pub fn snapshot(objects: Vec<SchemaObject>) -> SchemaSnapshot {
    SchemaSnapshot::from_objects(objects).unwrap()
}
