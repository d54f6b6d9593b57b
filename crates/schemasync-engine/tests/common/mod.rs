use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use schemasync_core::contracts::SchemaWriter;
use schemasync_core::errors::ExError;
use schemasync_core::model::{
    Column, FunctionDefinition, ObjectKind, SchemaObject, SchemaSnapshot, TableDefinition,
};
use schemasync_core::policy::WriteOptions;
use schemasync_engine::CancellationToken;

/// One call received by [`RecordingWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Call {
    Write(String),
    Delete(String),
}

/// Writer that records calls and fails on chosen names
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingWriter {
    calls: Mutex<Vec<Call>>,
    failures: HashMap<String, ExError>,
    cancel_on_call: Option<CancellationToken>,
}

#[allow(dead_code)]
impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any call for `name` with `error`
    pub fn fail_on(mut self, name: &str, error: ExError) -> Self {
        self.failures.insert(name.to_string(), error);
        self
    }

    /// Cancel `token` while handling the first call
    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_call = Some(token);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, name: &str) -> Result<(), ExError> {
        self.calls.lock().unwrap().push(call);
        if let Some(token) = &self.cancel_on_call {
            token.cancel();
        }
        match self.failures.get(name) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SchemaWriter for RecordingWriter {
    async fn create_or_alter(
        &self,
        object: &SchemaObject,
        _options: &WriteOptions,
    ) -> Result<(), ExError> {
        self.record(Call::Write(object.name().to_string()), object.name())
    }

    async fn delete(&self, _kind: ObjectKind, name: &str) -> Result<(), ExError> {
        self.record(Call::Delete(name.to_string()), name)
    }
}

#[allow(dead_code)]
pub fn table(name: &str, version: &str) -> SchemaObject {
    SchemaObject::table(
        name,
        TableDefinition {
            columns: vec![Column::new("Id", "long")],
            doc_string: Some(version.to_string()),
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

#[allow(dead_code)]
pub fn snapshot(objects: Vec<SchemaObject>) -> SchemaSnapshot {
    SchemaSnapshot::from_objects(objects).unwrap()
}

/// Source {T1: def1, T2: def2}, target {T1: def1-OLD, T3: def3}
#[allow(dead_code)]
pub fn reference_pair() -> (SchemaSnapshot, SchemaSnapshot) {
    (
        snapshot(vec![table("T1", "def1"), table("T2", "def2")]),
        snapshot(vec![table("T1", "def1-OLD"), table("T3", "def3")]),
    )
}
