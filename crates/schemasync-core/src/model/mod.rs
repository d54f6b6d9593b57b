pub mod object;
pub mod snapshot;

pub use object::{Column, Definition, FunctionDefinition, ObjectKind, SchemaObject, TableDefinition};
pub use snapshot::SchemaSnapshot;
