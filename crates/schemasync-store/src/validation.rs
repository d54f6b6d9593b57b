//! Write-time checks shared by the writable stores

use schemasync_core::errors::{ExError, ExErrorKind};
use schemasync_core::model::{Definition, SchemaObject};
use schemasync_core::policy::WriteOptions;

use crate::errors::Result;

/// Check `object` before it is stored
///
/// With `validate_functions`, a function with a blank body is rejected.
///
/// # Errors
///
/// `InvalidDefinition` when a check fails.
pub fn validate_for_write(object: &SchemaObject, options: &WriteOptions) -> Result<()> {
    if let Definition::Function(def) = object.definition() {
        if options.validate_functions && def.body.trim().is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidDefinition)
                .with_op("create_or_alter")
                .with_object_kind(object.kind())
                .with_object_name(object.name())
                .with_message("Function body is empty"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemasync_core::model::{FunctionDefinition, TableDefinition};

    fn function(body: &str) -> SchemaObject {
        SchemaObject::function(
            "F",
            FunctionDefinition {
                body: body.to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_blank_body_rejected_only_when_validating() {
        let strict = WriteOptions::default();
        let lax = WriteOptions {
            validate_functions: false,
            ..Default::default()
        };
        let err = validate_for_write(&function("  \n"), &strict).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidDefinition);
        assert!(validate_for_write(&function("  \n"), &lax).is_ok());
        assert!(validate_for_write(&function("T | count"), &strict).is_ok());
    }

    #[test]
    fn test_tables_always_pass() {
        let table = SchemaObject::table("T", TableDefinition::default()).unwrap();
        assert!(validate_for_write(&table, &WriteOptions::default()).is_ok());
    }
}
