//! Flatten per-kind map diffs into one ordered difference list.
//!
//! Order: tables then functions; within a kind, only-in-source, then
//! only-in-target, then modified; within a bucket, ascending name.

use std::collections::BTreeMap;

use crate::diff::engine::{diff_maps, MapDiff};
use crate::diff::model::{DifferenceKind, SchemaDifference};
use crate::model::{ObjectKind, SchemaObject, SchemaSnapshot};

/// Map the table and function diffs into one ordered sequence
///
/// Every map entry becomes exactly one [`SchemaDifference`]; nothing is
/// filtered or merged.
pub fn map_differences(
    tables: MapDiff<String, SchemaObject>,
    functions: MapDiff<String, SchemaObject>,
) -> Vec<SchemaDifference> {
    let mut out = Vec::with_capacity(tables.len() + functions.len());
    for kind_diff in [tables, functions] {
        let MapDiff {
            modified,
            only_in_source,
            only_in_target,
        } = kind_diff;
        push_bucket(&mut out, DifferenceKind::OnlyInSource, only_in_source);
        push_bucket(&mut out, DifferenceKind::OnlyInTarget, only_in_target);
        push_bucket(&mut out, DifferenceKind::Modified, modified);
    }
    out
}

fn push_bucket(
    out: &mut Vec<SchemaDifference>,
    kind: DifferenceKind,
    bucket: BTreeMap<String, SchemaObject>,
) {
    out.extend(
        bucket
            .into_values()
            .map(|object| SchemaDifference::new(kind, object)),
    );
}

/// Diff both kinds of two snapshots and map the result
pub fn compare_snapshots(source: &SchemaSnapshot, target: &SchemaSnapshot) -> Vec<SchemaDifference> {
    let tables = diff_maps(
        source.objects(ObjectKind::Table),
        target.objects(ObjectKind::Table),
    );
    let functions = diff_maps(
        source.objects(ObjectKind::Function),
        target.objects(ObjectKind::Function),
    );
    map_differences(tables, functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionDefinition, TableDefinition};

    fn table(name: &str, folder: &str) -> SchemaObject {
        SchemaObject::table(
            name,
            TableDefinition {
                folder: Some(folder.to_string()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn function(name: &str, body: &str) -> SchemaObject {
        SchemaObject::function(
            name,
            FunctionDefinition {
                body: body.to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_order_is_kind_then_bucket_then_name() {
        let source = SchemaSnapshot::from_objects(vec![
            table("B", "x"),
            table("A", "x"),
            table("M", "new"),
            function("F2", "x"),
        ])
        .unwrap();
        let target = SchemaSnapshot::from_objects(vec![
            table("M", "old"),
            table("Z", "x"),
            function("F1", "x"),
            function("F2", "changed"),
        ])
        .unwrap();

        let ids: Vec<(ObjectKind, DifferenceKind, String)> = compare_snapshots(&source, &target)
            .iter()
            .map(|d| (d.object_kind(), d.kind(), d.name().to_string()))
            .collect();

        assert_eq!(
            ids,
            vec![
                (ObjectKind::Table, DifferenceKind::OnlyInSource, "A".into()),
                (ObjectKind::Table, DifferenceKind::OnlyInSource, "B".into()),
                (ObjectKind::Table, DifferenceKind::OnlyInTarget, "Z".into()),
                (ObjectKind::Table, DifferenceKind::Modified, "M".into()),
                (ObjectKind::Function, DifferenceKind::OnlyInTarget, "F1".into()),
                (ObjectKind::Function, DifferenceKind::Modified, "F2".into()),
            ]
        );
    }

    #[test]
    fn test_same_name_in_both_kinds_stays_separate() {
        let source = SchemaSnapshot::from_objects(vec![table("X", "a")]).unwrap();
        let target = SchemaSnapshot::from_objects(vec![function("X", "b")]).unwrap();
        let diffs = compare_snapshots(&source, &target);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].kind(), DifferenceKind::OnlyInSource);
        assert_eq!(diffs[0].object_kind(), ObjectKind::Table);
        assert_eq!(diffs[1].kind(), DifferenceKind::OnlyInTarget);
        assert_eq!(diffs[1].object_kind(), ObjectKind::Function);
    }
}
