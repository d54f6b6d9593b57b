#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use schemasync_core::diff::{compare_snapshots, diff_maps, DifferenceKind};
use schemasync_core::model::{ObjectKind, SchemaSnapshot};

use common::{function, snapshot, table};

fn small_map() -> impl Strategy<Value = BTreeMap<String, u8>> {
    prop::collection::btree_map("[a-f]{1,2}", 0u8..4, 0..12)
}

proptest! {
    #[test]
    fn prop_self_diff_is_empty(map in small_map()) {
        let diff = diff_maps(&map, &map);
        prop_assert!(diff.is_empty());
    }

    #[test]
    fn prop_buckets_are_disjoint_and_complete(source in small_map(), target in small_map()) {
        let diff = diff_maps(&source, &target);

        let modified: BTreeSet<_> = diff.modified.keys().cloned().collect();
        let added: BTreeSet<_> = diff.only_in_source.keys().cloned().collect();
        let removed: BTreeSet<_> = diff.only_in_target.keys().cloned().collect();
        prop_assert!(modified.is_disjoint(&added));
        prop_assert!(modified.is_disjoint(&removed));
        prop_assert!(added.is_disjoint(&removed));

        let expected: BTreeSet<String> = source
            .keys()
            .chain(target.keys())
            .filter(|k| source.get(*k) != target.get(*k))
            .cloned()
            .collect();
        let actual: BTreeSet<String> = modified.union(&added).cloned().collect::<BTreeSet<_>>()
            .union(&removed).cloned().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_modified_carries_source_value(source in small_map(), target in small_map()) {
        let diff = diff_maps(&source, &target);
        for (key, value) in &diff.modified {
            prop_assert_eq!(Some(value), source.get(key));
        }
        for (key, value) in &diff.only_in_target {
            prop_assert_eq!(Some(value), target.get(key));
        }
    }

    #[test]
    fn prop_applying_writes_converges(source in small_map(), target in small_map()) {
        let diff = diff_maps(&source, &target);
        let mut patched = target.clone();
        for (key, value) in diff.only_in_source.iter().chain(diff.modified.iter()) {
            patched.insert(key.clone(), *value);
        }
        let again = diff_maps(&source, &patched);
        prop_assert!(again.only_in_source.is_empty());
        prop_assert!(again.modified.is_empty());
        prop_assert_eq!(again.only_in_target, diff.only_in_target);
    }

    #[test]
    fn prop_diff_is_deterministic(source in small_map(), target in small_map()) {
        prop_assert_eq!(diff_maps(&source, &target), diff_maps(&source, &target));
    }
}

#[test]
fn test_reference_scenario() {
    let source = snapshot(vec![table("T1", "def1"), table("T2", "def2")]);
    let target = snapshot(vec![table("T1", "def1-old"), table("T3", "def3")]);

    let differences = compare_snapshots(&source, &target);
    let summary: Vec<_> = differences
        .iter()
        .map(|d| (d.kind(), d.name().to_string()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (DifferenceKind::OnlyInSource, "T2".to_string()),
            (DifferenceKind::OnlyInTarget, "T3".to_string()),
            (DifferenceKind::Modified, "T1".to_string()),
        ]
    );
    assert_eq!(differences[2].object(), &table("T1", "def1"));
    assert_eq!(differences[1].object(), &table("T3", "def3"));
}

#[test]
fn test_names_do_not_collide_across_kinds() {
    let source = snapshot(vec![table("Shared", "v1")]);
    let target = snapshot(vec![function("Shared", "T | count")]);

    let differences = compare_snapshots(&source, &target);
    assert_eq!(differences.len(), 2);
    assert_eq!(differences[0].object_kind(), ObjectKind::Table);
    assert_eq!(differences[0].kind(), DifferenceKind::OnlyInSource);
    assert_eq!(differences[1].object_kind(), ObjectKind::Function);
    assert_eq!(differences[1].kind(), DifferenceKind::OnlyInTarget);
}

#[test]
fn test_identical_snapshots_have_no_differences() {
    let a = snapshot(vec![table("T", "v"), function("F", "T | take 10")]);
    assert!(compare_snapshots(&a, &a.clone()).is_empty());
    assert!(compare_snapshots(&SchemaSnapshot::new(), &SchemaSnapshot::new()).is_empty());
}
