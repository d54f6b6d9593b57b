#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use schemasync_core::diagnostics::{
    BatchResolver, Classifier, Disposition, PredicateDef, Rule, RuleDef, RuleResolver,
};
use schemasync_core::diagnostics::predicates::{any_inner, kind_is};
use schemasync_core::diff::compare_snapshots;
use schemasync_core::errors::{ApplyFailure, ExError, ExErrorKind, SnapshotSide, SyncError};

use common::{snapshot, table};

#[test]
fn test_batch_with_second_inner_match_uses_rule_message() {
    let classifier = Classifier::new()
        .with_resolver(BatchResolver)
        .with_resolver(RuleResolver::new(vec![Rule::new(
            kind_is(ExErrorKind::Forbidden),
            "Access to the path was denied",
            Disposition::Fatal,
        )]));
    let batch = ExError::new(ExErrorKind::SyncFailed).with_related(vec![
        ExError::new(ExErrorKind::Internal).with_message("first, unmapped"),
        ExError::new(ExErrorKind::Forbidden).with_message("permission denied"),
    ]);

    assert_eq!(
        classifier.classify(&batch).message,
        "Access to the path was denied"
    );
}

#[test]
fn test_defaults_classify_converted_batch_outcome() {
    let diffs = compare_snapshots(
        &snapshot(vec![table("A", "v1"), table("B", "v1")]),
        &snapshot(vec![]),
    );
    let err: ExError = SyncError::Batch {
        applied: 0,
        total: 2,
        failures: vec![
            ApplyFailure {
                index: 0,
                difference: diffs[0].clone(),
                error: ExError::new(ExErrorKind::Persistence).with_message("write failed"),
            },
            ApplyFailure {
                index: 1,
                difference: diffs[1].clone(),
                error: ExError::new(ExErrorKind::Timeout),
            },
        ],
    }
    .into();

    let diagnosis = Classifier::with_defaults().classify(&err);
    assert_eq!(diagnosis.message, "The operation timed out");
    assert_eq!(diagnosis.disposition, Disposition::Retryable);
}

#[test]
fn test_defaults_classify_load_failure_by_cause() {
    let err: ExError = SyncError::Load {
        side: SnapshotSide::Target,
        source: ExError::new(ExErrorKind::DatabaseNotFound).with_message("/srv/schemas/prod"),
    }
    .into();
    assert_eq!(
        Classifier::with_defaults().classify(&err).message,
        "The database could not be found"
    );
}

#[test]
fn test_defaults_classify_apply_failure_by_cause() {
    let diffs = compare_snapshots(&snapshot(vec![table("A", "v1")]), &snapshot(vec![]));
    let err: ExError = SyncError::Apply {
        index: 0,
        total: 1,
        applied: 0,
        difference: Box::new(diffs[0].clone()),
        remaining: vec![],
        source: ExError::new(ExErrorKind::InvalidDefinition).with_message("empty body"),
    }
    .into();
    let diagnosis = Classifier::with_defaults().classify(&err);
    assert_eq!(diagnosis.message, "The object definition was rejected by the target");
    assert_eq!(diagnosis.disposition, Disposition::Skippable);
}

#[test]
fn test_cancellation_is_retryable() {
    let err: ExError = SyncError::Cancelled {
        applied: 1,
        total: 3,
    }
    .into();
    let diagnosis = Classifier::with_defaults().classify(&err);
    assert_eq!(diagnosis.message, "The operation was cancelled");
    assert_eq!(diagnosis.disposition, Disposition::Retryable);
}

#[test]
fn test_unmapped_error_falls_back_to_full_message() {
    let err = ExError::new(ExErrorKind::Persistence)
        .with_message("rename failed")
        .with_source(ExError::new(ExErrorKind::Internal).with_message("bad state"));
    let diagnosis = Classifier::with_defaults().classify(&err);
    assert_eq!(diagnosis.message, "rename failed: bad state");
    assert_eq!(diagnosis.disposition, Disposition::Fatal);
}

#[test]
fn test_any_inner_rule_looks_at_members() {
    let rule = Rule::new(
        any_inner(kind_is(ExErrorKind::Unauthorised)),
        "Some writes were not authorised",
        Disposition::Fatal,
    );
    let classifier = Classifier::new().with_resolver(RuleResolver::new(vec![rule]));
    let batch = ExError::new(ExErrorKind::SyncFailed).with_related(vec![
        ExError::new(ExErrorKind::Io),
        ExError::new(ExErrorKind::Unauthorised),
    ]);
    assert_eq!(
        classifier.classify(&batch).message,
        "Some writes were not authorised"
    );
}

#[test]
fn test_rule_defs_compile_into_classifier() {
    let defs = vec![RuleDef {
        when: PredicateDef::All(vec![
            PredicateDef::Kind("ERR_IO".to_string()),
            PredicateDef::MessageContains("no space".to_string()),
        ]),
        message: "The target disk is full".to_string(),
        disposition: Disposition::Retryable,
    }];
    let rules = defs.iter().map(RuleDef::compile).collect::<Result<Vec<_>, _>>().unwrap();
    let classifier = Classifier::with_rules(rules);

    let full = ExError::new(ExErrorKind::Io).with_message("No space left on device");
    assert_eq!(classifier.classify(&full).message, "The target disk is full");

    // built-ins are still present after the user rules
    assert_eq!(
        classifier.classify(&ExError::new(ExErrorKind::Forbidden)).message,
        "Access to the path was denied"
    );
}
