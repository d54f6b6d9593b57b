//! Typed difference model.

use serde::Serialize;
use std::fmt;

use crate::model::{ObjectKind, SchemaObject};

/// How one object diverges between source and target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Exists in the source only; reconciled by create
    OnlyInSource,
    /// Exists in the target only; reconciled by delete (if the policy allows)
    OnlyInTarget,
    /// Exists on both sides with different definitions; reconciled by alter
    Modified,
}

impl DifferenceKind {
    /// Presentation order within one object kind
    pub const ORDER: [DifferenceKind; 3] = [
        DifferenceKind::OnlyInSource,
        DifferenceKind::OnlyInTarget,
        DifferenceKind::Modified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceKind::OnlyInSource => "only_in_source",
            DifferenceKind::OnlyInTarget => "only_in_target",
            DifferenceKind::Modified => "modified",
        }
    }

    /// Single-character marker used in summaries: `+` create, `-` delete, `~` alter
    pub fn marker(&self) -> char {
        match self {
            DifferenceKind::OnlyInSource => '+',
            DifferenceKind::OnlyInTarget => '-',
            DifferenceKind::Modified => '~',
        }
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One divergence between source and target
///
/// `object` is the wanted definition: the source's for `OnlyInSource` and
/// `Modified`, the target's (the one to remove) for `OnlyInTarget`. The
/// object kind and name are read from it and cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaDifference {
    kind: DifferenceKind,
    object_kind: ObjectKind,
    name: String,
    object: SchemaObject,
}

impl SchemaDifference {
    pub fn new(kind: DifferenceKind, object: SchemaObject) -> Self {
        Self {
            kind,
            object_kind: object.kind(),
            name: object.name().to_string(),
            object,
        }
    }

    pub fn kind(&self) -> DifferenceKind {
        self.kind
    }

    pub fn object_kind(&self) -> ObjectKind {
        self.object_kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &SchemaObject {
        &self.object
    }

    /// True for differences reconciled by create-or-alter
    pub fn is_write(&self) -> bool {
        matches!(
            self.kind,
            DifferenceKind::OnlyInSource | DifferenceKind::Modified
        )
    }
}

impl fmt::Display for SchemaDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' ({})", self.object_kind, self.name, self.kind)
    }
}
