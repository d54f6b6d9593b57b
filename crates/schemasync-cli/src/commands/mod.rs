//! Subcommand implementations

pub mod compare;
pub mod export;
pub mod sync;

use clap::{Args, ValueEnum};
use schemasync_core::diff::DifferenceKind;
use schemasync_core::model::ObjectKind;
use schemasync_engine::Selection;

/// Kind of change, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChangeArg {
    Create,
    Alter,
    Delete,
}

impl From<ChangeArg> for DifferenceKind {
    fn from(change: ChangeArg) -> Self {
        match change {
            ChangeArg::Create => DifferenceKind::OnlyInSource,
            ChangeArg::Alter => DifferenceKind::Modified,
            ChangeArg::Delete => DifferenceKind::OnlyInTarget,
        }
    }
}

/// Narrow the differences a command works on
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only these object names (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Only these object kinds: table, function
    #[arg(long, value_delimiter = ',')]
    pub kind: Vec<ObjectKind>,

    /// Only these changes: create, alter, delete
    #[arg(long, value_enum, value_delimiter = ',')]
    pub change: Vec<ChangeArg>,
}

impl FilterArgs {
    pub fn selection(&self) -> Selection {
        Selection::all()
            .with_names(self.only.iter().cloned())
            .with_object_kinds(self.kind.clone())
            .with_difference_kinds(self.change.iter().copied().map(Into::into).collect())
    }
}
