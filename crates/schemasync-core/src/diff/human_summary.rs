//! Human-readable summary renderer for schema differences.

use crate::diff::model::{DifferenceKind, SchemaDifference};
use crate::model::ObjectKind;

/// Render a Markdown/text summary of an ordered difference list.
///
/// The summary is informational only. Lines keep the input order, so the
/// output is as deterministic as the list it is given.
pub fn render_human_summary(differences: &[SchemaDifference]) -> String {
    let mut out = String::new();

    out.push_str("## Schema Diff\n\n");

    if differences.is_empty() {
        out.push_str("_No differences detected._\n");
        return out;
    }

    out.push_str("| Kind | Create | Delete | Alter |\n|---|---|---|---|\n");
    for kind in ObjectKind::ALL {
        let count = |dk: DifferenceKind| {
            differences
                .iter()
                .filter(|d| d.object_kind() == kind && d.kind() == dk)
                .count()
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            kind,
            count(DifferenceKind::OnlyInSource),
            count(DifferenceKind::OnlyInTarget),
            count(DifferenceKind::Modified),
        ));
    }
    out.push('\n');

    for kind in ObjectKind::ALL {
        let mut section = differences
            .iter()
            .filter(|d| d.object_kind() == kind)
            .peekable();
        if section.peek().is_none() {
            continue;
        }
        let heading = match kind {
            ObjectKind::Table => "Tables",
            ObjectKind::Function => "Functions",
        };
        out.push_str(&format!("### {}\n\n", heading));
        for diff in section {
            out.push_str(&format!("{} {}\n", diff.kind().marker(), diff.name()));
        }
        out.push('\n');
    }

    out
}
