//! Human-readable summary renderer for dependency diffs.

use crate::diff::model::DependencyDiff;

/// Render a short plain-text summary of a [`DependencyDiff`].
///
/// Informational only: used in log lines, never parsed.
pub fn render_human_summary(diff: &DependencyDiff) -> String {
    if !diff.is_changed() {
        return "no dependency changes".to_string();
    }

    let mut parts = Vec::new();
    if !diff.added.is_empty() {
        let items: Vec<String> = diff
            .added
            .iter()
            .map(|(name, version)| format!("{}@{}", name, version))
            .collect();
        parts.push(format!("added {}: {}", diff.added.len(), items.join(", ")));
    }
    if !diff.removed.is_empty() {
        let names: Vec<&str> = diff.removed.keys().map(String::as_str).collect();
        parts.push(format!("removed {}: {}", diff.removed.len(), names.join(", ")));
    }
    if !diff.changed.is_empty() {
        let items: Vec<String> = diff
            .changed
            .iter()
            .map(|(name, change)| format!("{} {} -> {}", name, change.old, change.new))
            .collect();
        parts.push(format!("changed {}: {}", diff.changed.len(), items.join(", ")));
    }

    parts.join("; ")
}
