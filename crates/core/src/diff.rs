//! Positional line diff between two revisions of a document.
//!
//! Lines are compared by index only: no alignment is attempted, so an
//! inserted line near the top shows every following line as modified.

use serde::{Deserialize, Serialize};

/// The status of one line in a comparison.
///
/// - `Added`    -- present only in the new text.
/// - `Removed`  -- present only in the old text.
/// - `Modified` -- present in both at the same index with different text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Modified,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One differing line. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    pub line: usize,
    pub status: DiffStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
}

impl LineChange {
    /// Human-readable one-liner, e.g. `Line 3: "a" → "b"`.
    pub fn describe(&self) -> String {
        let old = self.old.as_deref().unwrap_or_default();
        let new = self.new.as_deref().unwrap_or_default();
        match self.status {
            DiffStatus::Added => format!("Line {}: + \"{new}\"", self.line),
            DiffStatus::Removed => format!("Line {}: - \"{old}\"", self.line),
            DiffStatus::Modified => format!("Line {}: \"{old}\" → \"{new}\"", self.line),
        }
    }
}

/// Diff grouped by status, the shape returned to clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
    pub changes: Vec<LineChange>,
}

impl DocumentDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Compare `old` and `new` line by line.
pub fn line_changes(old: &str, new: &str) -> Vec<LineChange> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let len = old_lines.len().max(new_lines.len());

    (0..len)
        .filter_map(|i| {
            let line = i + 1;
            match (old_lines.get(i), new_lines.get(i)) {
                (None, Some(n)) => Some(LineChange {
                    line,
                    status: DiffStatus::Added,
                    old: None,
                    new: Some(n.to_string()),
                }),
                (Some(o), None) => Some(LineChange {
                    line,
                    status: DiffStatus::Removed,
                    old: Some(o.to_string()),
                    new: None,
                }),
                (Some(o), Some(n)) if o != n => Some(LineChange {
                    line,
                    status: DiffStatus::Modified,
                    old: Some(o.to_string()),
                    new: Some(n.to_string()),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Compare `old` and `new` and group the result by status.
pub fn diff_documents(old: &str, new: &str) -> DocumentDiff {
    let changes = line_changes(old, new);
    let mut diff = DocumentDiff::default();

    for change in &changes {
        match change.status {
            DiffStatus::Added => diff.added.push(change.new.clone().unwrap_or_default()),
            DiffStatus::Removed => diff.removed.push(change.old.clone().unwrap_or_default()),
            DiffStatus::Modified => diff.modified.push(change.describe()),
        }
    }
    diff.changes = changes;
    diff
}
