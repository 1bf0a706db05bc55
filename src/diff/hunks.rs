use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Lines of unchanged context kept around every change.
pub const CONTEXT_LINES: usize = 3;

/// Unified diff between two normalized documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigDiff {
    pub old_label: String,
    pub new_label: String,
    pub hunks: Vec<Hunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    pub lines: Vec<DiffLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Context,
    Removed,
    Added,
}

impl LineKind {
    pub fn marker(self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Removed => '-',
            LineKind::Added => '+',
        }
    }
}

impl From<ChangeTag> for LineKind {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => LineKind::Context,
            ChangeTag::Delete => LineKind::Removed,
            ChangeTag::Insert => LineKind::Added,
        }
    }
}

impl ConfigDiff {
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Count of added and removed lines across all hunks.
    pub fn stats(&self) -> (usize, usize) {
        let lines = self.hunks.iter().flat_map(|h| h.lines.iter());
        lines.fold((0, 0), |(added, removed), line| match line.kind {
            LineKind::Added => (added + 1, removed),
            LineKind::Removed => (added, removed + 1),
            LineKind::Context => (added, removed),
        })
    }
}

impl Hunk {
    /// `@@ -a,b +c,d @@` header line.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_lines, self.new_start, self.new_lines
        )
    }
}

/// Line-diff two texts into hunks with [`CONTEXT_LINES`] of context.
pub fn diff_lines(old_label: &str, old: &str, new_label: &str, new: &str) -> ConfigDiff {
    let diff = TextDiff::from_lines(old, new);

    let hunks = diff
        .grouped_ops(CONTEXT_LINES)
        .iter()
        .filter_map(|group| {
            let first = group.first()?;
            let last = group.last()?;
            let old_range = first.old_range().start..last.old_range().end;
            let new_range = first.new_range().start..last.new_range().end;

            let lines = group
                .iter()
                .flat_map(|op| diff.iter_changes(op))
                .map(|change| DiffLine {
                    kind: change.tag().into(),
                    text: change.value().trim_end_matches(['\n', '\r']).to_string(),
                })
                .collect();

            Some(Hunk {
                old_start: hunk_start(&old_range),
                old_lines: old_range.len(),
                new_start: hunk_start(&new_range),
                new_lines: new_range.len(),
                lines,
            })
        })
        .collect();

    ConfigDiff {
        old_label: old_label.to_string(),
        new_label: new_label.to_string(),
        hunks,
    }
}

/// One-based start line; an empty range points at the line before it.
fn hunk_start(range: &std::ops::Range<usize>) -> usize {
    if range.is_empty() {
        range.start
    } else {
        range.start + 1
    }
}
