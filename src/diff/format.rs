use super::hunks::{ConfigDiff, DiffLine, LineKind};

/// Classic unified diff text. The file header is always present, even when
/// there are no hunks.
pub fn format_unified(diff: &ConfigDiff) -> String {
    let mut output = format!("--- a/{}\n+++ b/{}\n", diff.old_label, diff.new_label);
    for hunk in &diff.hunks {
        output.push_str(&hunk.header());
        output.push('\n');
        for line in &hunk.lines {
            output.push(line.kind.marker());
            output.push_str(&line.text);
            output.push('\n');
        }
    }
    output
}

/// Two-column rendering: old on the left, new on the right.
///
/// Removed and added runs are paired row by row. The gutter shows `|` for a
/// changed pair, `<` for a removal and `>` for an addition.
pub fn format_side_by_side(diff: &ConfigDiff, width: usize) -> String {
    let column = (width.saturating_sub(3) / 2).max(20);
    let mut output = format!(
        "{} | {}\n",
        pad(&format!("a/{}", diff.old_label), column),
        format!("b/{}", diff.new_label)
    );

    for hunk in &diff.hunks {
        output.push_str(&hunk.header());
        output.push('\n');

        let mut removed: Vec<&DiffLine> = Vec::new();
        let mut added: Vec<&DiffLine> = Vec::new();
        for line in &hunk.lines {
            match line.kind {
                LineKind::Removed => {
                    if !added.is_empty() {
                        flush_changes(&mut output, &mut removed, &mut added, column);
                    }
                    removed.push(line);
                }
                LineKind::Added => added.push(line),
                LineKind::Context => {
                    flush_changes(&mut output, &mut removed, &mut added, column);
                    push_row(&mut output, &line.text, ' ', &line.text, column);
                }
            }
        }
        flush_changes(&mut output, &mut removed, &mut added, column);
    }

    output
}

fn flush_changes(
    output: &mut String,
    removed: &mut Vec<&DiffLine>,
    added: &mut Vec<&DiffLine>,
    column: usize,
) {
    let rows = removed.len().max(added.len());
    for i in 0..rows {
        let (left, right) = (removed.get(i), added.get(i));
        let gutter = match (left, right) {
            (Some(_), Some(_)) => '|',
            (Some(_), None) => '<',
            _ => '>',
        };
        push_row(
            output,
            left.map(|l| l.text.as_str()).unwrap_or(""),
            gutter,
            right.map(|l| l.text.as_str()).unwrap_or(""),
            column,
        );
    }
    removed.clear();
    added.clear();
}

fn push_row(output: &mut String, left: &str, gutter: char, right: &str, column: usize) {
    output.push_str(&pad(left, column));
    output.push(' ');
    output.push(gutter);
    output.push(' ');
    output.push_str(&truncate(right, column));
    output.push('\n');
}

fn truncate(text: &str, column: usize) -> String {
    if text.chars().count() <= column {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(column.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn pad(text: &str, column: usize) -> String {
    let cut = truncate(text, column);
    let fill = column.saturating_sub(cut.chars().count());
    format!("{}{}", cut, " ".repeat(fill))
}

/// Diff as JSON, with a change summary.
pub fn format_diff_json(diff: &ConfigDiff) -> String {
    use serde_json::json;

    let (added, removed) = diff.stats();
    let output = json!({
        "old": diff.old_label,
        "new": diff.new_label,
        "summary": {
            "hunks": diff.hunks.len(),
            "added": added,
            "removed": removed
        },
        "hunks": diff.hunks,
        "unified": format_unified(diff)
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_lines;

    #[test]
    fn test_unified_header_always_present() {
        let diff = diff_lines("old.yaml", "a\n", "new.yaml", "a\n");
        assert_eq!(format_unified(&diff), "--- a/old.yaml\n+++ b/new.yaml\n");
    }

    #[test]
    fn test_unified_body() {
        let diff = diff_lines("o", "a\nb\nc\n", "n", "a\nB\nc\n");
        assert_eq!(
            format_unified(&diff),
            "--- a/o\n+++ b/n\n@@ -1,3 +1,3 @@\n a\n-b\n+B\n c\n"
        );
    }

    #[test]
    fn test_side_by_side_pairs_changes() {
        let diff = diff_lines("o", "a\nb\nc\n", "n", "a\nB\nextra\nc\n");
        let text = format_side_by_side(&diff, 53);
        let rows: Vec<&str> = text.lines().collect();

        assert!(rows[0].starts_with("a/o "));
        assert_eq!(rows[1], "@@ -1,3 +1,4 @@");
        assert!(rows[2].starts_with("a ") && rows[2].ends_with("   a"));
        assert!(rows[3].starts_with("b ") && rows[3].ends_with(" | B"));
        assert!(rows[4].trim_start().starts_with("> extra"));
        assert!(rows[5].ends_with("   c"));
    }

    #[test]
    fn test_json_summary() {
        let diff = diff_lines("o", "a\n", "n", "b\n");
        let json: serde_json::Value = serde_json::from_str(&format_diff_json(&diff)).unwrap();
        assert_eq!(json["summary"]["hunks"], 1);
        assert_eq!(json["summary"]["added"], 1);
        assert_eq!(json["summary"]["removed"], 1);
        assert_eq!(json["hunks"][0]["lines"][0]["kind"], "removed");
    }
}
