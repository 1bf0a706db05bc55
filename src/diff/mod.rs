mod format;
mod hunks;
mod normalize;

pub use format::{format_diff_json, format_side_by_side, format_unified};
pub use hunks::{CONTEXT_LINES, ConfigDiff, DiffLine, Hunk, LineKind, diff_lines};
pub use normalize::{canonical_yaml, sort_keys};

use crate::model::ParseError;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Failed to parse {label}: {source}")]
    Parse {
        label: String,
        #[source]
        source: ParseError,
    },
}

/// Compare two configuration files by content.
///
/// Both inputs are normalized to sorted-key YAML before diffing, so only
/// semantic changes show up. If either side fails to parse nothing is
/// diffed.
pub fn diff_documents(
    old_label: &str,
    old: &str,
    new_label: &str,
    new: &str,
) -> Result<ConfigDiff, DiffError> {
    let old_canonical = canonical_yaml(old).map_err(|source| DiffError::Parse {
        label: old_label.to_string(),
        source,
    })?;
    let new_canonical = canonical_yaml(new).map_err(|source| DiffError::Parse {
        label: new_label.to_string(),
        source,
    })?;

    Ok(diff_lines(old_label, &old_canonical, new_label, &new_canonical))
}

/// Label a file in diff headers by its base name.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
_format_version: "3.0"
services:
  - name: orders
    host: orders.internal
    port: 8080
    plugins:
      - name: rate-limiting
        config:
          minute: 5
          policy: local
    routes:
      - name: list-orders
        paths: [/orders]
plugins:
  - name: cors
    config:
      origins: ["*"]
"#;

    #[test]
    fn test_self_diff_is_empty() {
        let diff = diff_documents("a.yaml", BASE, "b.yaml", BASE).unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn test_reordered_copy_has_no_hunks() {
        let reordered = r#"
plugins:
  - config:
      origins: ["*"]
    name: cors
services:
  - routes:
      - paths: [/orders]
        name: list-orders
    plugins:
      - config:
          policy: local
          minute: 5
        name: rate-limiting
    port: 8080
    name: orders
    host: orders.internal
_format_version: "3.0"
"#;
        let diff = diff_documents("a.yaml", BASE, "b.yaml", reordered).unwrap();
        assert!(diff.is_empty(), "unexpected hunks: {:?}", diff.hunks);
    }

    #[test]
    fn test_one_field_change_is_one_localized_hunk() {
        let changed = BASE.replace("minute: 5", "minute: 50");
        let diff = diff_documents("a.yaml", BASE, "b.yaml", &changed).unwrap();

        assert_eq!(diff.hunks.len(), 1);
        let changes: Vec<&DiffLine> = diff.hunks[0]
            .lines
            .iter()
            .filter(|l| l.kind != LineKind::Context)
            .collect();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, LineKind::Removed);
        assert_eq!(changes[0].text.trim(), "minute: 5");
        assert_eq!(changes[1].kind, LineKind::Added);
        assert_eq!(changes[1].text.trim(), "minute: 50");
    }

    #[test]
    fn test_parse_failure_names_the_side() {
        let err = diff_documents("a.yaml", BASE, "b.yaml", "services: [").unwrap_err();
        match err {
            DiffError::Parse { label, .. } => assert_eq!(label, "b.yaml"),
        }

        let err = diff_documents("a.yaml", "{", "b.yaml", "services: [").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse a.yaml"));
    }

    #[test]
    fn test_file_label_uses_base_name() {
        assert_eq!(file_label(Path::new("/etc/kong/kong.yaml")), "kong.yaml");
        assert_eq!(file_label(Path::new("kong.yaml")), "kong.yaml");
        assert_eq!(file_label(Path::new("/")), "/");
    }
}
