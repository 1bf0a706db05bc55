use crate::model::ParseError;
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;

/// Re-serialize YAML text with every mapping's keys sorted, so that two
/// documents differing only in key order produce identical text.
///
/// Merge keys are expanded first. An empty document normalizes to an empty
/// string.
pub fn canonical_yaml(content: &str) -> Result<String, ParseError> {
    let mut tree: Value = serde_yaml::from_str(content).map_err(ParseError::Yaml)?;
    if tree.is_null() {
        return Ok(String::new());
    }
    tree.apply_merge().map_err(ParseError::Yaml)?;
    serde_yaml::to_string(&sort_keys(tree)).map_err(ParseError::Yaml)
}

/// Recursively sort mapping keys by text, then by type so that `1` and
/// `'1'` always land in the same order. Sequences keep their order.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(Value, Value)> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            entries.sort_by_cached_key(|(k, _)| (key_text(k), key_rank(k)));
            Value::Mapping(entries.into_iter().collect())
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(sort_keys).collect()),
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            Value::Tagged(Box::new(TaggedValue {
                tag,
                value: sort_keys(value),
            }))
        }
        other => other,
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn key_rank(key: &Value) -> u8 {
    match key {
        Value::String(_) => 0,
        Value::Number(_) => 1,
        Value::Bool(_) => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_is_irrelevant() {
        let a = "b: 1\na:\n  y: [3, 1]\n  x: true\n";
        let b = "a:\n  x: true\n  y: [3, 1]\nb: 1\n";
        let canonical = canonical_yaml(a).unwrap();
        assert_eq!(canonical, canonical_yaml(b).unwrap());
        assert!(canonical.starts_with("a:\n  x: true\n"));
        assert!(canonical.ends_with("b: 1\n"));
        assert!(canonical.find("3").unwrap() < canonical.find("1\n").unwrap());
    }

    #[test]
    fn test_sequences_keep_order() {
        let canonical = canonical_yaml("- {name: z}\n- {name: a}\n").unwrap();
        assert!(canonical.find("name: z").unwrap() < canonical.find("name: a").unwrap());
    }

    #[test]
    fn test_mixed_type_keys_are_stable() {
        let a = canonical_yaml("1: a\n'1': b\n").unwrap();
        let b = canonical_yaml("'1': b\n1: a\n").unwrap();
        assert_eq!(a, b);
        assert!(a.find("b").unwrap() < a.find("a").unwrap());
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let merged = "defaults: &d\n  port: 80\n  host: x\nservices:\n  - <<: *d\n    name: s\n";
        let inline = "defaults:\n  port: 80\n  host: x\nservices:\n  - name: s\n    host: x\n    port: 80\n";
        let canonical = canonical_yaml(merged).unwrap();
        assert_eq!(canonical, canonical_yaml(inline).unwrap());
        assert!(!canonical.contains("<<"));
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(canonical_yaml("").unwrap(), "");
        assert!(canonical_yaml("a: [1, 2").is_err());
    }
}
