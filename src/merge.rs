//! Recursive deep merge of nested mappings

use serde_json::{Map, Value};

/// Merge `src` into `dst`, recursing into nested mappings.
///
/// For every key in `src`: when both sides hold a mapping the pair is merged
/// recursively; in every other case (scalar conflict, type mismatch, new
/// key) the value from `src` replaces whatever `dst` held. `dst` is mutated
/// in place; `src` is read-only.
///
/// Sources come from freshly parsed files or the environment, so the data is
/// acyclic and no cycle detection is needed.
///
/// Merging a sequence of sources one by one is the supported composition.
/// Pre-merging two later sources and then merging the result is equivalent
/// only when no source replaces a mapping with a scalar (or the reverse) for
/// the same key; the sequential order is the contract, not associativity.
pub fn deep_merge(dst: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, incoming) in src {
        match (dst.get_mut(key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                deep_merge(existing, nested);
            }
            _ => {
                dst.insert(key.clone(), incoming.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_src_wins_on_scalar_conflict() {
        let mut dst = map(json!({"a": 1, "b": 2}));
        let src = map(json!({"b": 20, "c": 30}));
        deep_merge(&mut dst, &src);
        assert_eq!(Value::Object(dst), json!({"a": 1, "b": 20, "c": 30}));
    }

    #[test]
    fn test_nested_mappings_merge_recursively() {
        let mut dst = map(json!({"db": {"host": "localhost", "port": 5432}}));
        let src = map(json!({"db": {"port": 5433, "user": "admin"}}));
        deep_merge(&mut dst, &src);
        assert_eq!(
            Value::Object(dst),
            json!({"db": {"host": "localhost", "port": 5433, "user": "admin"}})
        );
    }

    #[test]
    fn test_type_mismatch_overwrites() {
        // Mapping replaces scalar and scalar replaces mapping wholesale.
        let mut dst = map(json!({"a": 1, "b": {"x": 1}}));
        let src = map(json!({"a": {"y": 2}, "b": "flat"}));
        deep_merge(&mut dst, &src);
        assert_eq!(Value::Object(dst), json!({"a": {"y": 2}, "b": "flat"}));
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut dst = map(json!({"a": {"b": 1}}));
        let before = dst.clone();
        deep_merge(&mut dst, &Map::new());
        assert_eq!(dst, before);
    }

    #[test]
    fn test_deeply_nested_merge() {
        let mut dst = map(json!({"a": {"b": {"c": {"d": 1}}}}));
        let src = map(json!({"a": {"b": {"c": {"e": 2}, "f": 3}}}));
        deep_merge(&mut dst, &src);
        assert_eq!(
            Value::Object(dst),
            json!({"a": {"b": {"c": {"d": 1, "e": 2}, "f": 3}}})
        );
    }
}
