//! Structural comparison of generic key/value trees.
//!
//! Two trees are structurally equivalent when their key sets are identical at
//! every object level and every pair of corresponding values carries the same
//! [`TypeTag`]. Values are never compared, only their categories.

use std::fmt;

use serde_json::{Map, Value};

use crate::config::{DecoderConfig, SequencePolicy};
use crate::tag::TypeTag;

/// Why a tree failed structural comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MismatchKind {
    /// The schema requires a key the data does not have.
    #[error("missing key")]
    MissingKey,

    /// The data carries a key the schema does not know.
    #[error("unknown key")]
    UnknownKey,

    /// The value's type tag differs from the schema's.
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: TypeTag, found: TypeTag },

    /// The data nests deeper than the configured limit.
    #[error("nesting deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
}

/// First structural mismatch found, with a JSON pointer to where it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// JSON pointer into the data tree. Empty for the top level.
    pub path: String,
    pub kind: MismatchKind,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} at top level", self.kind)
        } else {
            write!(f, "{} at {}", self.kind, self.path)
        }
    }
}

impl std::error::Error for Mismatch {}

/// Check `data` against `schema` with the default configuration.
pub fn is_structurally_valid(schema: &Map<String, Value>, data: &Map<String, Value>) -> bool {
    check_structure(schema, data, &DecoderConfig::default()).is_ok()
}

/// Check `data` against `schema`, reporting the first mismatch.
///
/// Schema keys are visited in sorted order, then data keys in sorted order,
/// so the reported mismatch does not depend on map iteration order.
pub fn check_structure(
    schema: &Map<String, Value>,
    data: &Map<String, Value>,
    config: &DecoderConfig,
) -> Result<(), Mismatch> {
    let mut walker = Walker {
        config,
        path: Vec::new(),
    };
    walker.objects(schema, data, 0)
}

struct Walker<'a> {
    config: &'a DecoderConfig,
    path: Vec<String>,
}

impl Walker<'_> {
    fn objects(
        &mut self,
        schema: &Map<String, Value>,
        data: &Map<String, Value>,
        depth: usize,
    ) -> Result<(), Mismatch> {
        self.depth_guard(depth)?;

        let mut expected_keys: Vec<&String> = schema.keys().collect();
        expected_keys.sort_unstable();

        for key in expected_keys {
            self.path.push(escape_pointer(key));
            let found = data
                .get(key)
                .ok_or_else(|| self.mismatch(MismatchKind::MissingKey))?;
            self.values(&schema[key], found, depth)?;
            self.path.pop();
        }

        let mut data_keys: Vec<&String> = data.keys().collect();
        data_keys.sort_unstable();

        for key in data_keys {
            if !schema.contains_key(key) {
                self.path.push(escape_pointer(key));
                return Err(self.mismatch(MismatchKind::UnknownKey));
            }
        }

        Ok(())
    }

    fn values(&mut self, expected: &Value, found: &Value, depth: usize) -> Result<(), Mismatch> {
        let expected_tag = TypeTag::of_with(expected, self.config.number_tags);
        let found_tag = TypeTag::of_with(found, self.config.number_tags);
        if expected_tag != found_tag {
            return Err(self.mismatch(MismatchKind::TypeMismatch {
                expected: expected_tag,
                found: found_tag,
            }));
        }

        match (expected, found) {
            (Value::Object(schema), Value::Object(data)) => self.objects(schema, data, depth + 1),
            (Value::Array(_), Value::Array(items))
                if self.config.sequences == SequencePolicy::Homogeneous =>
            {
                self.homogeneous(items, depth + 1)
            }
            _ => Ok(()),
        }
    }

    // Element 0 is compared against itself so its own nested arrays are
    // held to the same policy as the rest.
    fn homogeneous(&mut self, items: &[Value], depth: usize) -> Result<(), Mismatch> {
        self.depth_guard(depth)?;

        let Some(first) = items.first() else {
            return Ok(());
        };

        for (index, item) in items.iter().enumerate() {
            self.path.push(index.to_string());
            self.values(first, item, depth)?;
            self.path.pop();
        }

        Ok(())
    }

    fn depth_guard(&self, depth: usize) -> Result<(), Mismatch> {
        if depth > self.config.max_depth {
            return Err(self.mismatch(MismatchKind::TooDeep {
                max_depth: self.config.max_depth,
            }));
        }
        Ok(())
    }

    fn mismatch(&self, kind: MismatchKind) -> Mismatch {
        let mut path = String::new();
        for segment in &self.path {
            path.push('/');
            path.push_str(segment);
        }
        Mismatch { path, kind }
    }
}

fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::NumberTags;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn check(schema: Value, data: Value) -> Result<(), Mismatch> {
        check_structure(&object(schema), &object(data), &DecoderConfig::default())
    }

    #[test]
    fn identical_shapes_are_valid() {
        let schema = object(json!({"a": 0, "b": "", "c": false, "d": null, "e": []}));
        let data = object(json!({"a": 42, "b": "x", "c": true, "d": null, "e": [1, 2]}));
        assert!(is_structurally_valid(&schema, &data));
    }

    #[test]
    fn missing_key_is_reported() {
        let err = check(json!({"a": 0, "b": ""}), json!({"a": 1})).unwrap_err();
        assert_eq!(err.path, "/b");
        assert_eq!(err.kind, MismatchKind::MissingKey);
    }

    #[test]
    fn unknown_key_is_reported() {
        let err = check(json!({"a": 0}), json!({"a": 1, "z": true})).unwrap_err();
        assert_eq!(err.path, "/z");
        assert_eq!(err.kind, MismatchKind::UnknownKey);
    }

    #[test]
    fn tag_mismatch_is_reported() {
        let err = check(json!({"a": 0}), json!({"a": "1"})).unwrap_err();
        assert_eq!(
            err.kind,
            MismatchKind::TypeMismatch {
                expected: TypeTag::Number,
                found: TypeTag::String,
            }
        );
    }

    #[test]
    fn null_in_schema_requires_null() {
        assert!(check(json!({"a": null}), json!({"a": null})).is_ok());
        assert!(check(json!({"a": null}), json!({"a": 1})).is_err());
    }

    #[test]
    fn nested_objects_recurse() {
        let schema = json!({"inner": {"x": 0}});
        assert!(check(schema.clone(), json!({"inner": {"x": 5}})).is_ok());

        let err = check(schema.clone(), json!({"inner": {"x": 5, "y": 2}})).unwrap_err();
        assert_eq!(err.path, "/inner/y");
        assert_eq!(err.kind, MismatchKind::UnknownKey);

        let err = check(schema.clone(), json!({"inner": {}})).unwrap_err();
        assert_eq!(err.path, "/inner/x");
        assert_eq!(err.kind, MismatchKind::MissingKey);

        let err = check(schema, json!({"inner": "not-an-object"})).unwrap_err();
        assert_eq!(err.path, "/inner");
        assert!(matches!(err.kind, MismatchKind::TypeMismatch { .. }));
    }

    #[test]
    fn empty_schema_matches_only_empty_data() {
        assert!(check(json!({}), json!({})).is_ok());
        assert!(check(json!({}), json!({"a": 1})).is_err());
    }

    #[test]
    fn array_elements_are_not_inspected_by_default() {
        let schema = json!({"items": []});
        assert!(check(schema.clone(), json!({"items": [{"a": 1}, {"b": "x"}, 3]})).is_ok());
        assert!(check(schema, json!({"items": {}})).is_err());
    }

    #[test]
    fn homogeneous_policy_compares_elements_to_the_first() {
        let config = DecoderConfig {
            sequences: SequencePolicy::Homogeneous,
            ..DecoderConfig::default()
        };
        let schema = object(json!({"items": []}));

        let same = object(json!({"items": [{"a": 1}, {"a": 2}]}));
        assert!(check_structure(&schema, &same, &config).is_ok());

        let empty = object(json!({"items": []}));
        assert!(check_structure(&schema, &empty, &config).is_ok());

        let mixed = object(json!({"items": [{"a": 1}, {"b": 1}]}));
        let err = check_structure(&schema, &mixed, &config).unwrap_err();
        assert_eq!(err.path, "/items/1/a");
        assert_eq!(err.kind, MismatchKind::MissingKey);

        let scalars = object(json!({"items": [1, "two"]}));
        let err = check_structure(&schema, &scalars, &config).unwrap_err();
        assert_eq!(err.path, "/items/1");
    }

    #[test]
    fn homogeneous_policy_checks_nested_arrays_of_the_first_element() {
        let config = DecoderConfig {
            sequences: SequencePolicy::Homogeneous,
            ..DecoderConfig::default()
        };
        let schema = object(json!({"rows": []}));
        let data = object(json!({"rows": [[1, "x"]]}));
        let err = check_structure(&schema, &data, &config).unwrap_err();
        assert_eq!(err.path, "/rows/0/1");
    }

    #[test]
    fn split_numbers_distinguish_integers_and_floats() {
        let config = DecoderConfig {
            number_tags: NumberTags::Split,
            ..DecoderConfig::default()
        };
        let schema = object(json!({"ratio": 0.0, "count": 0}));

        let ok = object(json!({"ratio": 1.5, "count": 3}));
        assert!(check_structure(&schema, &ok, &config).is_ok());

        let bad = object(json!({"ratio": 1, "count": 3}));
        let err = check_structure(&schema, &bad, &config).unwrap_err();
        assert_eq!(
            err.kind,
            MismatchKind::TypeMismatch {
                expected: TypeTag::Float,
                found: TypeTag::Integer,
            }
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let config = DecoderConfig {
            max_depth: 1,
            ..DecoderConfig::default()
        };
        let schema = object(json!({"a": {"b": {"c": 0}}}));
        let data = schema.clone();
        let err = check_structure(&schema, &data, &config).unwrap_err();
        assert_eq!(err.kind, MismatchKind::TooDeep { max_depth: 1 });
        assert_eq!(err.path, "/a/b");
    }

    #[test]
    fn pointer_segments_are_escaped() {
        let err = check(json!({}), json!({"a/b~c": 1})).unwrap_err();
        assert_eq!(err.path, "/a~1b~0c");
    }

    #[test]
    fn mismatch_display_includes_path() {
        let err = check(json!({"a": 0}), json!({})).unwrap_err();
        assert_eq!(err.to_string(), "missing key at /a");
    }
}
