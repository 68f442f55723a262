use std::io::Read;

use serde_json::{json, Map, Value};

use crate::backend::Backend;
use crate::compare::{check_structure, Mismatch, MismatchKind};
use crate::config::{DecoderConfig, NumberTags};
use crate::error::{Result, SchemaError};
use crate::tag::TypeTag;

/// An example tree whose key sets and value tags define the accepted shape.
///
/// Only the categories of the leaf values matter, never the values
/// themselves. Because the schema is an example rather than a type
/// descriptor it cannot express optional fields or unions: an `Option`
/// field that defaults to `None` appears as `null` and requires `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSchema {
    fields: Map<String, Value>,
}

impl ShapeSchema {
    /// Build a schema from an example tree. The top level must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(SchemaError::NotAnObject(TypeTag::of(&other))),
        }
    }

    /// Parse an example document with `backend` and build a schema from it.
    pub fn from_reader<B: Backend, R: Read>(backend: &B, reader: R) -> Result<Self> {
        let tree = backend.parse_tree(reader).map_err(SchemaError::Parse)?;
        Self::from_value(tree)
    }

    /// Top-level fields of the schema.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Coarse tag of a top-level field, if the schema has it.
    pub fn field_tag(&self, name: &str) -> Option<TypeTag> {
        self.fields.get(name).map(TypeTag::of)
    }

    /// Check a tree against this schema, reporting the first mismatch.
    pub fn check(&self, tree: &Value, config: &DecoderConfig) -> std::result::Result<(), Mismatch> {
        match tree {
            Value::Object(data) => check_structure(&self.fields, data, config),
            other => Err(Mismatch {
                path: String::new(),
                kind: MismatchKind::TypeMismatch {
                    expected: TypeTag::Object,
                    found: TypeTag::of_with(other, config.number_tags),
                },
            }),
        }
    }

    /// Parse `raw` with `backend` and check the resulting tree.
    ///
    /// Payloads larger than `config.max_payload_size` are rejected before
    /// parsing.
    pub fn validate_bytes<B: Backend>(
        &self,
        backend: &B,
        raw: &[u8],
        config: &DecoderConfig,
    ) -> Result<()> {
        if raw.len() > config.max_payload_size {
            return Err(SchemaError::PayloadTooLarge {
                size: raw.len(),
                max: config.max_payload_size,
            });
        }

        let tree = backend.parse_tree(raw).map_err(SchemaError::Parse)?;
        self.check(&tree, config)?;
        Ok(())
    }

    /// Check a tree against this schema with the default configuration.
    pub fn is_valid(&self, tree: &Value) -> bool {
        self.check(tree, &DecoderConfig::default()).is_ok()
    }

    /// Export an equivalent JSON Schema (2020-12) document.
    ///
    /// Every object requires all of its keys and forbids any other. Array
    /// items are left unconstrained. Under [`NumberTags::Split`] the export
    /// follows JSON Schema's notion of an integer, so a float literal with a
    /// zero fraction such as `2.0` counts as an integer there.
    pub fn to_json_schema(&self, config: &DecoderConfig) -> Value {
        let mut root = object_schema(&self.fields, config.number_tags);
        if let Value::Object(map) = &mut root {
            map.insert(
                "$schema".to_string(),
                Value::String("https://json-schema.org/draft/2020-12/schema".to_string()),
            );
        }
        root
    }
}

impl TryFrom<Value> for ShapeSchema {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn object_schema(fields: &Map<String, Value>, numbers: NumberTags) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), value_schema(value, numbers)))
        .collect();
    let required: Vec<Value> = fields.keys().cloned().map(Value::String).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn value_schema(value: &Value, numbers: NumberTags) -> Value {
    match value {
        Value::Object(fields) => object_schema(fields, numbers),
        other => {
            let kind = match TypeTag::of_with(other, numbers) {
                // JSON Schema's "number" also admits integers; exclude them
                // so the export agrees with the split comparison.
                TypeTag::Float => {
                    return json!({ "type": "number", "not": { "type": "integer" } });
                }
                tag => tag.as_str(),
            };
            json!({ "type": kind })
        }
    }
}
