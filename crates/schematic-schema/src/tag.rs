use std::fmt;

use serde_json::Value;

use crate::config::NumberTags;

/// Coarse runtime category of a decoded value.
///
/// Two values are structurally compatible only when their tags are equal.
/// `Integer` and `Float` are produced only under [`NumberTags::Split`];
/// otherwise every number carries `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Bool,
    Number,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl TypeTag {
    /// Tag a value using the coarse numeric category.
    pub fn of(value: &Value) -> Self {
        Self::of_with(value, NumberTags::Coarse)
    }

    /// Tag a value under an explicit numeric policy.
    pub fn of_with(value: &Value, numbers: NumberTags) -> Self {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Number(n) => match numbers {
                NumberTags::Coarse => TypeTag::Number,
                NumberTags::Split if n.is_f64() => TypeTag::Float,
                NumberTags::Split => TypeTag::Integer,
            },
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
        }
    }

    /// Lowercase name, matching JSON Schema's `type` keyword where one exists.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Bool => "boolean",
            TypeTag::Number => "number",
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
