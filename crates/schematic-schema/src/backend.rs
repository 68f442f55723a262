//! Pluggable serialization backends.
//!
//! A backend provides the three boundary operations the decoder needs:
//! serializing a value, decoding bytes into a typed value, and parsing a
//! byte stream into a generic tree.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendError;

/// Serialization strategy used by [`SchemaDecoder`](crate::SchemaDecoder).
pub trait Backend {
    /// Short backend name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Serialize a value to bytes.
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, BackendError>;

    /// Decode bytes into a typed value.
    fn deserialize<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, BackendError>;

    /// Parse a byte stream into a generic tree without a target type.
    fn parse_tree<R: Read>(&self, reader: R) -> Result<Value, BackendError>;
}

/// JSON backend built on `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend;

impl JsonBackend {
    const NAME: &'static str = "json";

    fn error(err: serde_json::Error) -> BackendError {
        BackendError::new(Self::NAME, err.to_string())
    }
}

impl Backend for JsonBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, BackendError> {
        serde_json::to_vec(value).map_err(Self::error)
    }

    fn deserialize<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, BackendError> {
        serde_json::from_slice(raw).map_err(Self::error)
    }

    fn parse_tree<R: Read>(&self, reader: R) -> Result<Value, BackendError> {
        let mut de = serde_json::Deserializer::from_reader(reader);
        let value = Value::deserialize(&mut de).map_err(Self::error)?;
        de.end().map_err(Self::error)?;
        Ok(value)
    }
}

/// YAML backend built on `serde_yaml`.
///
/// Mappings with non-string keys cannot be represented as a generic tree and
/// fail to parse.
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlBackend;

#[cfg(feature = "yaml")]
impl YamlBackend {
    const NAME: &'static str = "yaml";

    fn error(err: serde_yaml::Error) -> BackendError {
        BackendError::new(Self::NAME, err.to_string())
    }
}

#[cfg(feature = "yaml")]
impl Backend for YamlBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, BackendError> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(Self::error)
    }

    fn deserialize<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, BackendError> {
        serde_yaml::from_slice(raw).map_err(Self::error)
    }

    fn parse_tree<R: Read>(&self, reader: R) -> Result<Value, BackendError> {
        serde_yaml::from_reader(reader).map_err(Self::error)
    }
}
