use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::backend::{Backend, JsonBackend};
use crate::config::DecoderConfig;
use crate::error::{Result, SchemaError};
use crate::shape::ShapeSchema;

/// Decodes payloads into `T` only when they match the shape of `T` exactly.
///
/// The shape schema is derived once at construction from `T::default()` and
/// reused for every call. A payload is decoded only if its key sets match the
/// schema at every object level and every value carries the schema's type
/// tag; the typed decode is then a second, independent pass over the raw
/// bytes.
///
/// The decoder holds no mutable state and can be shared across threads.
pub struct SchemaDecoder<T, B = JsonBackend> {
    schema: ShapeSchema,
    backend: B,
    config: DecoderConfig,
    _target: PhantomData<fn() -> T>,
}

impl<T> SchemaDecoder<T, JsonBackend>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Create a JSON decoder for `T`, or `None` if `T` has no object shape.
    pub fn new() -> Option<Self> {
        Self::with_backend(JsonBackend)
    }

    /// Create a JSON decoder for `T`, reporting why construction failed.
    pub fn try_new() -> Result<Self> {
        Self::try_with_backend(JsonBackend)
    }
}

impl<T, B> SchemaDecoder<T, B>
where
    T: Serialize + DeserializeOwned,
    B: Backend,
{
    /// Create a decoder for `T` with an explicit backend.
    pub fn with_backend(backend: B) -> Option<Self>
    where
        T: Default,
    {
        match Self::try_with_backend(backend) {
            Ok(decoder) => Some(decoder),
            Err(err) => {
                debug!(
                    target_type = std::any::type_name::<T>(),
                    error = %err,
                    "schema decoder construction failed"
                );
                None
            }
        }
    }

    /// Create a decoder for `T` with an explicit backend, reporting failures.
    pub fn try_with_backend(backend: B) -> Result<Self>
    where
        T: Default,
    {
        Self::try_with_config(backend, DecoderConfig::default())
    }

    /// Create a decoder for `T` with an explicit backend and config.
    pub fn try_with_config(backend: B, config: DecoderConfig) -> Result<Self>
    where
        T: Default,
    {
        Self::try_from_example(backend, config, &T::default())
    }

    /// Create a decoder whose schema is derived from `example` rather than
    /// from `T::default()`.
    pub fn try_from_example(backend: B, config: DecoderConfig, example: &T) -> Result<Self> {
        let raw = backend.serialize(example).map_err(SchemaError::Serialize)?;
        let schema = ShapeSchema::from_reader(&backend, raw.as_slice())?;

        debug!(
            backend = backend.name(),
            target_type = std::any::type_name::<T>(),
            fields = schema.len(),
            "derived shape schema"
        );

        Ok(Self {
            schema,
            backend,
            config,
            _target: PhantomData,
        })
    }

    /// Validate and decode `raw`, or `None` if it is malformed, does not
    /// match the schema, or fails the typed decode.
    ///
    /// The reason for a rejection is logged at `debug` level; use
    /// [`try_decode`](Self::try_decode) to receive it.
    pub fn decode(&self, raw: &[u8]) -> Option<T> {
        match self.try_decode(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(
                    backend = self.backend.name(),
                    target_type = std::any::type_name::<T>(),
                    error = %err,
                    "payload rejected"
                );
                None
            }
        }
    }

    /// Validate and decode `raw`, reporting why it was rejected.
    pub fn try_decode(&self, raw: &[u8]) -> Result<T> {
        self.validate(raw)?;
        let value = self.backend.deserialize(raw).map_err(SchemaError::Decode)?;
        trace!(size = raw.len(), "payload decoded");
        Ok(value)
    }

    /// Check `raw` against the schema without decoding it.
    pub fn validate(&self, raw: &[u8]) -> Result<()> {
        self.schema
            .validate_bytes(&self.backend, raw, &self.config)
    }

    /// The shape schema this decoder validates against.
    pub fn schema(&self) -> &ShapeSchema {
        &self.schema
    }

    /// Decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The serialization backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<T, B: Clone> Clone for SchemaDecoder<T, B> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            backend: self.backend.clone(),
            config: self.config,
            _target: PhantomData,
        }
    }
}

impl<T, B: std::fmt::Debug> std::fmt::Debug for SchemaDecoder<T, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaDecoder")
            .field("target", &std::any::type_name::<T>())
            .field("schema", &self.schema)
            .field("backend", &self.backend)
            .field("config", &self.config)
            .finish()
    }
}
