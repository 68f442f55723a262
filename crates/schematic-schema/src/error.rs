use crate::compare::Mismatch;
use crate::tag::TypeTag;

/// Error reported by a serialization backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{backend}: {message}")]
pub struct BackendError {
    /// Name of the backend that failed (`json`, `yaml`, ...).
    pub backend: &'static str,
    /// Backend-provided failure description.
    pub message: String,
}

impl BackendError {
    pub fn new(backend: &'static str, message: impl Into<String>) -> Self {
        Self {
            backend,
            message: message.into(),
        }
    }
}

/// Errors that can occur while deriving a schema or decoding a payload.
///
/// The `Option` returning entry points collapse all of these into `None`;
/// the `try_*` variants surface them for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The default instance of the target type could not be serialized.
    #[error("failed to serialize target shape: {0}")]
    Serialize(#[source] BackendError),

    /// The schema source or the payload is not well-formed.
    #[error("failed to parse: {0}")]
    Parse(#[source] BackendError),

    /// The schema or payload top level is not an object.
    #[error("expected an object at the top level, found {0}")]
    NotAnObject(TypeTag),

    /// The payload does not match the shape schema.
    #[error("structural mismatch: {0}")]
    Mismatch(#[from] Mismatch),

    /// The payload passed structural validation but typed decoding failed.
    #[error("failed to decode validated payload: {0}")]
    Decode(#[source] BackendError),

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
