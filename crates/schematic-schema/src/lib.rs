//! Shape-schema validation of serialized payloads before typed decoding.
//!
//! A [`SchemaDecoder`] derives a shape schema from the default instance of a
//! target type and refuses to decode any payload whose keys or value
//! categories differ from it. Missing fields, unknown fields and type
//! mismatches are rejected at every object level instead of being silently
//! defaulted or ignored.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use schematic_schema::SchemaDecoder;
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Login {
//!     user: String,
//!     attempts: u32,
//! }
//!
//! let decoder = SchemaDecoder::<Login>::new().unwrap();
//! assert!(decoder.decode(br#"{"user":"ana","attempts":1}"#).is_some());
//! assert!(decoder.decode(br#"{"user":"ana"}"#).is_none());
//! assert!(decoder.decode(br#"{"user":"ana","attempts":1,"admin":true}"#).is_none());
//! ```

pub mod backend;
#[cfg(feature = "async")]
pub mod codec;
pub mod compare;
pub mod config;
pub mod decoder;
pub mod error;
pub mod shape;
pub mod tag;

#[cfg(feature = "yaml")]
pub use backend::YamlBackend;
pub use backend::{Backend, JsonBackend};
#[cfg(feature = "async")]
pub use codec::SchemaLineCodec;
pub use compare::{check_structure, is_structurally_valid, Mismatch, MismatchKind};
pub use config::{
    DecoderConfig, NumberTags, SequencePolicy, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAYLOAD,
};
pub use decoder::SchemaDecoder;
pub use error::{BackendError, Result, SchemaError};
pub use shape::ShapeSchema;
pub use tag::TypeTag;
