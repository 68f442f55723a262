//! Reject payloads that do not match the exact shape of their target type.
//!
//! schematic derives a shape schema from a type's default instance and
//! validates every incoming payload against it before decoding, so missing
//! fields, unknown fields and type mismatches never decode silently.
//!
//! # Crate Structure
//!
//! - [`schema`] — Shape schemas, structural comparison and the schema decoder

/// Re-export schema types.
pub mod schema {
    pub use schematic_schema::*;
}
