/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Default maximum nesting depth of payload objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How numbers are tagged during comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberTags {
    /// One `number` tag for every numeric value.
    #[default]
    Coarse,
    /// Integers and floats carry distinct tags.
    Split,
}

/// How arrays are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Arrays are compared by tag only; elements are never inspected.
    #[default]
    TagOnly,
    /// Every element of a payload array must match the shape of its first element.
    Homogeneous,
}

/// Controls structural validation behavior.
///
/// Every non-default setting is stricter than the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Numeric tagging policy.
    pub number_tags: NumberTags,
    /// Array element policy.
    pub sequences: SequencePolicy,
    /// Maximum payload size in bytes.
    pub max_payload_size: usize,
    /// Maximum nesting depth walked during comparison.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            number_tags: NumberTags::Coarse,
            sequences: SequencePolicy::TagOnly,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
