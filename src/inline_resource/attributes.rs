//! Attribute extraction for located reference elements
//!
//! Attributes keep their source order. The `src`/`href` attribute is dropped
//! because it encodes the reference being resolved, not a pass-through
//! attribute.

use super::types::Attribute;

/// Attributes that encode the reference itself
pub const REFERENCE_ATTRIBUTES: [&str; 2] = ["src", "href"];

/// Build the pass-through attribute list from raw (name, value) pairs
pub fn from_pairs<I>(pairs: I) -> Vec<Attribute>
where
    I: IntoIterator<Item = (String, String)>,
{
    pairs
        .into_iter()
        .filter(|(name, _)| {
            !REFERENCE_ATTRIBUTES
                .iter()
                .any(|reference| name.eq_ignore_ascii_case(reference))
        })
        .map(|(name, value)| Attribute { name, value })
        .collect()
}
