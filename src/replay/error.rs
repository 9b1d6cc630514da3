//! Error taxonomy for transcript parsing.

use thiserror::Error;

use crate::replay::protocol::Side;

/// Failures surfaced by [`parse`](crate::replay::parse).
///
/// Parsing short-circuits on the first failure, carrying enough context to
/// reproduce it. A transcript with no outcome line is not a failure; both
/// sides keep their default LOSS result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line's prefix matched a known event type but a required field was
    /// missing or empty.
    #[error("malformed protocol line {line_number}: {content:?}")]
    MalformedLine { line_number: usize, content: String },

    /// A deployment or form change named a species with no family-matching
    /// provisional roster entry on that side.
    #[error("side {side}: no roster entry matches nickname {nickname:?} with species {species:?}")]
    UnresolvedNickname {
        side: Side,
        nickname: String,
        species: String,
    },
}
