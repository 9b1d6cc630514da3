//! Downstream aggregation over parsed teams: monotype classification and
//! per-species usage counts.

mod types;
mod usage;

pub use types::{TypeIndex, TypeLookupError, DEFAULT_POKELIST_DIR, TYPE_NAMES};
pub use usage::{UsageCounts, UNKNOWN_TYPE_TAG};
