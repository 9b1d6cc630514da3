//! Battle transcript reconstruction: canonical per-side rosters, leads and
//! outcomes from Showdown protocol logs. Pure, single-pass, no I/O.

mod error;
mod inference;
mod parser;
mod protocol;
mod roster;
mod species;

pub use error::ParseError;
pub use inference::{infers_transformation, transform_rule_for, TransformRule, TRANSFORM_RULES};
pub use parser::parse;
pub use protocol::{classify, Event, Side};
pub use roster::{Entity, Outcome, RosterAccumulator, Team, MOVE_SLOTS};
pub use species::{canonicalize, family_match};
