//! teamscout: Pokémon Showdown replay analytics.
//!
//! Reconstructs each side's team, lead and outcome from a battle transcript
//! ([`replay`]), locates and fetches transcripts ([`sources`]), and aggregates
//! per-species usage across many replays ([`stats`]).

pub mod cli;
pub mod replay;
pub mod sources;
pub mod stats;
