//! Wire grammar for Showdown battle transcripts.
//!
//! Each protocol line is pipe-delimited with a leading empty field;
//! classification is by line-type prefix, then positional field extraction.
//! Field indices are part of the wire grammar and 0-indexed after splitting
//! on `|`. Lines whose prefix matches no known event type classify as
//! [`Event::Unrecognized`] and are skippable; a recognized prefix with a
//! missing required field is a [`ParseError::MalformedLine`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::replay::error::ParseError;

/// One of the two competing sides, identified by its fixed slot token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub fn token(self) -> &'static str {
        match self {
            Side::P1 => "p1",
            Side::P2 => "p2",
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    fn from_token(token: &str) -> Option<Side> {
        match token {
            "p1" => Some(Side::P1),
            "p2" => Some(Side::P2),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One classified transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `|player|<slot>|<handle>|...`
    PlayerIdentified { side: Side, handle: String },
    /// `|poke|<slot>|<species>, <annotation>|...` — team preview reveal,
    /// species only, no nickname yet.
    SpeciesRevealed { side: Side, raw_species: String },
    /// `|switch|<slot>a: <nickname>|<species>, <annotation>|...` (also
    /// `|drag|`, the forced-switch variant with the same shape).
    Deployed {
        side: Side,
        nickname: String,
        raw_species: String,
    },
    /// `|detailschange|<slot>a: <nickname>|<species>, <annotation>|...`
    FormChanged {
        side: Side,
        nickname: String,
        raw_species: String,
    },
    /// `|win|<handle>` — ends interpretation of the transcript.
    OutcomeDeclared { winner_handle: String },
    /// Any line outside the grammar above.
    Unrecognized,
}

/// Classify one transcript line.
pub fn classify(line: &str, line_number: usize) -> Result<Event, ParseError> {
    let fields: Vec<&str> = line.split('|').collect();
    let Some(kind) = fields.get(1) else {
        return Ok(Event::Unrecognized);
    };

    match *kind {
        "player" => Ok(Event::PlayerIdentified {
            side: slot_field(&fields, 2, line, line_number)?,
            handle: field(&fields, 3, line, line_number)?.trim().to_string(),
        }),
        "poke" => Ok(Event::SpeciesRevealed {
            side: slot_field(&fields, 2, line, line_number)?,
            raw_species: species_field(&fields, 3, line, line_number)?,
        }),
        "switch" | "drag" => {
            let (side, nickname) = position_field(&fields, 2, line, line_number)?;
            Ok(Event::Deployed {
                side,
                nickname,
                raw_species: species_field(&fields, 3, line, line_number)?,
            })
        }
        "detailschange" => {
            let (side, nickname) = position_field(&fields, 2, line, line_number)?;
            Ok(Event::FormChanged {
                side,
                nickname,
                raw_species: species_field(&fields, 3, line, line_number)?,
            })
        }
        "win" => Ok(Event::OutcomeDeclared {
            winner_handle: field(&fields, 2, line, line_number)?.trim().to_string(),
        }),
        _ => Ok(Event::Unrecognized),
    }
}

fn malformed(line: &str, line_number: usize) -> ParseError {
    ParseError::MalformedLine {
        line_number,
        content: line.to_string(),
    }
}

fn field<'a>(
    fields: &[&'a str],
    index: usize,
    line: &str,
    line_number: usize,
) -> Result<&'a str, ParseError> {
    match fields.get(index) {
        Some(value) if !value.trim().is_empty() => Ok(*value),
        _ => Err(malformed(line, line_number)),
    }
}

/// Slot token field (`p1` / `p2`).
fn slot_field(
    fields: &[&str],
    index: usize,
    line: &str,
    line_number: usize,
) -> Result<Side, ParseError> {
    Side::from_token(field(fields, index, line, line_number)?.trim())
        .ok_or_else(|| malformed(line, line_number))
}

/// Species field with its trailing comma-separated annotation (level, gender,
/// shininess) discarded.
fn species_field(
    fields: &[&str],
    index: usize,
    line: &str,
    line_number: usize,
) -> Result<String, ParseError> {
    let raw = field(fields, index, line, line_number)?;
    let species = raw.split(',').next().unwrap_or(raw).trim();
    if species.is_empty() {
        return Err(malformed(line, line_number));
    }
    Ok(species.to_string())
}

/// Position field `<side><battle slot>: <nickname>`, e.g. `p1a: Sparky`.
fn position_field(
    fields: &[&str],
    index: usize,
    line: &str,
    line_number: usize,
) -> Result<(Side, String), ParseError> {
    let raw = field(fields, index, line, line_number)?;
    let (position, nickname) = raw
        .split_once(':')
        .ok_or_else(|| malformed(line, line_number))?;
    let side = position
        .get(..2)
        .and_then(Side::from_token)
        .ok_or_else(|| malformed(line, line_number))?;
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(malformed(line, line_number));
    }
    Ok((side, nickname.to_string()))
}
