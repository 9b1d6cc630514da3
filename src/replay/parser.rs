//! Orchestrator: one linear pass over a transcript, dispatching classified
//! lines to the per-side accumulators.

use std::collections::{BTreeMap, HashMap};

use crate::replay::error::ParseError;
use crate::replay::inference::{infers_transformation, transform_rule_for};
use crate::replay::protocol::{classify, Event, Side};
use crate::replay::roster::{Outcome, RosterAccumulator, Team};
use crate::replay::species::canonicalize;

/// Parse one battle transcript into its two finished teams.
///
/// Short-circuits on the first malformed line or unresolvable nickname. A
/// transcript with no outcome line parses successfully with both sides at
/// their default LOSS result; lines after the outcome line are never
/// interpreted. A `|win|` handle that matches no identified player also
/// leaves both sides at LOSS.
///
/// The pass is self-contained (no I/O, no shared state), so callers may parse
/// many transcripts in parallel, each with its own invocation.
pub fn parse(transcript: &str) -> Result<BTreeMap<Side, Team>, ParseError> {
    let mut sides: BTreeMap<Side, RosterAccumulator> = BTreeMap::new();
    sides.insert(Side::P1, RosterAccumulator::new(Side::P1));
    sides.insert(Side::P2, RosterAccumulator::new(Side::P2));
    // Transient: |win| names a handle, not a slot token.
    let mut handles: HashMap<String, Side> = HashMap::new();

    for (index, line) in transcript.lines().enumerate() {
        let line_number = index + 1;
        match classify(line.trim_end(), line_number)? {
            Event::PlayerIdentified { side, handle } => {
                handles.insert(handle.clone(), side);
                accumulator(&mut sides, side).set_player(handle);
            }
            Event::SpeciesRevealed { side, raw_species } => {
                accumulator(&mut sides, side).reveal(&raw_species);
            }
            Event::Deployed { side, nickname, raw_species } => {
                let accum = accumulator(&mut sides, side);
                accum.deploy(&nickname, &raw_species)?;
                let canonical = canonicalize(&raw_species);
                if let Some(rule) = transform_rule_for(&canonical) {
                    if infers_transformation(transcript, side, &nickname, rule) {
                        accum.update_species(&nickname, rule.transformed);
                    }
                }
            }
            Event::FormChanged { side, nickname, raw_species } => {
                accumulator(&mut sides, side).form_change(&nickname, &raw_species)?;
            }
            Event::OutcomeDeclared { winner_handle } => {
                if let Some(&winner) = handles.get(&winner_handle) {
                    accumulator(&mut sides, winner).record_result(Outcome::Win);
                    accumulator(&mut sides, winner.opponent()).record_result(Outcome::Loss);
                }
                // Everything after the outcome is irrelevant to this engine.
                break;
            }
            Event::Unrecognized => {}
        }
    }

    Ok(sides
        .into_iter()
        .map(|(side, accum)| (side, accum.finish()))
        .collect())
}

fn accumulator(
    sides: &mut BTreeMap<Side, RosterAccumulator>,
    side: Side,
) -> &mut RosterAccumulator {
    sides
        .entry(side)
        .or_insert_with(|| RosterAccumulator::new(side))
}
