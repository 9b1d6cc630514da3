//! Per-side roster accumulation: nickname -> entity binding under delayed,
//! incomplete information.
//!
//! Team preview reveals carry only a species; deployments carry the nickname.
//! Each entry starts `Provisional`, keyed by its canonical species string,
//! and is rebound to the real nickname on the first matching deployment.
//! Entities live in a stable arena indexed by [`SlotId`]; rebinding only
//! moves the lookup key, the entity itself never moves, so there is no
//! delete-while-iterating or double-key hazard.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::replay::error::ParseError;
use crate::replay::protocol::Side;
use crate::replay::species::{canonicalize, family_match};

/// Reserved capacity for move slots; the engine never populates them.
pub const MOVE_SLOTS: usize = 4;

/// Outcome of one side. LOSS is the default and stands when the transcript
/// ends without an outcome event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    #[default]
    Loss,
}

/// One revealed team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Canonical species identity; updated in place on form changes.
    pub canonical_name: String,
    /// Reserved for move extraction; unpopulated.
    pub moves: Vec<String>,
    /// Reserved for held-item extraction; unpopulated.
    pub item: Option<String>,
}

impl Entity {
    pub fn new(canonical_name: impl Into<String>) -> Entity {
        Entity {
            canonical_name: canonical_name.into(),
            moves: Vec::with_capacity(MOVE_SLOTS),
            item: None,
        }
    }
}

/// Finished record for one side, as returned to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Display handle from the player-identification line.
    pub player: String,
    /// Roster key of the first-deployed entity; None if nothing deployed.
    pub lead: Option<String>,
    pub result: Outcome,
    /// Roster entries keyed by nickname (or, for entities never deployed, by
    /// their canonical species placeholder).
    pub roster: BTreeMap<String, Entity>,
}

impl Team {
    /// Canonical species of the lead, when a lead was recorded.
    pub fn lead_species(&self) -> Option<&str> {
        let lead = self.lead.as_deref()?;
        self.roster.get(lead).map(|entity| entity.canonical_name.as_str())
    }

    /// Canonical species of every roster member, sorted.
    pub fn species_sorted(&self) -> Vec<&str> {
        let mut species: Vec<&str> = self
            .roster
            .values()
            .map(|entity| entity.canonical_name.as_str())
            .collect();
        species.sort_unstable();
        species
    }
}

/// Stable index of an entity in the arena. Never invalidated by rebinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotId(usize);

/// Lifecycle of one arena slot's lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Keyed by canonical species until a deployment discloses the nickname.
    Provisional,
    /// Keyed by the player-chosen nickname.
    Bound,
}

#[derive(Debug, Clone)]
struct Slot {
    /// Current lookup key; mirrored in the accumulator's key map.
    key: String,
    binding: Binding,
    entity: Entity,
}

/// Stateful accumulator for one side's roster, lead and result.
#[derive(Debug, Clone)]
pub struct RosterAccumulator {
    side: Side,
    player: String,
    lead: Option<String>,
    result: Option<Outcome>,
    slots: Vec<Slot>,
    keys: HashMap<String, SlotId>,
}

impl RosterAccumulator {
    pub fn new(side: Side) -> RosterAccumulator {
        RosterAccumulator {
            side,
            player: String::new(),
            lead: None,
            result: None,
            slots: Vec::new(),
            keys: HashMap::new(),
        }
    }

    /// Record the side's display handle. First identification wins.
    pub fn set_player(&mut self, handle: String) {
        if self.player.is_empty() {
            self.player = handle;
        }
    }

    /// Record the side's outcome. Set at most once.
    pub fn record_result(&mut self, outcome: Outcome) {
        if self.result.is_none() {
            self.result = Some(outcome);
        }
    }

    /// Ingest a team-preview reveal: insert a provisional entry keyed by the
    /// canonical species.
    ///
    /// When the same canonical species is revealed twice for one side (two
    /// same-family forms on one roster), both get their own arena slot; the
    /// placeholder key keeps pointing at the first. Deployments still resolve
    /// both, because binding scans the arena for provisional entries rather
    /// than going through the key map.
    pub fn reveal(&mut self, raw_species: &str) {
        let canonical = canonicalize(raw_species);
        let id = SlotId(self.slots.len());
        self.slots.push(Slot {
            key: canonical.clone(),
            binding: Binding::Provisional,
            entity: Entity::new(canonical.clone()),
        });
        if !self.keys.contains_key(&canonical) {
            self.keys.insert(canonical, id);
        }
    }

    /// Ingest a deployment. Binds the nickname (rebinding a provisional entry
    /// if needed) and records the lead on the earliest deployment.
    pub fn deploy(&mut self, nickname: &str, raw_species: &str) -> Result<(), ParseError> {
        self.bind(nickname, raw_species)?;
        if self.lead.is_none() {
            self.lead = Some(nickname.to_string());
        }
        Ok(())
    }

    /// Ingest a form change for `nickname`. Same binding rules as deployment,
    /// but never sets the lead.
    pub fn form_change(&mut self, nickname: &str, raw_species: &str) -> Result<(), ParseError> {
        self.bind(nickname, raw_species)
    }

    /// Overwrite the canonical species of an already-bound nickname (used by
    /// the transformation resolver). Returns false if the nickname is unknown.
    pub fn update_species(&mut self, nickname: &str, canonical_name: &str) -> bool {
        match self.keys.get(nickname) {
            Some(&SlotId(index)) => {
                self.slots[index].entity.canonical_name = canonical_name.to_string();
                true
            }
            None => false,
        }
    }

    fn bind(&mut self, nickname: &str, raw_species: &str) -> Result<(), ParseError> {
        let canonical = canonicalize(raw_species);

        if let Some(&SlotId(index)) = self.keys.get(nickname) {
            let slot = &mut self.slots[index];
            // Default nicknames equal the placeholder key; either way the
            // entry is bound now and only the species can still change.
            slot.binding = Binding::Bound;
            slot.entity.canonical_name = canonical;
            return Ok(());
        }

        let matched = self.slots.iter().position(|slot| {
            slot.binding == Binding::Provisional
                && family_match(&slot.entity.canonical_name, &canonical)
        });
        let Some(index) = matched else {
            return Err(ParseError::UnresolvedNickname {
                side: self.side,
                nickname: nickname.to_string(),
                species: canonical,
            });
        };

        let slot = &mut self.slots[index];
        // Duplicate reveals can leave two slots under one placeholder key;
        // only drop the mapping if it points at the slot being rebound.
        if self.keys.get(&slot.key) == Some(&SlotId(index)) {
            self.keys.remove(&slot.key);
        }
        slot.key = nickname.to_string();
        slot.binding = Binding::Bound;
        slot.entity.canonical_name = canonical;
        self.keys.insert(nickname.to_string(), SlotId(index));
        Ok(())
    }

    /// Finish accumulation into the consumer-facing [`Team`].
    pub fn finish(self) -> Team {
        let mut roster = BTreeMap::new();
        for slot in self.slots {
            roster.insert(slot.key, slot.entity);
        }
        Team {
            player: self.player,
            lead: self.lead,
            result: self.result.unwrap_or_default(),
            roster,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Outcome, RosterAccumulator};
    use crate::replay::error::ParseError;
    use crate::replay::protocol::Side;

    #[test]
    fn reveal_then_deploy_rebinds_placeholder_to_nickname() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Pikachu, irrelevant");
        accum.deploy("Sparky", "Pikachu").unwrap();
        let team = accum.finish();
        assert_eq!(team.roster.len(), 1);
        assert_eq!(team.roster["Sparky"].canonical_name, "Pikachu");
        assert!(!team.roster.contains_key("Pikachu"));
    }

    #[test]
    fn lead_is_first_deployment_and_never_reassigned() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Pikachu");
        accum.reveal("Charizard");
        accum.deploy("Sparky", "Pikachu").unwrap();
        accum.deploy("Zard", "Charizard").unwrap();
        accum.deploy("Sparky", "Pikachu").unwrap();
        assert_eq!(accum.finish().lead.as_deref(), Some("Sparky"));
    }

    #[test]
    fn form_change_updates_species_without_changing_key() {
        let mut accum = RosterAccumulator::new(Side::P2);
        accum.reveal("Charizard");
        accum.deploy("Zard", "Charizard").unwrap();
        accum.form_change("Zard", "Charizard-Mega-X").unwrap();
        let team = accum.finish();
        assert_eq!(team.roster["Zard"].canonical_name, "Charizard-Mega-X");
    }

    #[test]
    fn form_change_can_rebind_a_provisional_entry() {
        // A detailschange can be the first line disclosing the nickname.
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Charizard");
        accum.form_change("Zard", "Charizard-Mega-Y").unwrap();
        let team = accum.finish();
        assert_eq!(team.roster["Zard"].canonical_name, "Charizard-Mega-Y");
        assert!(team.lead.is_none());
    }

    #[test]
    fn rebinding_preserves_latest_species_history() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Pumpkaboo-Small");
        accum.deploy("Lantern", "Pumpkaboo-Small").unwrap();
        accum.form_change("Lantern", "Pumpkaboo-Super").unwrap();
        let team = accum.finish();
        // Canonicalization collapses the whole family, so the latest observed
        // species and the placeholder agree.
        assert_eq!(team.roster["Lantern"].canonical_name, "Pumpkaboo");
    }

    #[test]
    fn default_nickname_matching_placeholder_binds_in_place() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Pikachu");
        accum.deploy("Pikachu", "Pikachu").unwrap();
        let team = accum.finish();
        assert_eq!(team.roster["Pikachu"].canonical_name, "Pikachu");
        assert_eq!(team.roster.len(), 1);
    }

    #[test]
    fn unmatched_deployment_is_reported_not_dropped() {
        let mut accum = RosterAccumulator::new(Side::P2);
        accum.reveal("Pikachu");
        let err = accum.deploy("Vee", "Eevee").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnresolvedNickname {
                side: Side::P2,
                nickname: "Vee".to_string(),
                species: "Eevee".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_same_canonical_reveals_track_both_members() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Gastrodon");
        accum.reveal("Gastrodon-East");
        accum.deploy("SlugA", "Gastrodon").unwrap();
        accum.deploy("SlugB", "Gastrodon").unwrap();
        let team = accum.finish();
        assert_eq!(team.roster.len(), 2);
        assert_eq!(team.roster["SlugA"].canonical_name, "Gastrodon");
        assert_eq!(team.roster["SlugB"].canonical_name, "Gastrodon");
    }

    #[test]
    fn undeployed_duplicate_reveal_stays_in_the_roster() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Gastrodon");
        accum.reveal("Gastrodon-East");
        accum.deploy("SlugA", "Gastrodon").unwrap();
        let team = accum.finish();
        assert_eq!(team.roster.len(), 2);
        assert_eq!(team.roster["Gastrodon"].canonical_name, "Gastrodon");
    }

    #[test]
    fn duplicate_placeholder_survives_default_nickname_binding() {
        // A default nickname equal to the shared placeholder key binds the
        // first slot in place; the second slot must still resolve.
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Gastrodon");
        accum.reveal("Gastrodon-East");
        accum.deploy("Gastrodon", "Gastrodon").unwrap();
        accum.deploy("SlugB", "Gastrodon").unwrap();
        let team = accum.finish();
        assert_eq!(team.roster.len(), 2);
        assert_eq!(team.roster["Gastrodon"].canonical_name, "Gastrodon");
        assert_eq!(team.roster["SlugB"].canonical_name, "Gastrodon");
    }

    #[test]
    fn player_and_result_are_set_at_most_once() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.set_player("Ash".to_string());
        accum.set_player("Impostor".to_string());
        accum.record_result(Outcome::Win);
        accum.record_result(Outcome::Loss);
        let team = accum.finish();
        assert_eq!(team.player, "Ash");
        assert_eq!(team.result, Outcome::Win);
    }

    #[test]
    fn result_defaults_to_loss() {
        let accum = RosterAccumulator::new(Side::P2);
        assert_eq!(accum.finish().result, Outcome::Loss);
    }

    #[test]
    fn team_lead_species_and_sorted_species() {
        let mut accum = RosterAccumulator::new(Side::P1);
        accum.reveal("Pikachu");
        accum.reveal("Charizard");
        accum.deploy("Sparky", "Pikachu").unwrap();
        let team = accum.finish();
        assert_eq!(team.lead_species(), Some("Pikachu"));
        assert_eq!(team.species_sorted(), vec!["Charizard", "Pikachu"]);
    }
}
