//! Transformation inference for species whose identity can change mid-battle
//! without an explicit protocol signal.
//!
//! The one known case is Greninja's Battle Bond form: sustained move usage
//! turns it into Greninja-Ash, but older transcripts never state the change.
//! The resolver commits to a deterministic lookback policy over the whole
//! transcript. This is a heuristic, not a guaranteed derivation: a recorded
//! move use with no Protean type change is treated as sufficient evidence.

use crate::replay::protocol::Side;

/// One transformation rule: base form, transformed form, and the ability
/// whose type-change signature rules the transformation out.
#[derive(Debug, Clone, Copy)]
pub struct TransformRule {
    pub base: &'static str,
    pub transformed: &'static str,
    pub blocking_ability: &'static str,
}

/// Species requiring transcript-wide inference at deployment time.
pub const TRANSFORM_RULES: &[TransformRule] = &[TransformRule {
    base: "Greninja",
    transformed: "Greninja-Ash",
    blocking_ability: "Protean",
}];

/// Rule for a canonical species, if it has one.
pub fn transform_rule_for(canonical: &str) -> Option<&'static TransformRule> {
    TRANSFORM_RULES.iter().find(|rule| rule.base == canonical)
}

/// Decide whether `nickname` on `side` underwent the rule's transformation.
///
/// Lookback over the full transcript, in order of certainty: an explicit
/// form-change line naming the transformed form is conclusive; a type change
/// attributed to the blocking ability rules the transformation out; otherwise
/// at least one recorded move use is taken as evidence it happened.
pub fn infers_transformation(
    transcript: &str,
    side: Side,
    nickname: &str,
    rule: &TransformRule,
) -> bool {
    let position = format!("{}a: {}", side.token(), nickname);

    let explicit_change = format!("|detailschange|{position}|{}", rule.transformed);
    if transcript.lines().any(|line| line.starts_with(&explicit_change)) {
        return true;
    }

    let type_change_prefix = format!("|-start|{position}|typechange|");
    let ability_marker = format!("[from] {}", rule.blocking_ability);
    let ability_type_change = transcript
        .lines()
        .any(|line| line.starts_with(&type_change_prefix) && line.contains(&ability_marker));
    if ability_type_change {
        return false;
    }

    let move_prefix = format!("|move|{position}|");
    transcript.lines().any(|line| line.starts_with(&move_prefix))
}
