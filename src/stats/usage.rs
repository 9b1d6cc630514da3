//! Per-species usage counts keyed by (canonical species, team type tag).

use std::collections::BTreeMap;
use std::io::Write;

use crate::replay::Team;
use crate::stats::types::TypeIndex;

/// Type tag used when no single type covers a team.
pub const UNKNOWN_TYPE_TAG: &str = "unknown";

/// Usage counts over many parsed teams. Deterministically ordered for output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageCounts {
    counts: BTreeMap<(String, String), u64>,
}

impl UsageCounts {
    pub fn new() -> UsageCounts {
        UsageCounts::default()
    }

    /// Count every roster member of `team` under the team's type tag. Teams
    /// no single type covers are tallied under [`UNKNOWN_TYPE_TAG`] rather
    /// than aborting the whole aggregation.
    pub fn add_team(&mut self, team: &Team, types: &TypeIndex) {
        let species: Vec<String> = team
            .roster
            .values()
            .map(|entity| entity.canonical_name.clone())
            .collect();
        let tag = types.classify(&species).unwrap_or(UNKNOWN_TYPE_TAG).to_string();
        for name in species {
            *self.counts.entry((name, tag.clone())).or_insert(0) += 1;
        }
    }

    pub fn get(&self, species: &str, tag: &str) -> u64 {
        self.counts
            .get(&(species.to_string(), tag.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &u64)> {
        self.counts.iter()
    }

    /// Write counts as tab-separated rows: species, type tag, count.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        for ((species, tag), count) in &self.counts {
            out.write_record([species.as_str(), tag.as_str(), &count.to_string()])?;
        }
        out.flush()?;
        Ok(())
    }
}
