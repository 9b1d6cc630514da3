//! Monotype classification via external per-type species lists.
//!
//! One JSON file per element type in the pokelist directory, shaped
//! `{"data": ["Azumarill", ...]}`. A team's tag is the first type whose list
//! contains every member.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_POKELIST_DIR: &str = "pokelist";

/// Element types checked in order; first full cover wins.
pub const TYPE_NAMES: &[&str] = &[
    "bug", "dark", "dragon", "electric", "fairy", "fighting", "fire", "flying", "ghost", "grass",
    "ground", "ice", "normal", "poison", "psychic", "rock", "steel", "water",
];

#[derive(Debug, Deserialize)]
struct TypeList {
    data: Vec<String>,
}

#[derive(Debug, Error)]
pub enum TypeLookupError {
    #[error("could not read type file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse type list {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// All type membership lists, loaded once and queried per team.
#[derive(Debug, Clone)]
pub struct TypeIndex {
    lists: Vec<(String, HashSet<String>)>,
}

impl TypeIndex {
    /// Load every `<type>.json` list from `dir`. Missing or unparsable files
    /// are errors: a partial index would misclassify teams without a trace.
    pub fn load(dir: impl AsRef<Path>) -> Result<TypeIndex, TypeLookupError> {
        let dir = dir.as_ref();
        let mut lists = Vec::with_capacity(TYPE_NAMES.len());
        for type_name in TYPE_NAMES {
            let path = dir.join(format!("{type_name}.json"));
            let display = path.display().to_string();
            let raw = fs::read_to_string(&path).map_err(|source| TypeLookupError::Read {
                path: display.clone(),
                source,
            })?;
            let list: TypeList =
                serde_json::from_str(&raw).map_err(|source| TypeLookupError::Parse {
                    path: display,
                    source,
                })?;
            lists.push(((*type_name).to_string(), list.data.into_iter().collect()));
        }
        Ok(TypeIndex { lists })
    }

    /// Build an index directly from (type name, members) pairs.
    pub fn from_lists(lists: Vec<(String, Vec<String>)>) -> TypeIndex {
        TypeIndex {
            lists: lists
                .into_iter()
                .map(|(name, members)| (name, members.into_iter().collect()))
                .collect(),
        }
    }

    /// First type whose list contains every team member; None when no type
    /// covers the whole team (an empty team never matches).
    pub fn classify(&self, species: &[String]) -> Option<&str> {
        if species.is_empty() {
            return None;
        }
        self.lists
            .iter()
            .find(|(_, members)| species.iter().all(|name| members.contains(name)))
            .map(|(name, _)| name.as_str())
    }
}
