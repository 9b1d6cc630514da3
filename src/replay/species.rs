//! Species canonicalization: collapses form and alias variants to a stable
//! identity string.
//!
//! Rules are data tables consulted in order (exact alias, family stem prefix,
//! suffix strip); first match wins, otherwise the name passes through. New
//! families and aliases are added to the tables, not to control flow.

/// Raw-name -> canonical-name pairs for forms whose variant label is not a
/// simple prefix of the base species (regional color variants, named
/// signature forms).
const EXACT_ALIASES: &[(&str, &str)] = &[
    ("Gastrodon-East", "Gastrodon"),
    ("Shellos-East", "Shellos"),
    ("Keldeo-Resolute", "Keldeo"),
    ("Basculin-Blue-Striped", "Basculin"),
];

/// Stems of polymorphic families whose many form labels (seasonal, size,
/// pattern) all share the stem as a prefix.
const FAMILY_STEMS: &[&str] = &["Pumpkaboo", "Gourgeist", "Sawsbuck", "Deerling", "Vivillon"];

/// Temporary battle-boost markers appended by the protocol; never part of the
/// species identity.
const STRIP_SUFFIXES: &[&str] = &["-Totem"];

/// Collapse a raw species token to its canonical identity.
///
/// Total and idempotent: names matching no rule pass through unchanged, and
/// every table output is itself canonical.
pub fn canonicalize(raw: &str) -> String {
    for (alias, canonical) in EXACT_ALIASES {
        if raw == *alias {
            return (*canonical).to_string();
        }
    }
    for family_stem in FAMILY_STEMS {
        if raw.starts_with(family_stem) {
            return (*family_stem).to_string();
        }
    }
    for suffix in STRIP_SUFFIXES {
        if let Some(stripped) = raw.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    raw.to_string()
}

/// Leading hyphen-separated stem of a canonical species name.
fn stem(species: &str) -> &str {
    species.split('-').next().unwrap_or(species)
}

/// Two canonical species belong to the same family if they are identical or
/// share their leading stem (e.g. "Greninja" and "Greninja-Ash").
pub fn family_match(a: &str, b: &str) -> bool {
    a == b || stem(a) == stem(b)
}
