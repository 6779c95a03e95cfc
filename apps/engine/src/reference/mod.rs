//! Static reference data: synonym table, verb-tier table, role profiles, and
//! level bands. Loaded once at startup into read-only structures; the engine
//! never mutates them, so they are safe to share across concurrent scoring
//! runs behind an `Arc`.

mod defaults;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::models::report::Category;

/// Tier assigned to verbs missing from the table. Lowest non-penalizing tier
/// rather than 0, so vocabulary gaps in the table do not read as weak verbs.
pub const UNKNOWN_VERB_TIER: u8 = 1;

pub const MAX_VERB_TIER: u8 = 4;

// ────────────────────────────────────────────────────────────────────────────
// Synonym table
// ────────────────────────────────────────────────────────────────────────────

/// Bidirectional synonym lookup. Each term maps to its full equivalence
/// class, so a target term matches when any member of its class appears in
/// the text, and vice versa.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    classes: HashMap<String, BTreeSet<String>>,
}

impl SynonymTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut classes: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (head, members) in entries {
            let mut class: BTreeSet<String> = BTreeSet::new();
            class.insert(head.as_ref().to_lowercase());
            for member in &members {
                class.insert(member.as_ref().to_lowercase());
            }
            for member in &class {
                classes
                    .entry(member.clone())
                    .or_default()
                    .extend(class.iter().cloned());
            }
        }
        Self { classes }
    }

    /// The equivalence class of `term`: the term itself, its table synonyms,
    /// and mechanical separator variants (hyphenated, spaced, concatenated).
    pub fn variants_of(&self, term: &str) -> BTreeSet<String> {
        let term = term.to_lowercase();
        let mut variants: BTreeSet<String> = BTreeSet::new();
        if let Some(class) = self.classes.get(&term) {
            variants.extend(class.iter().cloned());
        }
        variants.insert(term.clone());
        for variant in variants.clone() {
            variants.extend(separator_variants(&variant));
        }
        variants
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Hyphenated, spaced, and concatenated forms of a compound term.
fn separator_variants(term: &str) -> Vec<String> {
    if !term.contains([' ', '-']) {
        return Vec::new();
    }
    vec![
        term.replace('-', " "),
        term.replace(' ', "-"),
        term.replace([' ', '-'], ""),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Verb-tier table
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct VerbTierTable {
    verbs: HashMap<String, u8>,
}

impl VerbTierTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u8)>,
        S: AsRef<str>,
    {
        let verbs = entries
            .into_iter()
            .map(|(verb, tier)| (verb.as_ref().to_lowercase(), tier.min(MAX_VERB_TIER)))
            .collect();
        Self { verbs }
    }

    pub fn tier(&self, verb: &str) -> u8 {
        self.verbs
            .get(&verb.to_lowercase())
            .copied()
            .unwrap_or(UNKNOWN_VERB_TIER)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Role profiles and level bands
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleProfile {
    pub required: Vec<String>,
    pub preferred: Vec<String>,
    /// Optional per-category emphasis multipliers. The aggregator scales the
    /// category's raw points and ceilings by these.
    pub weights: BTreeMap<Category, f64>,
}

/// Inclusive year range for one experience tier. Adjacent bands overlap at
/// their boundaries by design.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelBand {
    pub min_years: f64,
    pub max_years: f64,
}

impl LevelBand {
    pub fn contains(&self, years: f64) -> bool {
        years >= self.min_years && years <= self.max_years
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate container and file loading
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub synonyms: SynonymTable,
    pub verb_tiers: VerbTierTable,
    roles: HashMap<String, RoleProfile>,
    levels: HashMap<String, LevelBand>,
}

#[derive(Deserialize)]
struct SynonymsFile {
    #[serde(default)]
    #[allow(dead_code)]
    version: u32,
    classes: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct VerbsFile {
    #[serde(default)]
    #[allow(dead_code)]
    version: u32,
    verbs: BTreeMap<String, u8>,
}

#[derive(Deserialize)]
struct RolesFile {
    #[serde(default)]
    #[allow(dead_code)]
    version: u32,
    roles: BTreeMap<String, RoleProfile>,
}

#[derive(Deserialize)]
struct LevelsFile {
    #[serde(default)]
    #[allow(dead_code)]
    version: u32,
    levels: BTreeMap<String, LevelBand>,
}

impl ReferenceData {
    /// Compiled-in default tables.
    pub fn builtin() -> Self {
        let synonyms = SynonymTable::new(
            defaults::SYNONYM_CLASSES
                .iter()
                .map(|(head, members)| (*head, members.to_vec())),
        );
        let verb_tiers = VerbTierTable::new(defaults::VERB_TIERS.iter().copied());
        let roles = defaults::ROLE_PROFILES
            .iter()
            .map(|role| {
                (
                    role.id.to_string(),
                    RoleProfile {
                        required: role.required.iter().map(|s| s.to_string()).collect(),
                        preferred: role.preferred.iter().map(|s| s.to_string()).collect(),
                        weights: BTreeMap::new(),
                    },
                )
            })
            .collect();
        let levels = defaults::LEVEL_BANDS
            .iter()
            .map(|(id, min_years, max_years)| {
                (
                    id.to_string(),
                    LevelBand {
                        min_years: *min_years,
                        max_years: *max_years,
                    },
                )
            })
            .collect();
        Self {
            synonyms,
            verb_tiers,
            roles,
            levels,
        }
    }

    /// Loads versioned tables from a directory of JSON files. Each file is
    /// optional; the builtin table fills in for a missing one. A present but
    /// unparsable file is a configuration error and propagates.
    pub fn from_dir(dir: &Path) -> Result<Self, EngineError> {
        let mut data = Self::builtin();

        if let Some(file) = read_file::<SynonymsFile>(&dir.join("synonyms.json"))? {
            data.synonyms = SynonymTable::new(file.classes);
        }
        if let Some(file) = read_file::<VerbsFile>(&dir.join("verb_tiers.json"))? {
            data.verb_tiers = VerbTierTable::new(file.verbs);
        }
        if let Some(file) = read_file::<RolesFile>(&dir.join("roles.json"))? {
            data.roles = file.roles.into_iter().collect();
        }
        if let Some(file) = read_file::<LevelsFile>(&dir.join("levels.json"))? {
            data.levels = file.levels.into_iter().collect();
        }

        if data.roles.is_empty() {
            return Err(EngineError::Reference(
                "roles.json defines no role profiles".to_string(),
            ));
        }
        if data.levels.is_empty() {
            return Err(EngineError::Reference(
                "levels.json defines no level bands".to_string(),
            ));
        }

        Ok(data)
    }

    pub fn with_role(mut self, id: &str, profile: RoleProfile) -> Self {
        self.roles.insert(id.to_string(), profile);
        self
    }

    pub fn with_level(mut self, id: &str, band: LevelBand) -> Self {
        self.levels.insert(id.to_string(), band);
        self
    }

    pub fn role(&self, id: &str) -> Result<&RoleProfile, EngineError> {
        self.roles
            .get(id)
            .ok_or_else(|| EngineError::UnknownRole(id.to_string()))
    }

    pub fn level(&self, id: &str) -> Result<&LevelBand, EngineError> {
        self.levels
            .get(id)
            .ok_or_else(|| EngineError::UnknownLevel(id.to_string()))
    }

    pub fn role_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn level_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.levels.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

fn read_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, EngineError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    let parsed = serde_json::from_str(&raw)?;
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_lookup_is_bidirectional() {
        let table = SynonymTable::new([("kubernetes", vec!["k8s"])]);
        assert!(table.variants_of("k8s").contains("kubernetes"));
        assert!(table.variants_of("kubernetes").contains("k8s"));
    }

    #[test]
    fn test_separator_variants_cover_all_forms() {
        let table = SynonymTable::default();
        let variants = table.variants_of("ci-cd");
        assert!(variants.contains("ci cd"));
        assert!(variants.contains("cicd"));
        assert!(variants.contains("ci-cd"));
    }

    #[test]
    fn test_unknown_verb_defaults_to_tier_one() {
        let table = VerbTierTable::new([("led", 3u8)]);
        assert_eq!(table.tier("defenestrated"), UNKNOWN_VERB_TIER);
        assert_eq!(table.tier("LED"), 3);
    }

    #[test]
    fn test_builtin_levels_overlap_at_boundaries() {
        let data = ReferenceData::builtin();
        let entry = data.level("entry").unwrap();
        let mid = data.level("mid").unwrap();
        // years in the overlap belong to both bands
        assert!(entry.contains(2.5));
        assert!(mid.contains(2.5));
    }

    #[test]
    fn test_unknown_role_is_hard_error() {
        let data = ReferenceData::builtin();
        assert!(matches!(
            data.role("underwater-basket-weaver"),
            Err(EngineError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_fixture_role_and_level_injection() {
        let data = ReferenceData::builtin()
            .with_role("fixture-role", RoleProfile::default())
            .with_level(
                "intern",
                LevelBand {
                    min_years: 0.0,
                    max_years: 1.0,
                },
            );
        assert!(data.role("fixture-role").is_ok());
        assert!(data.level("intern").is_ok());
    }

    #[test]
    fn test_from_dir_missing_files_fall_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let data = ReferenceData::from_dir(dir.path()).unwrap();
        assert!(data.role("backend-engineer").is_ok());
    }

    #[test]
    fn test_from_dir_reads_level_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("levels.json"),
            r#"{"version": 2, "levels": {"intern": {"min_years": 0.0, "max_years": 1.0}}}"#,
        )
        .unwrap();
        let data = ReferenceData::from_dir(dir.path()).unwrap();
        assert!(data.level("intern").is_ok());
        assert!(data.level("entry").is_err());
    }
}
