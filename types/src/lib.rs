use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

// ── Reserved region keys ─────────────────────────────────────────────────

/// Pseudo-region whose intervals apply to every real region.
pub const GLOBAL_REGION: &str = "all";

/// Last-resort bucket consulted when a region has nothing active.
pub const ARCHIPELAGO_REGION: &str = "archipelago";

// ── Occupancy interval ───────────────────────────────────────────────────

/// A time range during which a language is recorded in a region.
///
/// `start_year` is inclusive, `end_year` exclusive. `None` means the
/// language is still spoken (or its end is unresolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyInterval {
    pub language_id: String,
    pub start_year: i32,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl OccupancyInterval {
    pub fn new(language_id: &str, start_year: i32, end_year: Option<i32>) -> Self {
        Self {
            language_id: language_id.to_string(),
            start_year,
            end_year,
            color: None,
        }
    }

    pub fn is_active_at(&self, year: i32) -> bool {
        self.start_year <= year && self.end_year.is_none_or(|end| end > year)
    }
}

// ── Region timeline ──────────────────────────────────────────────────────

/// Region key → ordered occupancy intervals (`regionTimeline.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTimeline")]
pub struct RegionTimeline {
    pub regions: BTreeMap<String, Vec<OccupancyInterval>>,
    /// Regions and interval entries dropped while parsing because they
    /// did not have the expected shape.
    #[serde(skip)]
    pub skipped: usize,
}

impl RegionTimeline {
    /// Intervals listed under `key`; an absent region is an empty list.
    pub fn region(&self, key: &str) -> &[OccupancyInterval] {
        self.regions.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every interval of every region, including the reserved buckets.
    pub fn all_intervals(&self) -> impl Iterator<Item = (&str, &OccupancyInterval)> {
        self.regions
            .iter()
            .flat_map(|(key, list)| list.iter().map(move |iv| (key.as_str(), iv)))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntervalEntry {
    Valid(OccupancyInterval),
    Malformed(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegionEntry {
    Intervals(Vec<IntervalEntry>),
    Malformed(IgnoredAny),
}

#[derive(Deserialize)]
struct RawTimeline {
    #[serde(default)]
    regions: BTreeMap<String, RegionEntry>,
}

/// A region whose value is not a list is dropped, and so is a list entry
/// that is not an interval; its siblings are kept.
impl From<RawTimeline> for RegionTimeline {
    fn from(raw: RawTimeline) -> Self {
        let mut skipped = 0;
        let mut regions = BTreeMap::new();
        for (key, entry) in raw.regions {
            let RegionEntry::Intervals(entries) = entry else {
                skipped += 1;
                continue;
            };
            let mut list = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    IntervalEntry::Valid(iv) => list.push(iv),
                    IntervalEntry::Malformed(_) => skipped += 1,
                }
            }
            regions.insert(key, list);
        }
        Self { regions, skipped }
    }
}

// ── Language definitions ─────────────────────────────────────────────────

/// Static metadata for one language (`languageDefinitions.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDefinition {
    #[serde(default)]
    pub name: String,
    /// Family / subfamily label, e.g. "Malayo-Polynesian, Javanese".
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub alphabet: String,
    #[serde(default)]
    pub description: String,
    /// Ancestor, given either as an id or as a display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Descendant display names, in order.
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Language id → definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDefinitions {
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageDefinition>,
}

impl LanguageDefinitions {
    pub fn get(&self, id: &str) -> Option<&LanguageDefinition> {
        self.languages.get(id)
    }

    /// First definition whose display name equals `name`.
    pub fn find_by_name(&self, name: &str) -> Option<(&str, &LanguageDefinition)> {
        self.languages
            .iter()
            .find(|(_, def)| def.name == name)
            .map(|(id, def)| (id.as_str(), def))
    }
}
