//! Map regions: SVG group ids, the data buckets they read from, and the
//! fill each one gets at a given year.

use serde::Serialize;

use crate::atlas::Atlas;
use crate::color::{Emphasis, NEUTRAL_FILL};

/// SVG group id → region key in the timeline dataset.
///
/// Several provinces share one bucket (all of Sumatra reads `sumatra`).
pub static REGION_MAPPING: &[(&str, &str)] = &[
    // Java
    ("Banten", "banten"),
    ("Jawa-Barat", "west-java"),
    ("Jawa-Tengah", "central-java"),
    ("Daerah-Istimewa-Yogyakarta", "yogyakarta"),
    ("Jawa-Timur", "east-java"),
    ("Pulau-Madura", "madura"),
    // Sumatra
    ("Aceh", "sumatra"),
    ("Sumatera-Utara", "sumatra"),
    ("Sumatera-Barat", "sumatra"),
    ("Riau", "sumatra"),
    ("Kepulauan-Riau", "sumatra"),
    ("Jambi", "sumatra"),
    ("Bengkulu", "sumatra"),
    ("Sumatera-Selatan", "sumatra"),
    ("Lampung", "sumatra"),
    ("Pulau-Bangka", "sumatra"),
    ("Pulau-Belitung", "sumatra"),
    ("Pulau-Nias", "sumatra"),
    ("Pulau-Siberut", "sumatra"),
    // Kalimantan
    ("Kalimantan-Barat", "kalimantan"),
    ("Kalimantan-Tengah", "kalimantan"),
    ("Kalimantan-Selatan", "kalimantan"),
    ("Kalimantan-Utara---Kalimantan-Timur", "kalimantan"),
    // Sulawesi
    ("Sulawesi-Utara", "sulawesi-utara"),
    ("Gorontalo", "gorontalo"),
    ("Sulawesi-Tengah", "sulawesi-tengah"),
    ("Sulawesi-Barat", "sulawesi-barat"),
    ("Sulawesi-Selatan", "sulawesi-selatan"),
    ("Sulawesi-Tenggara", "sulawesi-tenggara"),
    ("Pulau-Buton", "sulawesi-tenggara"),
    ("Pulau-Muna", "sulawesi-tenggara"),
    // Papua
    ("Papua", "papua"),
    ("Papua-Barat", "papua"),
    // Maluku
    ("Maluku", "maluku"),
    ("Maluku-Utara", "maluku"),
    ("Pulau-Buru", "maluku"),
    // Bali and Nusa Tenggara
    ("Bali", "bali"),
    ("Nusa-Tenggara-Barat", "nusatenggara"),
    ("Pulau-Lombok", "nusatenggara"),
    ("Nusa-Tenggara-Timur", "nusatenggara"),
    ("Pu-au-Sumba", "nusatenggara"),
    ("Pulau-Timor", "nusatenggara"),
    ("Pulau-Wetar", "nusatenggara"),
    ("NTT-Small-1", "nusatenggara"),
    ("NTT-Small-2", "nusatenggara"),
    ("NTT-Small-3", "nusatenggara"),
    ("NTT-Small-4", "nusatenggara"),
    ("NTT-Small-5", "nusatenggara"),
    ("NTT-Small-6", "nusatenggara"),
    ("NTT-Small-7", "nusatenggara"),
    ("NTT-Small-8", "nusatenggara"),
    ("NTT-Small-9", "nusatenggara"),
    ("NTB-Small-1", "nusatenggara"),
];

/// Region key an SVG group reads from.
pub fn data_region(svg_id: &str) -> Option<&'static str> {
    REGION_MAPPING
        .iter()
        .find(|(id, _)| *id == svg_id)
        .map(|(_, key)| *key)
}

/// Distinct region keys referenced by the map, in table order.
pub fn mapped_regions() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Vec::new();
    for &(_, key) in REGION_MAPPING {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Human-readable name for an SVG group id ("Jawa-Barat" → "Jawa Barat").
pub fn display_name(svg_id: &str) -> String {
    svg_id.replace('-', " ")
}

/// The fill chosen for one SVG group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFill {
    pub svg_id: &'static str,
    pub region: &'static str,
    /// Language whose color was used, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
    pub fill: String,
}

/// Fill for one region key.
///
/// Without a selection the dominant interval decides: its own `color` when
/// the dataset provides one, else the derived overlay color. With a
/// selection only regions where that language is active get colored.
pub fn region_fill(
    atlas: &Atlas,
    region: &str,
    year: i32,
    selected: Option<&str>,
) -> (Option<String>, String) {
    let set = atlas.resolve(region, year);

    if let Some(selected) = selected {
        return if set.contains_language(selected) {
            let color = atlas.color_for(selected, year, Emphasis::Selected);
            (Some(selected.to_string()), color.to_string())
        } else {
            (None, NEUTRAL_FILL.to_string())
        };
    }

    match set.dominant() {
        Some(iv) => {
            let fill = match &iv.color {
                Some(explicit) => explicit.clone(),
                None => atlas.color_for(&iv.language_id, year, Emphasis::Overlay).to_string(),
            };
            (Some(iv.language_id.clone()), fill)
        }
        None => (None, NEUTRAL_FILL.to_string()),
    }
}

/// Fill every SVG group at `year`.
pub fn paint_map(atlas: &Atlas, year: i32, selected: Option<&str>) -> Vec<RegionFill> {
    REGION_MAPPING
        .iter()
        .map(|&(svg_id, region)| {
            let (language_id, fill) = region_fill(atlas, region, year, selected);
            RegionFill {
                svg_id,
                region,
                language_id,
                fill,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lang_types::{LanguageDefinition, LanguageDefinitions, OccupancyInterval, RegionTimeline};

    use super::*;

    fn atlas() -> Atlas {
        let mut tl = RegionTimeline::default();
        tl.regions.insert(
            "all".into(),
            vec![OccupancyInterval::new("market-malay", -200, None)],
        );
        tl.regions.insert(
            "bali".into(),
            vec![OccupancyInterval::new("old-balinese", 800, Some(1500))],
        );
        let mut painted = OccupancyInterval::new("dani", 0, None);
        painted.color = Some("#aa3300".into());
        tl.regions.insert("papua".into(), vec![painted]);

        let mut defs = LanguageDefinitions::default();
        for (id, branch) in [
            ("market-malay", "Malayic"),
            ("old-balinese", "Malayo-Polynesian, Bali-Sasak-Sumbawa"),
            ("dani", "Papuan"),
        ] {
            defs.languages.insert(
                id.into(),
                LanguageDefinition {
                    name: id.into(),
                    branch: branch.into(),
                    ..Default::default()
                },
            );
        }
        Atlas::from_datasets(tl, defs)
    }

    #[test]
    fn test_mapping_lookup() {
        assert_eq!(data_region("Jawa-Barat"), Some("west-java"));
        assert_eq!(data_region("Pulau-Nias"), Some("sumatra"));
        assert_eq!(data_region("Atlantis"), None);
        assert_eq!(display_name("Nusa-Tenggara-Barat"), "Nusa Tenggara Barat");
    }

    #[test]
    fn test_mapped_regions_are_distinct() {
        let keys = mapped_regions();
        assert_eq!(keys.first(), Some(&"banten"));
        assert_eq!(keys.iter().filter(|k| **k == "sumatra").count(), 1);
        assert!(keys.contains(&"nusatenggara"));
    }

    #[test]
    fn test_dominant_regional_language_wins() {
        let atlas = atlas();
        let (lang, fill) = region_fill(&atlas, "bali", 1000, None);
        assert_eq!(lang.as_deref(), Some("old-balinese"));
        assert_eq!(fill, atlas.color_for("old-balinese", 1000, Emphasis::Overlay).to_string());
    }

    #[test]
    fn test_explicit_interval_color_is_used() {
        let atlas = atlas();
        let (lang, fill) = region_fill(&atlas, "papua", 1000, None);
        assert_eq!(lang.as_deref(), Some("dani"));
        assert_eq!(fill, "#aa3300");
    }

    #[test]
    fn test_nothing_active_is_neutral() {
        let atlas = atlas();
        assert_eq!(region_fill(&atlas, "bali", -500, None), (None, NEUTRAL_FILL.to_string()));
    }

    #[test]
    fn test_selection_colors_only_matching_regions() {
        let atlas = atlas();
        let fills = paint_map(&atlas, 1000, Some("old-balinese"));
        assert_eq!(fills.len(), REGION_MAPPING.len());
        for f in &fills {
            if f.region == "bali" {
                assert_eq!(f.fill, atlas.color_for("old-balinese", 1000, Emphasis::Selected).to_string());
            } else {
                assert_eq!(f.fill, NEUTRAL_FILL, "{}", f.svg_id);
            }
        }
    }

    #[test]
    fn test_selected_global_language_colors_everywhere() {
        let atlas = atlas();
        let fills = paint_map(&atlas, 0, Some("market-malay"));
        assert!(fills.iter().all(|f| f.language_id.as_deref() == Some("market-malay")));
    }
}
