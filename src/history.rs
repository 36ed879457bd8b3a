//! Region history: every language a region has seen, laid out as rows of
//! segments on a fixed year axis.

use std::collections::HashSet;

use lang_types::{GLOBAL_REGION, OccupancyInterval};
use serde::Serialize;

use crate::atlas::Atlas;
use crate::color::Emphasis;
use crate::year::{MAX_YEAR, MIN_YEAR, format_year};

/// Segments narrower than this (percent of the axis) are widened to it.
const MIN_WIDTH_PERCENT: f64 = 0.5;
const TICK_STEP: usize = 500;

/// One interval placed on the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub language_id: String,
    pub label: String,
    pub start_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    /// Row index; one row per distinct language.
    pub row: usize,
    pub active: bool,
    pub color: String,
    pub left_percent: f64,
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub year: i32,
    pub label: String,
    pub left_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionHistory {
    pub region: String,
    pub year: i32,
    pub row_count: usize,
    pub segments: Vec<Segment>,
}

fn axis_span() -> f64 {
    f64::from(MAX_YEAR) - f64::from(MIN_YEAR)
}

// Years are unbounded; subtract in f64 so extreme values cannot overflow.
fn axis_percent(year: i32) -> f64 {
    (f64::from(year) - f64::from(MIN_YEAR)) / axis_span() * 100.0
}

/// Global and regional intervals with `(language, start)` duplicates
/// removed, first occurrence kept.
fn history_entries<'a>(atlas: &'a Atlas, region: &str) -> Vec<&'a OccupancyInterval> {
    let Some(timeline) = atlas.timeline() else {
        return Vec::new();
    };
    let global = if region == GLOBAL_REGION {
        &[][..]
    } else {
        timeline.region(GLOBAL_REGION)
    };

    let mut seen: HashSet<(&str, i32)> = HashSet::new();
    let mut entries = Vec::new();
    for iv in global.iter().chain(timeline.region(region)) {
        if seen.insert((iv.language_id.as_str(), iv.start_year)) {
            entries.push(iv);
        }
    }
    entries
}

/// Build the history of `region`, coloring every segment at full opacity
/// for `year` and flagging the ones active then.
pub fn region_history(atlas: &Atlas, region: &str, year: i32) -> RegionHistory {
    let mut entries = history_entries(atlas, region);
    entries.sort_by_key(|iv| iv.start_year);

    let mut rows: Vec<&str> = Vec::new();
    let segments = entries
        .into_iter()
        .map(|iv| {
            let row = match rows.iter().position(|id| *id == iv.language_id) {
                Some(row) => row,
                None => {
                    rows.push(&iv.language_id);
                    rows.len() - 1
                }
            };

            let start = iv.start_year.max(MIN_YEAR);
            let end = iv.end_year.unwrap_or(MAX_YEAR);
            let width = (f64::from(end) - f64::from(start)) / axis_span() * 100.0;

            Segment {
                language_id: iv.language_id.clone(),
                label: atlas.label(&iv.language_id).to_string(),
                start_year: iv.start_year,
                end_year: iv.end_year,
                row,
                active: iv.is_active_at(year),
                color: atlas.color_for(&iv.language_id, year, Emphasis::Opacity(1.0)).to_string(),
                left_percent: axis_percent(start),
                width_percent: width.max(MIN_WIDTH_PERCENT),
            }
        })
        .collect();

    RegionHistory {
        region: region.to_string(),
        year,
        row_count: rows.len(),
        segments,
    }
}

/// Axis ticks every 500 years from the left edge.
pub fn axis_ticks() -> Vec<AxisTick> {
    (MIN_YEAR..=MAX_YEAR)
        .step_by(TICK_STEP)
        .map(|year| AxisTick {
            year,
            label: format_year(year),
            left_percent: axis_percent(year),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lang_types::{LanguageDefinition, LanguageDefinitions, RegionTimeline};

    use super::*;

    fn atlas() -> Atlas {
        let mut tl = RegionTimeline::default();
        tl.regions.insert(
            "all".into(),
            vec![OccupancyInterval::new("market-malay", -200, None)],
        );
        tl.regions.insert(
            "java".into(),
            vec![
                OccupancyInterval::new("modern-javanese", 1600, None),
                OccupancyInterval::new("old-javanese", 800, Some(1500)),
                OccupancyInterval::new("market-malay", -200, None),
                OccupancyInterval::new("proto-javanese", -3000, Some(800)),
                OccupancyInterval::new("old-javanese", 1520, Some(1530)),
            ],
        );
        let mut defs = LanguageDefinitions::default();
        defs.languages.insert(
            "old-javanese".into(),
            LanguageDefinition {
                name: "Old Javanese".into(),
                branch: "Javanese".into(),
                ..Default::default()
            },
        );
        Atlas::from_datasets(tl, defs)
    }

    #[test]
    fn test_duplicates_removed_and_sorted() {
        let h = region_history(&atlas(), "java", 1000);
        let order: Vec<(&str, i32)> = h
            .segments
            .iter()
            .map(|s| (s.language_id.as_str(), s.start_year))
            .collect();
        assert_eq!(
            order,
            vec![
                ("proto-javanese", -3000),
                ("market-malay", -200),
                ("old-javanese", 800),
                ("old-javanese", 1520),
                ("modern-javanese", 1600),
            ]
        );
    }

    #[test]
    fn test_rows_follow_first_appearance() {
        let h = region_history(&atlas(), "java", 1000);
        let rows: Vec<usize> = h.segments.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 2, 3]);
        assert_eq!(h.row_count, 4);
    }

    #[test]
    fn test_active_flags_labels_and_colors() {
        let atlas = atlas();
        let h = region_history(&atlas, "java", 1000);
        let active: Vec<&str> = h
            .segments
            .iter()
            .filter(|s| s.active)
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(active, vec!["market-malay", "Old Javanese"]);
        let old = &h.segments[2];
        assert_eq!(old.color, atlas.color_for("old-javanese", 1000, Emphasis::Opacity(1.0)).to_string());
        assert!(old.color.ends_with(", 1)"));
    }

    #[test]
    fn test_axis_placement() {
        let h = region_history(&atlas(), "java", 1000);
        let proto = &h.segments[0];
        assert_eq!(proto.left_percent, 0.0);
        let short = &h.segments[3];
        assert_eq!(short.width_percent, MIN_WIDTH_PERCENT);
        let open = &h.segments[4];
        let expected = f64::from(MAX_YEAR - 1600) / f64::from(MAX_YEAR - MIN_YEAR) * 100.0;
        assert_eq!(open.width_percent, expected);
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let mut tl = RegionTimeline::default();
        tl.regions.insert(
            "bali".into(),
            vec![
                OccupancyInterval::new("far-future", i32::MAX - 1, None),
                OccupancyInterval::new("deep-past", -5000, Some(i32::MAX)),
            ],
        );
        let atlas = Atlas::from_datasets(tl, LanguageDefinitions::default());
        let h = region_history(&atlas, "bali", 0);
        assert_eq!(h.segments.len(), 2);

        let past = &h.segments[0];
        assert_eq!(past.language_id, "deep-past");
        assert!(past.active);
        assert_eq!(past.left_percent, 0.0);
        assert!(past.width_percent > 100.0 && past.width_percent.is_finite());

        let future = &h.segments[1];
        assert!(!future.active);
        assert!(future.left_percent > 100.0 && future.left_percent.is_finite());
        assert_eq!(future.width_percent, MIN_WIDTH_PERCENT);
    }

    #[test]
    fn test_unknown_region_shows_global_only() {
        let h = region_history(&atlas(), "papua", 0);
        assert_eq!(h.segments.len(), 1);
        assert_eq!(h.segments[0].language_id, "market-malay");
        assert!(region_history(&Atlas::default(), "papua", 0).segments.is_empty());
    }

    #[test]
    fn test_ticks() {
        let ticks = axis_ticks();
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("2000 BC"));
        assert_eq!(ticks.last().map(|t| t.year), Some(2000));
        assert_eq!(ticks.len(), 9);
    }
}
