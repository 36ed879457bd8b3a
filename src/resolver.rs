//! Which languages occupy a region at a given year.
//!
//! The lookup chain is: the region's own intervals together with the
//! global `"all"` bucket, then (only if that yields nothing) a single
//! retry against the `"archipelago"` bucket.

use lang_types::{ARCHIPELAGO_REGION, GLOBAL_REGION, OccupancyInterval, RegionTimeline};
use serde::Serialize;
use tracing::debug;

/// Intervals active under `region` at `year`: global entries first, then
/// the region's own, in dataset order. No deduplication, no fallback.
pub fn active_intervals<'a>(
    timeline: Option<&'a RegionTimeline>,
    region: &str,
    year: i32,
) -> Vec<&'a OccupancyInterval> {
    let Some(timeline) = timeline else {
        return Vec::new();
    };
    let regional = timeline.region(region);
    let global: &[OccupancyInterval] = if region == GLOBAL_REGION {
        &[]
    } else {
        timeline.region(GLOBAL_REGION)
    };
    global
        .iter()
        .chain(regional)
        .filter(|iv| iv.is_active_at(year))
        .collect()
}

/// The bucket that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The requested region (including global entries).
    Region,
    /// The archipelago fallback.
    Archipelago,
    /// Nothing active anywhere in the chain.
    Empty,
}

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSet<'a> {
    pub tier: Tier,
    pub intervals: Vec<&'a OccupancyInterval>,
}

impl<'a> ActiveSet<'a> {
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The interval shown when only one color fits: latest start year,
    /// ties going to the later entry in resolution order.
    pub fn dominant(&self) -> Option<&'a OccupancyInterval> {
        // max_by_key keeps the last of equal keys
        self.intervals.iter().copied().max_by_key(|iv| iv.start_year)
    }

    /// Distinct language ids in resolution order.
    pub fn language_ids(&self) -> Vec<&'a str> {
        let mut ids: Vec<&'a str> = Vec::new();
        for iv in &self.intervals {
            if !ids.contains(&iv.language_id.as_str()) {
                ids.push(iv.language_id.as_str());
            }
        }
        ids
    }

    pub fn contains_language(&self, language_id: &str) -> bool {
        self.intervals.iter().any(|iv| iv.language_id == language_id)
    }
}

/// Full resolution chain for one region at one year.
pub fn resolve<'a>(timeline: Option<&'a RegionTimeline>, region: &str, year: i32) -> ActiveSet<'a> {
    let intervals = active_intervals(timeline, region, year);
    if !intervals.is_empty() {
        return ActiveSet {
            tier: Tier::Region,
            intervals,
        };
    }
    if region == ARCHIPELAGO_REGION {
        return ActiveSet {
            tier: Tier::Empty,
            intervals,
        };
    }

    debug!(region, year, "nothing active, falling back to archipelago");
    let intervals = active_intervals(timeline, ARCHIPELAGO_REGION, year);
    let tier = if intervals.is_empty() {
        Tier::Empty
    } else {
        Tier::Archipelago
    };
    ActiveSet { tier, intervals }
}
