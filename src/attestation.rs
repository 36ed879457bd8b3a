//! First attestation: the earliest start year a language has anywhere in
//! the region timeline.

use std::collections::BTreeMap;
use std::sync::Arc;

use lang_types::RegionTimeline;
use tracing::debug;

/// Language id → earliest `start_year` across every region bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstAttestation {
    years: BTreeMap<String, i32>,
}

impl FirstAttestation {
    pub fn from_timeline(timeline: Option<&RegionTimeline>) -> Self {
        let mut years: BTreeMap<String, i32> = BTreeMap::new();
        for (_, iv) in timeline.into_iter().flat_map(RegionTimeline::all_intervals) {
            years
                .entry(iv.language_id.clone())
                .and_modify(|y| *y = (*y).min(iv.start_year))
                .or_insert(iv.start_year);
        }
        Self { years }
    }

    pub fn get(&self, language_id: &str) -> Option<i32> {
        self.years.get(language_id).copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Memoizes [`FirstAttestation`] on the identity of the timeline `Arc`.
///
/// Holding the source `Arc` keeps its address from being reused, so a
/// pointer match always means the same dataset.
///
/// The CLI loads one snapshot per run, so there the cache computes once
/// and never hits. Reuse pays off for a long-lived caller that rebuilds
/// [`Atlas`](crate::atlas::Atlas) views over a timeline it keeps.
#[derive(Debug, Default)]
pub struct AttestationCache {
    source: Option<Arc<RegionTimeline>>,
    cached: Arc<FirstAttestation>,
}

impl AttestationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, timeline: Option<&Arc<RegionTimeline>>) -> Arc<FirstAttestation> {
        let hit = match (&self.source, timeline) {
            (Some(held), Some(given)) => Arc::ptr_eq(held, given),
            (None, None) => true,
            _ => false,
        };
        if !hit {
            let computed = FirstAttestation::from_timeline(timeline.map(Arc::as_ref));
            debug!(languages = computed.len(), "recomputed first attestation");
            self.source = timeline.cloned();
            self.cached = Arc::new(computed);
        }
        Arc::clone(&self.cached)
    }
}
