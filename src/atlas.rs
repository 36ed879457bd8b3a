//! Immutable bundle of the two datasets plus the derived attestation map.

use std::sync::Arc;

use lang_types::{LanguageDefinition, LanguageDefinitions, RegionTimeline};

use crate::attestation::{AttestationCache, FirstAttestation};
use crate::color::{self, Emphasis, Hsla};
use crate::resolver::{self, ActiveSet};

/// Snapshot of everything a query needs. Either dataset may be absent, in
/// which case queries return their empty defaults.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    timeline: Option<Arc<RegionTimeline>>,
    languages: Option<Arc<LanguageDefinitions>>,
    first_seen: Arc<FirstAttestation>,
}

impl Atlas {
    /// Build a snapshot, reusing the cached attestation map when
    /// `timeline` is the same dataset the cache last saw.
    pub fn new(
        timeline: Option<Arc<RegionTimeline>>,
        languages: Option<Arc<LanguageDefinitions>>,
        cache: &mut AttestationCache,
    ) -> Self {
        let first_seen = cache.get(timeline.as_ref());
        Self {
            timeline,
            languages,
            first_seen,
        }
    }

    pub fn from_datasets(timeline: RegionTimeline, languages: LanguageDefinitions) -> Self {
        Self::new(
            Some(Arc::new(timeline)),
            Some(Arc::new(languages)),
            &mut AttestationCache::new(),
        )
    }

    pub fn timeline(&self) -> Option<&RegionTimeline> {
        self.timeline.as_deref()
    }

    pub fn languages(&self) -> Option<&LanguageDefinitions> {
        self.languages.as_deref()
    }

    pub fn definition(&self, language_id: &str) -> Option<&LanguageDefinition> {
        self.languages().and_then(|defs| defs.get(language_id))
    }

    /// Display label: the definition's name, or the raw id.
    pub fn label<'a>(&'a self, language_id: &'a str) -> &'a str {
        match self.definition(language_id) {
            Some(def) if !def.name.is_empty() => &def.name,
            _ => language_id,
        }
    }

    pub fn first_seen(&self) -> &FirstAttestation {
        &self.first_seen
    }

    pub fn resolve(&self, region: &str, year: i32) -> ActiveSet<'_> {
        resolver::resolve(self.timeline(), region, year)
    }

    pub fn color_for(&self, language_id: &str, year: i32, emphasis: Emphasis) -> Hsla {
        color::color_for(
            language_id,
            year,
            self.languages(),
            &self.first_seen,
            emphasis,
        )
    }
}

#[cfg(test)]
mod tests {
    use lang_types::OccupancyInterval;

    use super::*;

    #[test]
    fn test_empty_atlas_degrades_quietly() {
        let atlas = Atlas::default();
        assert!(atlas.resolve("bali", 1000).is_empty());
        assert!(atlas.first_seen().is_empty());
        assert_eq!(atlas.label("sasak"), "sasak");
        assert_eq!(atlas.color_for("sasak", 1000, Emphasis::Overlay), Hsla::unknown(0.2));
    }

    #[test]
    fn test_snapshots_share_attestation_for_same_timeline() {
        let mut tl = RegionTimeline::default();
        tl.regions
            .insert("bali".into(), vec![OccupancyInterval::new("balinese", 1500, None)]);
        let tl = Arc::new(tl);
        let mut cache = AttestationCache::new();

        let a = Atlas::new(Some(Arc::clone(&tl)), None, &mut cache);
        let b = Atlas::new(Some(tl), None, &mut cache);
        assert!(std::ptr::eq(a.first_seen(), b.first_seen()));
        assert_eq!(b.first_seen().get("balinese"), Some(1500));
    }

    #[test]
    fn test_label_prefers_definition_name() {
        let mut defs = LanguageDefinitions::default();
        defs.languages.insert(
            "old-javanese".into(),
            LanguageDefinition {
                name: "Old Javanese".into(),
                ..Default::default()
            },
        );
        defs.languages.insert("unnamed".into(), LanguageDefinition::default());
        let atlas = Atlas::from_datasets(RegionTimeline::default(), defs);
        assert_eq!(atlas.label("old-javanese"), "Old Javanese");
        assert_eq!(atlas.label("unnamed"), "unnamed");
    }
}
