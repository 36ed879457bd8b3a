//! Consistency checks between the map, the timeline and the definitions.

use std::fmt;

use lang_types::{ARCHIPELAGO_REGION, GLOBAL_REGION};
use serde::Serialize;

use crate::atlas::Atlas;
use crate::lineage;
use crate::regions::mapped_regions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "WARN",
            Severity::Error => "FAIL",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub findings: Vec<Finding>,
}

impl AuditReport {
    fn push(&mut self, severity: Severity, message: String) {
        self.findings.push(Finding { severity, message });
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn passed(&self) -> bool {
        self.errors() == 0
    }
}

/// Run every check against `atlas`.
pub fn audit(atlas: &Atlas) -> AuditReport {
    let mut report = AuditReport::default();

    let Some(timeline) = atlas.timeline() else {
        report.push(Severity::Error, "no region timeline loaded".to_string());
        return report;
    };

    // Map regions with nothing to read from
    let has_shared = [GLOBAL_REGION, ARCHIPELAGO_REGION]
        .iter()
        .any(|key| !timeline.region(key).is_empty());
    for region in mapped_regions() {
        if timeline.region(region).is_empty() && !has_shared {
            report.push(
                Severity::Error,
                format!("mapped region '{region}' has no timeline data"),
            );
        }
    }

    for (region, iv) in timeline.all_intervals() {
        if iv.end_year.is_some_and(|end| end <= iv.start_year) {
            report.push(
                Severity::Error,
                format!(
                    "'{region}': {} ends ({}) at or before it starts ({})",
                    iv.language_id,
                    iv.end_year.unwrap_or_default(),
                    iv.start_year
                ),
            );
        }
        if atlas.definition(&iv.language_id).is_none() {
            report.push(
                Severity::Warning,
                format!("'{region}': language '{}' has no definition", iv.language_id),
            );
        }
    }

    let Some(definitions) = atlas.languages() else {
        report.push(Severity::Error, "no language definitions loaded".to_string());
        return report;
    };

    for (id, def) in &definitions.languages {
        if let Some(lineage) = lineage::lineage(definitions, id) {
            for link in lineage.parent.iter().chain(&lineage.children) {
                if !link.is_navigable() {
                    report.push(
                        Severity::Warning,
                        format!("'{id}': relative '{}' has no definition", link.name),
                    );
                }
            }
        }
        if def.wiki_url.as_deref().is_none_or(str::is_empty) {
            report.push(Severity::Warning, format!("'{id}': missing wikiUrl"));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use lang_types::{LanguageDefinition, LanguageDefinitions, OccupancyInterval, RegionTimeline};

    use super::*;

    fn definition(parent: Option<&str>, wiki: Option<&str>) -> LanguageDefinition {
        LanguageDefinition {
            name: "Old Balinese".into(),
            parent: parent.map(str::to_string),
            wiki_url: wiki.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_uncovered_map_regions_fail() {
        let mut tl = RegionTimeline::default();
        tl.regions
            .insert("bali".into(), vec![OccupancyInterval::new("old-balinese", 800, None)]);
        let mut defs = LanguageDefinitions::default();
        defs.languages
            .insert("old-balinese".into(), definition(None, Some("https://example.org")));

        let report = audit(&Atlas::from_datasets(tl, defs));
        assert!(!report.passed());
        assert!(report
            .findings
            .iter()
            .any(|f| f.message.contains("'west-java'")));
        assert!(!report.findings.iter().any(|f| f.message.contains("'bali' has")));
    }

    #[test]
    fn test_global_bucket_covers_map() {
        let mut tl = RegionTimeline::default();
        tl.regions
            .insert("all".into(), vec![OccupancyInterval::new("old-balinese", 800, None)]);
        let mut defs = LanguageDefinitions::default();
        defs.languages
            .insert("old-balinese".into(), definition(None, Some("https://example.org")));

        let report = audit(&Atlas::from_datasets(tl, defs));
        assert!(report.passed());
        assert_eq!(report.warnings(), 0);
    }

    #[test]
    fn test_interval_and_definition_findings() {
        let mut tl = RegionTimeline::default();
        tl.regions.insert(
            "all".into(),
            vec![
                OccupancyInterval::new("old-balinese", 1500, Some(800)),
                OccupancyInterval::new("ghost", 0, None),
            ],
        );
        let mut defs = LanguageDefinitions::default();
        defs.languages
            .insert("old-balinese".into(), definition(Some("Proto-Bali"), None));

        let report = audit(&Atlas::from_datasets(tl, defs));
        assert_eq!(report.errors(), 1);
        // undefined 'ghost', unknown parent, missing wikiUrl
        assert_eq!(report.warnings(), 3);
        assert_eq!(
            report.findings[0].to_string(),
            "[FAIL] 'all': old-balinese ends (800) at or before it starts (1500)"
        );
    }

    #[test]
    fn test_missing_datasets() {
        let report = audit(&Atlas::default());
        assert_eq!(report.errors(), 1);
    }
}
