//! Ancestors, descendants and timeline appearances of one language.

use lang_types::{LanguageDefinitions, OccupancyInterval, RegionTimeline};
use serde::Serialize;

/// A named relative. `id` is set when the name leads to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl LanguageLink {
    pub fn is_navigable(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lineage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<LanguageLink>,
    pub children: Vec<LanguageLink>,
}

/// Resolve a parent/child reference, trying it as an id before a name.
pub fn link(definitions: &LanguageDefinitions, reference: &str) -> LanguageLink {
    if let Some(def) = definitions.get(reference) {
        let name = if def.name.is_empty() {
            reference.to_string()
        } else {
            def.name.clone()
        };
        return LanguageLink {
            name,
            id: Some(reference.to_string()),
        };
    }
    LanguageLink {
        name: reference.to_string(),
        id: definitions
            .find_by_name(reference)
            .map(|(id, _)| id.to_string()),
    }
}

/// Parent and children of `language_id`; `None` if it has no definition.
pub fn lineage(definitions: &LanguageDefinitions, language_id: &str) -> Option<Lineage> {
    let def = definitions.get(language_id)?;
    Some(Lineage {
        parent: def.parent.as_deref().map(|p| link(definitions, p)),
        children: def.children.iter().map(|c| link(definitions, c)).collect(),
    })
}

/// Every interval mentioning `language_id`, by region key then start year.
pub fn appearances<'a>(
    timeline: Option<&'a RegionTimeline>,
    language_id: &str,
) -> Vec<(&'a str, &'a OccupancyInterval)> {
    let mut found: Vec<(&str, &OccupancyInterval)> = timeline
        .into_iter()
        .flat_map(RegionTimeline::all_intervals)
        .filter(|(_, iv)| iv.language_id == language_id)
        .collect();
    found.sort_by_key(|(region, iv)| (*region, iv.start_year));
    found
}
