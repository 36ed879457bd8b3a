//! Application state as a plain value, advanced by discrete actions.

use serde::Serialize;

use crate::atlas::Atlas;
use crate::year::{MIN_YEAR, clamp_to_slider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// A language shown in the hover panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoveredLanguage {
    pub id: String,
    pub name: String,
    pub period: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverInfo {
    pub region_id: String,
    pub region_name: String,
    pub languages: Vec<HoveredLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPanel {
    pub region_id: String,
    pub region_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub year: i32,
    pub hover: Option<HoverInfo>,
    pub selected_language: Option<String>,
    pub history: Option<HistoryPanel>,
    pub theme: Theme,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            year: MIN_YEAR,
            hover: None,
            selected_language: None,
            history: None,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetYear(i32),
    HoverRegion {
        region_id: String,
        region_name: String,
    },
    LeaveRegion,
    ClickRegion,
    SelectLanguage(String),
    ClearLanguage,
    CloseHistory,
    ToggleTheme,
}

/// Languages with a definition active in `region_id`, de-duplicated.
/// `None` when nothing displayable is active.
fn hover_info(
    atlas: &Atlas,
    region_id: &str,
    region_name: &str,
    year: i32,
) -> Option<HoverInfo> {
    let set = atlas.resolve(region_id, year);
    let languages: Vec<HoveredLanguage> = set
        .language_ids()
        .into_iter()
        .filter_map(|id| {
            let def = atlas.definition(id)?;
            Some(HoveredLanguage {
                id: id.to_string(),
                name: def.name.clone(),
                period: def.period.clone(),
                branch: def.branch.clone(),
            })
        })
        .collect();
    if languages.is_empty() {
        return None;
    }
    Some(HoverInfo {
        region_id: region_id.to_string(),
        region_name: region_name.to_string(),
        languages,
    })
}

impl AppState {
    /// Apply one action, returning the next state.
    pub fn reduce(self, atlas: &Atlas, action: Action) -> AppState {
        match action {
            Action::SetYear(year) => {
                let year = clamp_to_slider(year);
                // hover content depends on the year
                let hover = self.hover.as_ref().and_then(|h| {
                    hover_info(atlas, &h.region_id, &h.region_name, year)
                });
                AppState { year, hover, ..self }
            }
            Action::HoverRegion {
                region_id,
                region_name,
            } => AppState {
                hover: hover_info(atlas, &region_id, &region_name, self.year),
                ..self
            },
            Action::LeaveRegion => AppState { hover: None, ..self },
            Action::ClickRegion => {
                let history = match &self.hover {
                    Some(h) => Some(HistoryPanel {
                        region_id: h.region_id.clone(),
                        region_name: h.region_name.clone(),
                    }),
                    None => self.history.clone(),
                };
                AppState { history, ..self }
            }
            Action::SelectLanguage(id) => AppState {
                selected_language: Some(id),
                ..self
            },
            Action::ClearLanguage => AppState {
                selected_language: None,
                ..self
            },
            Action::CloseHistory => AppState {
                history: None,
                ..self
            },
            Action::ToggleTheme => AppState {
                theme: self.theme.toggled(),
                ..self
            },
        }
    }
}
