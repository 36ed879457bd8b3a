//! Color derivation for a language at a point in time.
//!
//! Three channels carry meaning:
//!   hue        ← language family (branch)
//!   saturation ← years since first attestation, 40% .. 90% over 2000 years
//!   alpha      ← emphasis chosen by the caller
//! Lightness is pinned at 60% so both map themes stay legible.

use std::fmt;

use lang_types::LanguageDefinitions;
use serde::Serialize;

use crate::attestation::FirstAttestation;

/// Ordered family → hue table. Substring fallback scans in this order,
/// so broader families listed first win for compound labels.
pub static BRANCH_HUES: &[(&str, u16)] = &[
    // Austronesian core
    ("Austronesian", 180),
    ("Malayo-Polynesian", 180),
    // Major western branches
    ("Malayic", 160),
    ("Javanese", 200),
    ("Sundanese", 220),
    ("Madurese", 210),
    // Sulawesi
    ("South Sulawesi", 280),
    ("Minahasan", 300),
    ("Gorontalic", 290),
    ("Kaili-Pamona", 270),
    // Eastern
    ("Central-Eastern Malayo-Polynesian", 30),
    ("Central Maluku", 40),
    ("Timoric", 25),
    // Papuan
    ("Papuan", 0),
    ("West Papuan", 10),
    // Others
    ("Lampungic", 140),
    ("West Barito", 120),
    ("Indo-European", 60),
];

pub const MAX_AGE_YEARS: i64 = 2000;
pub const MIN_SATURATION: f64 = 40.0;
pub const MAX_SATURATION: f64 = 90.0;
pub const LIGHTNESS: f64 = 60.0;

pub const OVERLAY_ALPHA: f64 = 0.2;
pub const SELECTED_ALPHA: f64 = 0.8;

/// Fill for regions with nothing to show.
pub const NEUTRAL_FILL: &str = "#334155";

/// How strongly a color should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Emphasis {
    /// Many languages may overlap; nothing is focused.
    #[default]
    Overlay,
    /// The user focused this language.
    Selected,
    /// Explicit alpha, clamped to 0..=1.
    Opacity(f64),
}

impl Emphasis {
    pub fn alpha(self) -> f64 {
        match self {
            Self::Overlay => OVERLAY_ALPHA,
            Self::Selected => SELECTED_ALPHA,
            Self::Opacity(a) if a.is_nan() => OVERLAY_ALPHA,
            Self::Opacity(a) => a.clamp(0.0, 1.0),
        }
    }
}

/// A color in the HSL model with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsla {
    pub hue: u16,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    /// Neutral grey used for languages of unknown family.
    pub fn unknown(alpha: f64) -> Self {
        Self {
            hue: 0,
            saturation: 0.0,
            lightness: 50.0,
            alpha,
        }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Hue for a branch label: exact key, else the first key contained in the
/// label. `None` for an unrecognised family.
pub fn branch_hue(branch: &str) -> Option<u16> {
    if branch.is_empty() {
        return None;
    }
    BRANCH_HUES
        .iter()
        .find(|(key, _)| *key == branch)
        .or_else(|| BRANCH_HUES.iter().find(|(key, _)| branch.contains(key)))
        .map(|(_, hue)| *hue)
}

/// Saturation for a language that has been attested for `age` years.
pub fn saturation_for_age(age: i64) -> f64 {
    let ratio = age.clamp(0, MAX_AGE_YEARS) as f64 / MAX_AGE_YEARS as f64;
    MIN_SATURATION + ratio * (MAX_SATURATION - MIN_SATURATION)
}

/// Derive the color of `language_id` at `year`.
///
/// A language missing from `first_seen` is treated as just emerged. A
/// missing definition or unknown family yields [`Hsla::unknown`].
pub fn color_for(
    language_id: &str,
    year: i32,
    definitions: Option<&LanguageDefinitions>,
    first_seen: &FirstAttestation,
    emphasis: Emphasis,
) -> Hsla {
    let alpha = emphasis.alpha();
    let hue = definitions
        .and_then(|defs| defs.get(language_id))
        .and_then(|def| branch_hue(&def.branch));
    let Some(hue) = hue else {
        return Hsla::unknown(alpha);
    };

    let age = first_seen
        .get(language_id)
        .map_or(0, |first| i64::from(year) - i64::from(first));

    Hsla {
        hue,
        saturation: saturation_for_age(age),
        lightness: LIGHTNESS,
        alpha,
    }
}
