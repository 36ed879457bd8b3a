//! Locating and reading the two JSON datasets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lang_types::{LanguageDefinitions, RegionTimeline};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::atlas::Atlas;
use crate::attestation::AttestationCache;
use crate::error::LoadError;

pub const TIMELINE_FILE: &str = "regionTimeline.json";
const DEFINITIONS_PREFIX: &str = "languageDefinitions";
const UPDATED_SUFFIX: &str = "_updated";

/// Environment variable naming the data directory.
pub const DATA_ENV: &str = "BAHASEJARAH_DATA";

/// Dataset files found under a data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFiles {
    pub timeline: Option<PathBuf>,
    pub definitions: Option<PathBuf>,
}

/// Pick the data directory: explicit flag, then `BAHASEJARAH_DATA`, then
/// `./data`, then `./src/data`, then the working directory.
pub fn data_root(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Ok(dir) = std::env::var(DATA_ENV) {
        return PathBuf::from(dir);
    }
    ["data", "src/data"]
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Walk `root` for `regionTimeline.json` and `languageDefinitions*.json`.
///
/// Among several definition files the `_updated` one wins, otherwise the
/// first in file-name order.
pub fn discover(root: &Path) -> DataFiles {
    let mut files = DataFiles::default();
    let mut candidates: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

        if name == TIMELINE_FILE && files.timeline.is_none() {
            files.timeline = Some(path.to_path_buf());
        } else if stem.starts_with(DEFINITIONS_PREFIX) {
            candidates.push(path.to_path_buf());
        }
    }

    files.definitions = candidates
        .iter()
        .find(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.ends_with(UPDATED_SUFFIX))
        })
        .or_else(|| candidates.first())
        .cloned();
    files
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a dataset, turning every failure into `None` so queries fall back
/// to their empty results.
pub fn load_or_empty<T: DeserializeOwned>(path: Option<&Path>, what: &'static str) -> Option<T> {
    let result = match path {
        Some(path) => read_json(path),
        None => Err(LoadError::NotFound(what)),
    };
    match result {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("{e}; continuing without {what}");
            None
        }
    }
}

/// Load both datasets under `root` into an [`Atlas`].
pub fn load_atlas(root: &Path, cache: &mut AttestationCache) -> Atlas {
    let files = discover(root);

    let timeline: Option<RegionTimeline> = load_or_empty(files.timeline.as_deref(), TIMELINE_FILE);
    if let (Some(tl), Some(path)) = (&timeline, &files.timeline) {
        info!(
            path = %path.display(),
            regions = tl.regions.len(),
            intervals = tl.all_intervals().count(),
            "loaded region timeline"
        );
        if tl.skipped > 0 {
            warn!(
                path = %path.display(),
                skipped = tl.skipped,
                "dropped malformed regions or intervals"
            );
        }
    }

    let definitions: Option<LanguageDefinitions> =
        load_or_empty(files.definitions.as_deref(), "languageDefinitions.json");
    if let (Some(defs), Some(path)) = (&definitions, &files.definitions) {
        info!(
            path = %path.display(),
            languages = defs.languages.len(),
            "loaded language definitions"
        );
    }

    Atlas::new(timeline.map(Arc::new), definitions.map(Arc::new), cache)
}
