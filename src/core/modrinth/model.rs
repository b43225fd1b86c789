// ─── Modrinth API Models ───
// Response shapes for the search and project-version endpoints, plus the
// logic that picks which file to download.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response of `GET /v2/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<ModSummary>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct ModSummary {
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub downloads: Option<u64>,
}

/// One published version of a project.
#[derive(Debug, Clone, Deserialize)]
pub struct ModVersion {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version_number: Option<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub date_published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionFile {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub hashes: FileHashes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileHashes {
    #[serde(default)]
    pub sha1: Option<String>,
}

/// The file chosen for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub filename: String,
    pub sha1: Option<String>,
}

impl From<&VersionFile> for DownloadTarget {
    fn from(file: &VersionFile) -> Self {
        Self {
            url: file.url.clone(),
            filename: file.filename.clone(),
            sha1: file.hashes.sha1.clone(),
        }
    }
}

/// Build the `facets` query value: every non-empty filter becomes its own
/// AND group, e.g. `[["categories:fabric"],["versions:1.20.1"]]`.
///
/// The loader is lower-cased because Modrinth categories are.
pub fn build_facets(loader: Option<&str>, version: Option<&str>) -> String {
    let mut facets: Vec<Vec<String>> = Vec::new();

    if let Some(loader) = loader.map(str::trim).filter(|l| !l.is_empty()) {
        facets.push(vec![format!("categories:{}", loader.to_lowercase())]);
    }
    if let Some(version) = version.map(str::trim).filter(|v| !v.is_empty()) {
        facets.push(vec![format!("versions:{}", version)]);
    }

    serde_json::to_string(&facets).unwrap_or_else(|_| "[]".into())
}

/// First file of the first version (in listed order) whose loaders contain
/// `loader`. The match is case-sensitive.
pub fn select_download_target(versions: &[ModVersion], loader: &str) -> Option<DownloadTarget> {
    versions
        .iter()
        .filter(|v| v.loaders.iter().any(|l| l == loader))
        .find_map(|v| v.files.first())
        .map(DownloadTarget::from)
}
