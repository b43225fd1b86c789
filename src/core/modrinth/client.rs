use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use super::model::{build_facets, DownloadTarget, ModSummary, ModVersion, SearchResponse};
use super::registry::ModRegistry;
use crate::core::downloader::Downloader;
use crate::core::error::{InstallerError, InstallerResult};

pub const MODRINTH_API_BASE: &str = "https://api.modrinth.com";

/// Stateless client for the public Modrinth v2 API.
pub struct ModrinthClient {
    client: Client,
    base_url: String,
    downloader: Downloader,
}

impl ModrinthClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, MODRINTH_API_BASE)
    }

    /// Point the client at another registry root (mirrors, tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            downloader: Downloader::new(client.clone()),
            client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ModRegistry for ModrinthClient {
    async fn search(
        &self,
        query: &str,
        loader: Option<&str>,
        version: Option<&str>,
    ) -> InstallerResult<Vec<ModSummary>> {
        let url = format!("{}/v2/search", self.base_url);
        let facets = build_facets(loader, version);
        info!("Searching Modrinth for '{}' (facets {})", query, facets);

        let resp = self
            .client
            .get(&url)
            .query(&[("query", query), ("facets", facets.as_str())])
            .send()
            .await?;

        // A rejected search reads as "no results" rather than an error.
        if !resp.status().is_success() {
            warn!("Modrinth search returned {} for '{}'", resp.status(), query);
            return Ok(Vec::new());
        }

        let body: SearchResponse = resp.json().await?;
        info!("Search returned {} hit(s)", body.hits.len());
        Ok(body.hits)
    }

    async fn list_versions(&self, project_id: &str) -> InstallerResult<Vec<ModVersion>> {
        let url = format!("{}/v2/project/{}/version", self.base_url, project_id);

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(InstallerError::RemoteStatus {
                url,
                status: resp.status().as_u16(),
            });
        }

        let versions: Vec<ModVersion> = resp.json().await?;
        info!("Project {} has {} version(s)", project_id, versions.len());
        Ok(versions)
    }

    async fn download(&self, target: &DownloadTarget, destination: &Path) -> InstallerResult<u64> {
        self.downloader
            .download_file(&target.url, destination, target.sha1.as_deref())
            .await
    }
}
