use std::path::Path;

use async_trait::async_trait;

use super::model::{DownloadTarget, ModSummary, ModVersion};
use crate::core::error::InstallerResult;

/// A remote mod host the install workflow can query and download from.
#[async_trait]
pub trait ModRegistry: Send + Sync {
    /// Free-text search, optionally narrowed to a loader and game version.
    async fn search(
        &self,
        query: &str,
        loader: Option<&str>,
        version: Option<&str>,
    ) -> InstallerResult<Vec<ModSummary>>;

    /// Every published version of a project, newest first as the host lists them.
    async fn list_versions(&self, project_id: &str) -> InstallerResult<Vec<ModVersion>>;

    /// Fetch `target` to `destination`, replacing any file already there.
    /// Returns the number of bytes written.
    async fn download(&self, target: &DownloadTarget, destination: &Path) -> InstallerResult<u64>;
}
