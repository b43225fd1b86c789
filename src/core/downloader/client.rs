use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use sha1::{Digest, Sha1};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::core::error::{InstallerError, InstallerResult};

/// Streams remote files to disk with optional SHA-1 validation.
///
/// The body is written to `<dest>.part` and renamed onto `dest` only once it
/// has been fully received and verified, so an interrupted download never
/// leaves a truncated jar in the mods folder.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` to `dest`, replacing any existing file.
    ///
    /// Returns the number of bytes written.
    pub async fn download_file(
        &self,
        url: &str,
        dest: &Path,
        sha1_expected: Option<&str>,
    ) -> InstallerResult<u64> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InstallerError::io(parent, e))?;
        }

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallerError::RemoteStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let part = part_path(dest);
        let written = match stream_to_file(response, &part, dest, sha1_expected).await {
            Ok(written) => written,
            Err(e) => {
                remove_partial(&part).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&part, dest).await {
            remove_partial(&part).await;
            return Err(InstallerError::io(dest, e));
        }

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, written);
        Ok(written)
    }
}

async fn stream_to_file(
    response: reqwest::Response,
    part: &Path,
    dest: &Path,
    sha1_expected: Option<&str>,
) -> InstallerResult<u64> {
    let mut hasher = Sha1::new();
    let mut written = 0u64;

    // File handle is dropped at the end of this block, before the rename.
    {
        let mut file = tokio::fs::File::create(part)
            .await
            .map_err(|e| InstallerError::io(part, e))?;

        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            hasher.update(&chunk);
            file.write_all(&chunk)
                .await
                .map_err(|e| InstallerError::io(part, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| InstallerError::io(part, e))?;
    }

    if let Some(expected) = sha1_expected {
        let actual = hex::encode(hasher.finalize());
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(InstallerError::Sha1Mismatch {
                path: dest.to_path_buf(),
                expected: expected.to_string(),
                actual,
            });
        }
    }

    Ok(written)
}

async fn remove_partial(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Could not remove partial download {:?}: {}", part, e);
        }
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
