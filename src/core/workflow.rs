// ─── Install Workflow ───
// Glue between user actions and the installer / registry components.
// Each function is one user action, run to completion.

use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::installer;
use crate::core::modrinth::{select_download_target, ModRegistry};

/// Loader used to pick a download when none is requested explicitly.
pub const DEFAULT_TARGET_LOADER: &str = "forge";

/// Outcome of a local install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInstallReport {
    pub mods_dir: PathBuf,
    pub selected: usize,
    pub staged: usize,
}

impl LocalInstallReport {
    pub fn total(&self) -> usize {
        self.selected + self.staged
    }
}

/// Outcome of a registry download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredMod {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Copy the chosen jars, then everything in `staging_dir`, into the
/// installation's mods folder.
pub async fn install_local<P: AsRef<Path>>(
    install_path: &Path,
    files: &[P],
    staging_dir: &Path,
) -> InstallerResult<LocalInstallReport> {
    installer::validate_install_path(install_path)?;
    let mods_dir = installer::ensure_mods_dir(install_path).await?;

    let selected = installer::install_selected(files, &mods_dir).await?;
    let staged = installer::install_from_staging(staging_dir, &mods_dir).await?;

    Ok(LocalInstallReport {
        mods_dir,
        selected,
        staged,
    })
}

/// Resolve which loader to download for. An explicit choice wins; otherwise
/// the historical default applies, with a warning if it disagrees with the
/// loader the user configured.
pub fn target_loader(explicit: Option<&str>, configured: &str) -> String {
    if let Some(loader) = explicit.map(str::trim).filter(|l| !l.is_empty()) {
        return loader.to_string();
    }

    let configured = configured.trim();
    if !configured.is_empty() && !configured.eq_ignore_ascii_case(DEFAULT_TARGET_LOADER) {
        warn!(
            "Downloading {} builds although the configured loader is '{}'; pass --loader to override",
            DEFAULT_TARGET_LOADER, configured
        );
    }
    DEFAULT_TARGET_LOADER.to_string()
}

/// Download the first build of `project_id` for `loader` into the mods
/// folder of `install_path`.
pub async fn acquire_mod<R: ModRegistry + ?Sized>(
    registry: &R,
    install_path: &Path,
    project_id: &str,
    loader: &str,
) -> InstallerResult<AcquiredMod> {
    installer::validate_install_path(install_path)?;

    let versions = registry.list_versions(project_id).await?;
    let target = select_download_target(&versions, loader).ok_or_else(|| {
        InstallerError::NoCompatibleVersion {
            project_id: project_id.to_string(),
            loader: loader.to_string(),
        }
    })?;

    if !is_plain_file_name(&target.filename) {
        return Err(InstallerError::UnsafeFileName(target.filename));
    }

    let mods_dir = installer::ensure_mods_dir(install_path).await?;
    let path = mods_dir.join(&target.filename);
    let bytes = registry.download(&target, &path).await?;

    info!("{} installed successfully ({} bytes)", target.filename, bytes);
    Ok(AcquiredMod {
        filename: target.filename,
        path,
        bytes,
    })
}

// A single normal path component, so the download lands inside the mods
// folder.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::tempdir;

    use super::*;
    use crate::core::modrinth::{DownloadTarget, ModSummary, ModVersion};

    struct FakeRegistry {
        versions: Vec<ModVersion>,
        downloads: Mutex<Vec<String>>,
    }

    impl FakeRegistry {
        fn new(json: &str) -> Self {
            Self {
                versions: serde_json::from_str(json).unwrap(),
                downloads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModRegistry for FakeRegistry {
        async fn search(
            &self,
            _query: &str,
            _loader: Option<&str>,
            _version: Option<&str>,
        ) -> InstallerResult<Vec<ModSummary>> {
            Ok(Vec::new())
        }

        async fn list_versions(&self, _project_id: &str) -> InstallerResult<Vec<ModVersion>> {
            Ok(self.versions.clone())
        }

        async fn download(
            &self,
            target: &DownloadTarget,
            destination: &Path,
        ) -> InstallerResult<u64> {
            self.downloads.lock().unwrap().push(target.url.clone());
            std::fs::write(destination, target.url.as_bytes()).unwrap();
            Ok(target.url.len() as u64)
        }
    }

    const LISTING: &str = r#"[
        {"loaders":["fabric"],"files":[{"url":"fab","filename":"fab.jar"}]},
        {"loaders":["forge"],"files":[{"url":"u","filename":"f.jar"}]}
    ]"#;

    #[tokio::test]
    async fn acquire_downloads_matching_build_into_mods_dir() {
        let game = tempdir().unwrap();
        let registry = FakeRegistry::new(LISTING);

        let acquired = acquire_mod(&registry, game.path(), "p", "forge")
            .await
            .unwrap();

        assert_eq!(acquired.filename, "f.jar");
        assert_eq!(acquired.path, game.path().join("mods").join("f.jar"));
        assert_eq!(std::fs::read_to_string(&acquired.path).unwrap(), "u");
        assert_eq!(*registry.downloads.lock().unwrap(), vec!["u".to_string()]);
    }

    #[tokio::test]
    async fn acquire_without_compatible_version_downloads_nothing() {
        let game = tempdir().unwrap();
        let registry = FakeRegistry::new(LISTING);

        let err = acquire_mod(&registry, game.path(), "p", "quilt")
            .await
            .unwrap_err();

        assert!(matches!(err, InstallerError::NoCompatibleVersion { .. }));
        assert!(registry.downloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn acquire_rejects_invalid_install_path() {
        let game = tempdir().unwrap();
        let registry = FakeRegistry::new(LISTING);

        let err = acquire_mod(&registry, &game.path().join("missing"), "p", "forge")
            .await
            .unwrap_err();

        assert!(matches!(err, InstallerError::InvalidInstallPath(_)));
    }

    #[tokio::test]
    async fn install_local_reports_selected_and_staged_counts() {
        let game = tempdir().unwrap();
        let src = tempdir().unwrap();
        let staging = tempdir().unwrap();
        let picked = src.path().join("picked.jar");
        std::fs::write(&picked, "p").unwrap();
        std::fs::write(staging.path().join("a.jar"), "a").unwrap();
        std::fs::write(staging.path().join("b.jar"), "b").unwrap();

        let report = install_local(game.path(), &[picked], staging.path())
            .await
            .unwrap();

        assert_eq!(report.selected, 1);
        assert_eq!(report.staged, 2);
        assert_eq!(report.total(), 3);
        assert!(report.mods_dir.join("b.jar").exists());
    }

    #[tokio::test]
    async fn acquire_refuses_file_names_that_escape_mods_dir() {
        for name in ["../escaped.jar", "nested/inner.jar", "/abs.jar", ".."] {
            let root = tempdir().unwrap();
            let game = root.path().join("inst");
            std::fs::create_dir(&game).unwrap();
            let listing = serde_json::json!([
                {"loaders": ["forge"], "files": [{"url": "u", "filename": name}]}
            ]);
            let registry = FakeRegistry::new(&listing.to_string());

            let err = acquire_mod(&registry, &game, "p", "forge")
                .await
                .unwrap_err();

            assert!(
                matches!(err, InstallerError::UnsafeFileName(_)),
                "{name} accepted"
            );
            assert!(registry.downloads.lock().unwrap().is_empty());
            assert!(!root.path().join("escaped.jar").exists());
        }
    }

    #[test]
    fn plain_file_names_are_accepted() {
        assert!(is_plain_file_name("sodium-fabric-0.5.3+mc1.20.1.jar"));
        assert!(!is_plain_file_name("."));
        assert!(!is_plain_file_name(""));
    }

    #[test]
    fn target_loader_prefers_explicit_choice() {
        assert_eq!(target_loader(Some("fabric"), "forge"), "fabric");
        assert_eq!(target_loader(Some("  "), "fabric"), DEFAULT_TARGET_LOADER);
        assert_eq!(target_loader(None, ""), DEFAULT_TARGET_LOADER);
    }
}
