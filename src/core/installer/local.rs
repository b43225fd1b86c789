use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::{InstallerError, InstallerResult};

/// File-name suffix of a mod archive.
pub const MOD_EXTENSION: &str = ".jar";

/// The install path must name an existing directory before anything is
/// copied into it.
pub fn validate_install_path(install_path: &Path) -> InstallerResult<()> {
    if install_path.as_os_str().is_empty() {
        return Err(InstallerError::InvalidInstallPath(
            "no Minecraft folder selected".into(),
        ));
    }
    if !install_path.is_dir() {
        return Err(InstallerError::InvalidInstallPath(format!(
            "{} is not a directory",
            install_path.display()
        )));
    }
    Ok(())
}

/// Return `<install_path>/mods`, creating it (and parents) if missing.
pub async fn ensure_mods_dir(install_path: &Path) -> InstallerResult<PathBuf> {
    let mods_dir = install_path.join("mods");
    tokio::fs::create_dir_all(&mods_dir)
        .await
        .map_err(|source| InstallerError::io(&mods_dir, source))?;
    Ok(mods_dir)
}

/// Copy every selected `.jar` into `mods_dir`. Other paths are skipped.
/// Returns how many files were copied.
pub async fn install_selected<P: AsRef<Path>>(
    files: &[P],
    mods_dir: &Path,
) -> InstallerResult<usize> {
    let mut copied = 0;
    for file in files {
        let file = file.as_ref();
        if !is_mod_archive(file) {
            debug!("Skipping non-mod file {:?}", file);
            continue;
        }
        if copy_into(file, mods_dir).await? {
            copied += 1;
        }
    }

    info!("Installed {} selected mod(s) into {:?}", copied, mods_dir);
    Ok(copied)
}

/// Copy every `.jar` sitting directly inside `staging_dir` into `mods_dir`.
/// A missing staging directory is not an error.
pub async fn install_from_staging(staging_dir: &Path, mods_dir: &Path) -> InstallerResult<usize> {
    if !staging_dir.is_dir() {
        debug!("No staging directory at {:?}", staging_dir);
        return Ok(0);
    }

    let mut entries = tokio::fs::read_dir(staging_dir)
        .await
        .map_err(|source| InstallerError::io(staging_dir, source))?;

    let mut copied = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| InstallerError::io(staging_dir, source))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|source| InstallerError::io(&path, source))?;
        if !file_type.is_file() || !is_mod_archive(&path) {
            continue;
        }
        if copy_into(&path, mods_dir).await? {
            copied += 1;
        }
    }

    info!(
        "Installed {} staged mod(s) from {:?} into {:?}",
        copied, staging_dir, mods_dir
    );
    Ok(copied)
}

fn is_mod_archive(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(MOD_EXTENSION))
        .unwrap_or(false)
}

// Copy, never move: the source stays where the user left it.
// Returns false when the source already is the destination file; copying a
// file onto itself truncates it.
async fn copy_into(source: &Path, mods_dir: &Path) -> InstallerResult<bool> {
    let Some(name) = source.file_name() else {
        return Ok(false);
    };
    let dest = mods_dir.join(name);

    if is_same_file(source, &dest).await {
        debug!("{:?} is already in {:?}", source, mods_dir);
        return Ok(false);
    }

    tokio::fs::copy(source, &dest)
        .await
        .map_err(|e| InstallerError::io(source, e))?;
    debug!("Copied {:?} -> {:?}", source, dest);
    Ok(true)
}

async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
