// ─── Settings Store ───
// Persists the user's install path, loader and game version as a flat
// JSON object next to the executable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{InstallerError, InstallerResult};

const CONFIG_FILE: &str = "config.json";

/// User settings. Unknown keys are ignored and missing keys default to
/// empty strings, so older or hand-edited files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the Minecraft installation (the folder holding `mods/`).
    pub minecraft_path: String,
    /// Preferred mod loader, e.g. `fabric`.
    pub modloader: String,
    /// Preferred game version, e.g. `1.20.1`.
    pub version: String,
}

impl Settings {
    /// The configured install path, falling back to the platform default
    /// `.minecraft` directory when none has been saved yet.
    pub fn resolved_install_path(&self) -> PathBuf {
        let trimmed = self.minecraft_path.trim();
        if trimmed.is_empty() {
            default_minecraft_dir()
        } else {
            PathBuf::from(trimmed)
        }
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `config.json` beside the running executable.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted settings. Never fails: a missing or corrupt file
    /// yields the default record.
    pub fn load(&self) -> Settings {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No settings loaded from {:?}: {}", self.path, e);
                return Settings::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Corrupt settings file {:?}: {}", self.path, e);
                Settings::default()
            }
        }
    }

    /// Overwrite the persisted settings wholesale.
    pub fn save(&self, settings: &Settings) -> InstallerResult<()> {
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json).map_err(|e| InstallerError::io(&self.path, e))?;
        debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

/// Where the vanilla launcher keeps its game directory on this platform.
pub fn default_minecraft_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("minecraft")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    }
}
