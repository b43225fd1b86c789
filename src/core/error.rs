use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the installer backend.
/// Every module returns `Result<T, InstallerError>`.
#[derive(Debug, Error)]
pub enum InstallerError {
    // ── Validation ──────────────────────────────────────
    #[error("Invalid Minecraft folder: {0}")]
    InvalidInstallPath(String),

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed: HTTP {status}")]
    RemoteStatus { url: String, status: u16 },

    #[error("No compatible version of {project_id} found for loader '{loader}'")]
    NoCompatibleVersion { project_id: String, loader: String },

    #[error("Registry file name {0:?} is not a plain file name")]
    UnsafeFileName(String),

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-1 mismatch for {path:?}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse category a failure is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user must correct their input.
    Validation,
    /// Registry or network failure.
    Remote,
    /// Local filesystem failure.
    Io,
}

impl ErrorKind {
    /// Process exit code used by the CLI.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Validation => 2,
            ErrorKind::Remote => 3,
            ErrorKind::Io => 4,
        }
    }
}

impl InstallerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InstallerError::InvalidInstallPath(_) => ErrorKind::Validation,
            InstallerError::Io { .. } => ErrorKind::Io,
            InstallerError::Http(_)
            | InstallerError::RemoteStatus { .. }
            | InstallerError::NoCompatibleVersion { .. }
            | InstallerError::UnsafeFileName(_)
            | InstallerError::Sha1Mismatch { .. }
            | InstallerError::Json(_) => ErrorKind::Remote,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type InstallerResult<T> = Result<T, InstallerError>;
