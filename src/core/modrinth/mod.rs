pub mod client;
pub mod model;
pub mod registry;

pub use client::{ModrinthClient, MODRINTH_API_BASE};
pub use model::{
    build_facets, select_download_target, DownloadTarget, ModSummary, ModVersion, VersionFile,
};
pub use registry::ModRegistry;
