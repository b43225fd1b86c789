// ─── Mod Installer Core ───
// Backend for copying mod jars into a Minecraft installation and fetching
// them from Modrinth.
//
// Architecture:
//   core/
//     config/     — Settings record + JSON store beside the executable
//     installer/  — Mods-folder creation and local jar copies
//     modrinth/   — Search, version listing, download-target selection
//     downloader/ — Streaming, SHA-1 validated file downloads
//     workflow    — One function per user action

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod installer;
pub mod modrinth;
pub mod workflow;
