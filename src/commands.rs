use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::core::config::{ConfigStore, Settings};
use crate::core::error::InstallerResult;
use crate::core::http::build_http_client;
use crate::core::modrinth::{ModRegistry, ModSummary, ModVersion, ModrinthClient, MODRINTH_API_BASE};
use crate::core::workflow;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Parser)]
#[command(name = "mod-installer")]
#[command(about = "Install Minecraft mods from local jars or Modrinth", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to config.json beside the executable)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Registry API root
    #[arg(long, global = true, default_value = MODRINTH_API_BASE)]
    pub registry: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or change saved settings
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Copy .jar files into the mods folder
    Install(InstallArgs),
    /// Search mods on Modrinth
    Search(SearchArgs),
    /// List the published versions of a project
    Versions {
        /// Modrinth project id or slug
        project_id: String,
    },
    /// Download a mod from Modrinth into the mods folder
    Download(DownloadArgs),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the current settings
    Show,
    /// Update one or more settings
    Set {
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        loader: Option<String>,
        #[arg(long = "game-version")]
        game_version: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Jar files to copy; anything not ending in .jar is skipped
    pub files: Vec<PathBuf>,
    /// Minecraft folder (defaults to the saved one)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Folder whose jars are always copied as well
    #[arg(long, default_value = "mods")]
    pub staging: PathBuf,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub query: String,
    /// Loader filter (forge, fabric, neoforge, ...); defaults to the saved one
    #[arg(long)]
    pub loader: Option<String>,
    /// Minecraft version filter; defaults to the saved one
    #[arg(long = "game-version")]
    pub game_version: Option<String>,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Modrinth project id or slug
    pub project_id: String,
    /// Loader whose build is downloaded
    #[arg(long)]
    pub loader: Option<String>,
    /// Minecraft folder (defaults to the saved one)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

pub async fn dispatch(cli: Cli) -> InstallerResult<()> {
    let store = ConfigStore::new(cli.config.unwrap_or_else(ConfigStore::default_path));

    match cli.command {
        Commands::Config(cmd) => run_config(&store, cmd),
        Commands::Install(args) => run_install(&store, args).await,
        Commands::Search(args) => run_search(&store, &registry(&cli.registry)?, args).await,
        Commands::Versions { project_id } => {
            run_versions(&registry(&cli.registry)?, &project_id).await
        }
        Commands::Download(args) => run_download(&store, &registry(&cli.registry)?, args).await,
    }
}

fn registry(base_url: &str) -> InstallerResult<ModrinthClient> {
    Ok(ModrinthClient::with_base_url(build_http_client()?, base_url))
}

fn run_config(store: &ConfigStore, cmd: ConfigCommand) -> InstallerResult<()> {
    let mut settings = store.load();

    match cmd {
        ConfigCommand::Show => {
            println!("settings file : {}", store.path().display());
            print_settings(&settings);
        }
        ConfigCommand::Set {
            path,
            loader,
            game_version,
        } => {
            if let Some(path) = path {
                settings.minecraft_path = path.trim().to_string();
            }
            if let Some(loader) = loader {
                settings.modloader = loader.trim().to_string();
            }
            if let Some(version) = game_version {
                settings.version = version.trim().to_string();
            }
            store.save(&settings)?;
            print_settings(&settings);
        }
    }

    Ok(())
}

fn print_settings(settings: &Settings) {
    println!(
        "minecraft path: {}",
        settings.resolved_install_path().display()
    );
    println!("mod loader    : {}", settings.modloader);
    println!("game version  : {}", settings.version);
}

async fn run_install(store: &ConfigStore, args: InstallArgs) -> InstallerResult<()> {
    let install_path = args
        .path
        .unwrap_or_else(|| store.load().resolved_install_path());

    if !args.files.is_empty() {
        println!("{} file(s) selected.", args.files.len());
    }

    let report = workflow::install_local(&install_path, &args.files, &args.staging).await?;

    println!(
        "Mods installed successfully! ({} selected, {} from {})",
        report.selected,
        report.staged,
        args.staging.display()
    );
    Ok(())
}

async fn run_search<R: ModRegistry>(
    store: &ConfigStore,
    registry: &R,
    args: SearchArgs,
) -> InstallerResult<()> {
    let mut settings = store.load();
    if let Some(loader) = args.loader {
        settings.modloader = loader.trim().to_string();
    }
    if let Some(version) = args.game_version {
        settings.version = version.trim().to_string();
    }
    if settings.minecraft_path.trim().is_empty() {
        settings.minecraft_path = settings.resolved_install_path().display().to_string();
    }
    // The effective filters are remembered before the query goes out.
    store.save(&settings)?;

    let hits = registry
        .search(
            args.query.trim(),
            Some(settings.modloader.as_str()),
            Some(settings.version.as_str()),
        )
        .await?;

    if hits.is_empty() {
        println!("No results.");
    }
    for hit in &hits {
        print_hit(hit);
    }
    Ok(())
}

fn print_hit(hit: &ModSummary) {
    println!("{}", hit_heading(hit));
    println!("    {}", preview(&hit.description));
}

fn hit_heading(hit: &ModSummary) -> String {
    let mut heading = format!("{}  [{}]", hit.title, hit.project_id);
    if let Some(slug) = hit.slug.as_deref().filter(|s| !s.is_empty()) {
        heading.push_str(&format!(" ({slug})"));
    }
    if let Some(author) = hit.author.as_deref().filter(|a| !a.is_empty()) {
        heading.push_str(&format!(" by {author}"));
    }
    if let Some(downloads) = hit.downloads {
        heading.push_str(&format!(", {downloads} downloads"));
    }
    heading
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

async fn run_versions<R: ModRegistry>(registry: &R, project_id: &str) -> InstallerResult<()> {
    let versions = registry.list_versions(project_id).await?;
    if versions.is_empty() {
        println!("No versions published.");
    }
    for version in &versions {
        print_version(version);
    }
    Ok(())
}

fn print_version(version: &ModVersion) {
    let number = version
        .version_number
        .as_deref()
        .or(version.name.as_deref())
        .unwrap_or("?");
    let published = version
        .date_published
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let file = version
        .files
        .first()
        .map(|f| f.filename.as_str())
        .unwrap_or("-");
    println!(
        "{:<20} {:<10} loaders={} game={} {}",
        number,
        published,
        version.loaders.join(","),
        version.game_versions.join(","),
        file
    );
}

async fn run_download<R: ModRegistry>(
    store: &ConfigStore,
    registry: &R,
    args: DownloadArgs,
) -> InstallerResult<()> {
    let settings = store.load();
    let install_path = args
        .path
        .unwrap_or_else(|| settings.resolved_install_path());
    let loader = workflow::target_loader(args.loader.as_deref(), &settings.modloader);

    info!("Resolving {} build of {}", loader, args.project_id);
    let acquired =
        workflow::acquire_mod(registry, &install_path, &args.project_id, &loader).await?;

    println!("{} installed successfully.", acquired.filename);
    Ok(())
}
