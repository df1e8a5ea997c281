mod commands;
mod config;
mod registry;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use langpack::{ActiveLanguages, BuiltinLocales, PackSynchronizer, SyncSettings};
use langpack_http::HttpTransport;
use langpack_store::Registry;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, MirrorOverrides};
use crate::registry::FsModuleRegistry;

#[derive(Parser)]
#[command(name = "langpack")]
#[command(about = "Download and install translation packs for installed modules")]
struct Cli {
    /// Path to the config file (defaults to ~/.config/langpack/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover the download mirror and store its base URL
    Mirror,
    /// Download and install one language pack
    Download {
        /// Module key, e.g. `backend`
        module: String,
        /// Language code, e.g. `fr` or `pt_BR`
        language: String,
    },
    /// Update language packs of all (or the selected) modules and languages
    Update {
        /// Only update this language (repeatable)
        #[arg(long = "language")]
        languages: Vec<String>,
        /// Only update this module (repeatable)
        #[arg(long = "module")]
        modules: Vec<String>,
    },
    /// List known languages and when they were last updated
    Languages,
    /// List modules with translations and the state of their packs
    Packs,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "langpack=info,langpack_cli=info".into()),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_synchronizer(config: &AppConfig) -> Result<PackSynchronizer> {
    let registry = Registry::open(&config.database)
        .with_context(|| format!("failed to open registry at {}", config.database.display()))?;
    let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))
        .context("failed to set up HTTP client")?;
    let catalog = BuiltinLocales::new().with_extra(config.extra_languages());
    let modules = FsModuleRegistry::scan(&config.module_roots);

    let settings = SyncSettings {
        labels_root: config.labels_root.clone(),
        var_root: config.var_root.clone(),
        builtin_modules_root: config.builtin_modules_dir.clone(),
        host_version: config.host_version.clone(),
        beta_channel: config.beta_translation_server,
    };

    let sync = PackSynchronizer::new(
        settings,
        Arc::new(catalog),
        ActiveLanguages::new(config.active_languages.iter().map(String::as_str)),
        Arc::new(modules),
        Arc::new(registry),
        Arc::new(transport),
    );

    Ok(if config.mirror_overrides.is_empty() {
        sync
    } else {
        sync.with_rewrite(MirrorOverrides::new(config.mirror_overrides.clone()))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let app_config = config::load_config(cli.config.as_deref());
    let sync = build_synchronizer(&app_config)?;

    match cli.command {
        Command::Mirror => commands::mirror::run(&sync).await,
        Command::Download { module, language } => {
            commands::download::run(&sync, &module, &language).await
        }
        Command::Update { languages, modules } => {
            commands::update::run(&sync, &languages, &modules).await
        }
        Command::Languages => commands::languages::run(&sync),
        Command::Packs => commands::packs::run(&sync),
    }
}
