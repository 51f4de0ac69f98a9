//! asyncgur - command line front end
//!
//! Loads configuration, initializes logging, and runs one API call per
//! invocation, printing the result as JSON.

use anyhow::Context;
use asyncgur::{
    config::{Config, LoggingConfig},
    CommentSort, GallerySection, GallerySort, Imgur, MediaSource, SearchSort, TimeWindow,
    UploadPayload,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "asyncgur", version, about = "Imgur API from the command line")]
struct Cli {
    /// Configuration file (defaults to asyncgur.local.toml, then asyncgur.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Client ID, overrides the configuration
    #[arg(long, env = "IMGUR_CLIENT_ID", global = true, hide_env_values = true)]
    client_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a local file or a remote URL
    Upload {
        /// Path to a file, or an http(s) URL
        source: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// Album ID or deletehash to add the upload to
        #[arg(long)]
        album: Option<String>,
    },
    /// Show information about an image
    Info { hash: String },
    /// Delete an image by hash or deletehash
    Delete { hash: String },
    /// Browse the gallery
    Gallery {
        #[arg(long, default_value_t = GallerySection::Hot)]
        section: GallerySection,
        #[arg(long, default_value_t = GallerySort::Viral)]
        sort: GallerySort,
        #[arg(long, default_value_t = TimeWindow::Day)]
        window: TimeWindow,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Search the gallery
    Search {
        query: String,
        #[arg(long, default_value_t = SearchSort::Time)]
        sort: SearchSort,
        #[arg(long, default_value_t = TimeWindow::All)]
        window: TimeWindow,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Show the comment thread of a gallery post
    Comments {
        id: String,
        #[arg(long, default_value_t = CommentSort::Best)]
        sort: CommentSort,
    },
    /// Exchange the refresh token for a new access token
    Refresh,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(&cli, Path::new("."))?;

    // Initialize logging
    init_logging(&config.logging)?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting asyncgur");

    let imgur = Imgur::from_config(&config)?;
    let result = run(&imgur, cli.command).await;

    let limits = imgur.rate_limits();
    tracing::info!(
        client_remaining = limits.client_remaining,
        client_limit = limits.client_limit,
        user_remaining = limits.user_remaining,
        "Rate limits"
    );

    result
}

async fn run(imgur: &Imgur, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Upload {
            source,
            title,
            description,
            name,
            album,
        } => {
            let media = if source.starts_with("http://") || source.starts_with("https://") {
                MediaSource::url(source)
            } else {
                MediaSource::from_path(&source)
                    .await
                    .with_context(|| format!("reading {}", source))?
            };
            let mut payload = UploadPayload::new(media);
            payload.title = title;
            payload.description = description;
            payload.name = name;
            payload.album = album;
            print_json(&imgur.upload_image(payload).await?.data)
        }
        Command::Info { hash } => print_json(&imgur.get_image(&hash).await?.data),
        Command::Delete { hash } => print_json(&imgur.delete_image(&hash).await?.data),
        Command::Gallery {
            section,
            sort,
            window,
            page,
        } => print_json(&imgur.get_gallery(section, sort, window, page).await?.data),
        Command::Search {
            query,
            sort,
            window,
            page,
        } => print_json(&imgur.search_gallery(&query, sort, window, page).await?.data),
        Command::Comments { id, sort } => {
            print_json(&imgur.get_image_comments(&id, sort).await?.data)
        }
        Command::Refresh => print_json(&imgur.refresh_access_token().await?),
    }
}

/// Build the configuration: an explicit `--config` file, or the first config
/// file found in `dir`, then the environment, then `--client-id`. Validated
/// once everything is applied.
fn load_config(cli: &Cli, dir: &Path) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let mut config = Config::from_toml(&contents)?;
            config.apply_env();
            config
        }
        None => Config::discover(dir)?,
    };

    if let Some(client_id) = &cli.client_id {
        config.auth.client_id = client_id.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Initialize logging based on configuration
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Logs go to stderr so stdout stays valid JSON
    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
