mod config;
mod logging;
mod playlist_url;
mod ports;
mod services;
mod spotify_rs;
mod youtube_rs;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::WrapErr};

use crate::{
    config::{Config, Overrides},
    logging::init_tracing,
    ports::youtube::Visibility,
    services::{
        spotify::{client::SpotifyHttpAdapter, reader::PlaylistReader},
        transfer::{PlaylistTransfer, print_source_playlist},
        youtube::client::YoutubeHttpAdapter,
    },
    youtube_rs::token_store::TokenStore,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "YOUTIFY_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `youtify=debug` (default: warn)
    #[arg(long, default_value = "warn", global = true, env = "LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a Spotify playlist into a new YouTube playlist
    Convert {
        /// Spotify playlist URL, e.g. https://open.spotify.com/playlist/3cEYpjA9oz9GiPac4AsH4n
        #[arg(env = "SOURCE_PLAYLIST_URL")]
        source_playlist_url: String,

        /// Spotify app client id
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,

        /// Spotify app client secret
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
        client_secret: Option<String>,

        /// Google OAuth client_secret.json for the YouTube Data API
        #[arg(long = "credentials-file", env = "YOUTUBE_CLIENT_SECRETS")]
        credentials_file: Option<PathBuf>,

        /// Privacy status of the created playlist
        #[arg(long = "playlist-visibility", value_enum, env = "YOUTUBE_PLAYLIST_VISIBILITY")]
        visibility: Option<Visibility>,
    },
    /// Authorize access to your YouTube account and store the token
    Login {
        /// Google OAuth client_secret.json for the YouTube Data API
        #[arg(long = "credentials-file", env = "YOUTUBE_CLIENT_SECRETS")]
        credentials_file: Option<PathBuf>,
    },
    /// Forget the stored YouTube token
    Logout,
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    tracing::debug!("Loading configuration");
    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load youtify config")?;

    match args.command {
        Commands::Convert {
            source_playlist_url,
            client_id,
            client_secret,
            credentials_file,
            visibility,
        } => {
            let overrides = Overrides {
                client_id,
                client_secret,
                client_secrets_file: credentials_file,
                visibility,
            };
            convert(&config, &overrides, &source_playlist_url).await?;
        }
        Commands::Login { credentials_file } => {
            let overrides = Overrides {
                client_secrets_file: credentials_file,
                ..Overrides::default()
            };
            let store = TokenStore::open_default()?;
            YoutubeHttpAdapter::authenticate(&config.client_secrets_file(&overrides)?, &store)
                .await
                .wrap_err("Failed to authenticate with YouTube")?;
            println!("YouTube token stored at {}", store.path().display());
        }
        Commands::Logout => {
            let store = TokenStore::open_default()?;
            if store.clear()? {
                println!("Removed YouTube token {}", store.path().display());
            } else {
                println!("No YouTube token stored");
            }
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                let path = Config::create_default()?;
                println!("Created {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}

/// Any error returned from here happened before track processing and ends the run.
async fn convert(config: &Config, overrides: &Overrides, source_playlist_url: &str) -> Result<()> {
    // Resolve every setting up front so a missing value fails before any network call
    let credentials = config.spotify_credentials(overrides)?;
    let client_secrets_file = config.client_secrets_file(overrides)?;
    let options = config.transfer_options(overrides);

    let spotify = SpotifyHttpAdapter::authenticate(&credentials)
        .await
        .wrap_err("Failed to authenticate with Spotify")?;
    let source = PlaylistReader::new(spotify)
        .read(source_playlist_url)
        .await
        .wrap_err("Failed to read Spotify playlist")?;
    print_source_playlist(&source);

    let store = TokenStore::open_default()?;
    let youtube = YoutubeHttpAdapter::authenticate(&client_secrets_file, &store)
        .await
        .wrap_err("Failed to authenticate with YouTube")?;

    PlaylistTransfer::new(youtube)
        .transfer(&source, &options)
        .await?;

    Ok(())
}
