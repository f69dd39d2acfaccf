use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use playlist_pace::OutputFormat;
use playlist_pace::commands;
use playlist_pace::commands::estimate::EstimateArgs;
use playlist_pace::config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plpace")]
#[command(about = "Estimate how long a YouTube playlist takes to watch")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Config file (default: ~/.playlist-pace/config.toml)")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate remaining watch time for a playlist
    Estimate {
        #[arg(help = "Playlist URL or ID")]
        playlist: String,
        #[arg(long, default_value = "0", help = "Videos already watched")]
        watched: u64,
        #[arg(
            long,
            default_value = "0",
            allow_negative_numbers = true,
            help = "Videos you want to finish (0 = all)"
        )]
        desired: i64,
        #[arg(long, help = "remaining | days | count")]
        mode: Option<String>,
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Hours watched per day (days mode)"
        )]
        daily_hours: Option<f64>,
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Playback speed, e.g. 1, 1.25, 1.5, 1.75, 2"
        )]
        speed: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show playlist length and average video duration
    Info {
        #[arg(help = "Playlist URL or ID")]
        playlist: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Inspect configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get {
        key: String,
    },
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    // Path and init must work even when the current file is broken
    if let Commands::Config(args) = &cli.command {
        match &args.action {
            ConfigAction::Path => return commands::config::path(config_path),
            ConfigAction::Init { force } => return commands::config::init(config_path, *force),
            _ => {}
        }
    }

    let config = config::load(config_path)?;

    match &cli.command {
        Commands::Estimate {
            playlist,
            watched,
            desired,
            mode,
            daily_hours,
            speed,
            format,
        } => {
            let args = EstimateArgs {
                playlist: playlist.clone(),
                watched: *watched,
                desired: *desired,
                mode: mode.clone(),
                daily_hours: *daily_hours,
                speed: speed.clone(),
            };
            let provider = config.provider.build_provider()?;
            commands::estimate::estimate(&config, provider.as_ref(), &args, *format)?;
        }
        Commands::Info { playlist, format } => {
            let provider = config.provider.build_provider()?;
            commands::info::info(provider.as_ref(), playlist, *format)?;
        }
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
            ConfigAction::Path | ConfigAction::Init { .. } => {}
        },
    }

    Ok(())
}
