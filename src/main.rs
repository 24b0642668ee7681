//! Main entry point for oshi-ranker
//!
//! Loads configuration, opens the roster slot and runs the interactive
//! terminal loop on stdin/stdout. Logs go to stderr.

use anyhow::Result;
use clap::Parser;
use oshi_ranker::config::{validate_config, AppConfig, StorageBackend};
use oshi_ranker::session::app::ConfiguredSession;
use oshi_ranker::ui::{run_loop, TerminalPresenter};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

/// oshi-ranker - rank your favourites one matchup at a time
#[derive(Parser)]
#[command(
    name = "oshi-ranker",
    version,
    about = "Rank characters by voting on random pairs",
    long_about = "oshi-ranker keeps a roster of characters, shows you two of them at a time \
                 and updates their Elo ratings from your votes. Ratings and win/loss/draw \
                 records persist between runs."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Directory holding the roster file")]
    data_dir: Option<PathBuf>,

    /// Storage key override
    #[arg(long, value_name = "KEY", help = "Name of the roster slot")]
    storage_key: Option<String>,

    /// Keep everything in memory
    #[arg(long, help = "Do not read or write any files")]
    in_memory: bool,

    /// Pairing seed override
    #[arg(long, value_name = "SEED", help = "Seed the matchup picker for reproducible runs")]
    seed: Option<u64>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without starting a session")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Log the effective configuration
fn display_startup_banner(config: &AppConfig) {
    info!("oshi-ranker {}", oshi_ranker::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    match config.storage.backend {
        StorageBackend::File => info!("   Roster file: {}", config.slot_path().display()),
        StorageBackend::Memory => info!("   Roster: in memory only"),
    }
    info!("   K-factor: {}", config.rating.k_factor);
    if let Some(seed) = config.rating.pairing_seed {
        info!("   Pairing seed: {}", seed);
    }
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_dir) = &args.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    if let Some(key) = &args.storage_key {
        config.storage.key = key.clone();
    }

    if args.in_memory {
        config.storage.backend = StorageBackend::Memory;
    }

    if let Some(seed) = args.seed {
        config.rating.pairing_seed = Some(seed);
    }

    validate_config(&config)?;
    Ok(config)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful, exiting (dry run)");
        return Ok(());
    }

    let mut session = match ConfiguredSession::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to open roster: {:#}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut presenter = TerminalPresenter::new(stdin.lock(), io::stdout());
    presenter.show_help();

    if let Err(e) = run_loop(&mut session, &mut presenter) {
        error!("Session failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
