mod config;
mod database;
mod entities;
mod formatting;
mod http_server;
mod logging;
mod ports;
mod schedule;
mod seed;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config,
    database::Database,
    logging::setup_logging,
    ports::clock::SystemClock,
    schedule::Schedule,
    seed::{SeedFile, seed_database},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "FYYUR_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level
    #[arg(long, default_value = "info", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file (release builds default to `error.log`)
    #[arg(long, env = "FYYUR_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the web application
    Serve {
        /// The port to run the server on, overrides the config file
        #[arg(short, long, env = "FYYUR_PORT")]
        port: Option<u16>,
    },
    /// Load venues, artists and shows from a TOML file
    Seed {
        /// The seed file to load
        #[arg(short, long)]
        file: PathBuf,
    },
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
    let log_file = args.log_file.clone().or_else(|| {
        (!cfg!(debug_assertions)).then(|| PathBuf::from("error.log"))
    });
    setup_logging(args.log_level, log_file, args.log_file_level)?;

    log::debug!("Fyyur starting");

    if let Commands::Config(config_commands) = &args.command {
        match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = Config::create_default()?;
                log::info!("Default config available at: {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        }
        return Ok(());
    }

    log::debug!("Loading configuration");
    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load fyyur config")?;

    log::debug!("Opening database at: {}", config.database_path().display());
    let database = Database::open(&config.database_path()).await?;

    match args.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let schedule = Schedule::new(Arc::new(SystemClock), config.timezone()?);
            log::info!("Starting HTTP server on port: {}", port);
            http_server::app::start(port, database, schedule).await?;
        }
        Commands::Seed { file } => {
            log::debug!("Seeding database from: {}", file.display());
            let seed = SeedFile::from_file(&file)?;
            seed_database(&database, &seed).await?;
        }
        Commands::Config(_) => {}
    }

    Ok(())
}
