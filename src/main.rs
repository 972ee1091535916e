//! # Place Suggest Server
//!
//! ## Purpose
//! Main entry point for the autocomplete server. Loads configuration and
//! the place dataset, builds the prefix index, and serves the suggestion
//! API until the process is stopped.
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Load the dataset and build the prefix index
//! 4. Start the API server
//! 5. Handle shutdown signals gracefully

use clap::{Arg, Command};
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use place_suggest::{
    api::ApiServer,
    config::Config,
    errors::{Result, SuggestError},
    ingestion::load_dataset,
    trie::PrefixIndex,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("place-suggest-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Place name autocomplete server with trie-backed prefix search")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .value_name("FILE")
                .help("Dataset path, overrides the configuration file"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Bind address, overrides the configuration file"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Server port, overrides the configuration file")
                .value_parser(clap::value_parser!(u16)),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    if let Some(data) = matches.get_one::<String>("data") {
        config.dataset.path = data.into();
    }
    if let Some(host) = matches.get_one::<String>("host") {
        config.server.host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    let config = Arc::new(config);

    // Initialize logging
    init_logging(&config)?;

    info!("Starting Place Suggest v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", config_path);

    // Load the dataset and build the index
    let app_state = initialize_components(config.clone())?;

    // Start the API server
    let server = ApiServer::new(app_state);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Server error: {}", e);
        }
    });

    info!(
        "Place Suggest started on {}:{}",
        config.server.host, config.server.port
    );

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = server_handle => {
            warn!("Server stopped unexpectedly");
        }
    }

    info!("Place Suggest shut down");
    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.logging.level).map_err(|_| {
        SuggestError::Config {
            message: format!("Invalid log level: {}", config.logging.level),
        }
    })?;

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    Ok(())
}

/// Load the dataset and build the shared application state
fn initialize_components(config: Arc<Config>) -> Result<AppState> {
    info!("Loading dataset from {}", config.dataset.path.display());
    let records = load_dataset(&config.dataset.path)?;

    let start = Instant::now();
    let mut index = PrefixIndex::new();
    for record in records {
        let name = record.name.clone();
        index.insert(&name, record);
    }

    info!(
        "Indexed {} records in {}ms",
        index.len(),
        start.elapsed().as_millis()
    );

    Ok(AppState {
        config,
        index: Arc::new(index),
    })
}
