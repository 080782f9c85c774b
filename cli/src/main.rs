//! Contacts API CLI server
//!
//! Headless contacts REST API suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/contacts-service/config.toml)
//! contacts-server
//!
//! # Custom config path
//! contacts-server --config /etc/contacts-service/config.toml
//!
//! # Override listener and database
//! contacts-server --port 9000 --database-url sqlite://./dev.db?mode=rwc
//!
//! # Validate config without starting
//! contacts-server --check
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};

use contacts_api::config::{AppConfig, ConfigError};
use contacts_api::server::{init_tracing, ServerHandle, ServerOptions};

/// Contacts API server.
#[derive(Parser, Debug)]
#[command(
    name = "contacts-server",
    version,
    about = "REST API for managing contacts",
    long_about = "Contacts API — paginated listing and CRUD over contact records, \
                  backed by SQLite.\n\n\
                  Default config: ~/.config/contacts-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CONTACTS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded file.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref host) = self.host {
            info!("CLI override: host = {}", host);
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            info!("CLI override: port = {}", port);
            config.server.port = port;
        }
        if let Some(ref url) = self.database_url {
            info!("CLI override: database_url = {}", url);
            config.database.url = url.clone();
        }
        if let Some(ref level) = self.log_level {
            info!("CLI override: log_level = {}", level);
            config.logging.level = level.clone();
        }
    }
}

/// Read the config file, falling back to defaults. The error is handed
/// back so it can be logged once a subscriber is installed.
fn load_or_default(path: &Path) -> (AppConfig, Option<ConfigError>) {
    match AppConfig::load(path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(contacts_api::default_config_path);

    let (mut config, load_error) = load_or_default(&config_path);

    // The log level may come from the command line, so overrides go first.
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
    }
    match load_error {
        Some(e) => {
            error!("{}", e);
            error!("Using default configuration.");
        }
        None => info!("Configuration loaded from {}", config_path.display()),
    }
    cli.apply_overrides(&mut config);

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
