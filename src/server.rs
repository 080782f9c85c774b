//! Reusable contacts server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, REST API and graceful shutdown. The CLI
//! binary and the integration tests both start the server through it.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::application::ContactService;
use crate::config::{AppConfig, LoggingConfig};
use crate::infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmContactRepository};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the contacts server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running contacts server.
///
/// # Examples
///
/// ```rust,no_run
/// use contacts_api::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is bound to (the real port when configured as 0).
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the contacts server with the given options.
    ///
    /// This will:
    /// 1. Connect to the database and run migrations (if enabled)
    /// 2. Build the contact service and REST router
    /// 3. Bind the listener and serve until shutdown is triggered
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting contacts server...");

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        // ── Services ───────────────────────────────────────────
        let repo = Arc::new(SeaOrmContactRepository::new(db.clone()));
        let contact_service = Arc::new(ContactService::new(repo));

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(contact_service, &app_cfg);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Base URL clients should use, e.g. `http://127.0.0.1:8081`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// Call [`wait`](Self::wait) to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    /// In-flight requests get `shutdown_timeout` to finish.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        match tokio::time::timeout(self.shutdown.timeout(), self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                "REST API server did not stop within {:?}",
                self.shutdown.timeout()
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Contacts server shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down contacts server...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Install the global tracing subscriber described by `logging`.
/// `RUST_LOG`, when set, wins over the configured level. Fails if a
/// subscriber is already installed.
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        ServerOptions {
            config,
            auto_migrate: true,
        }
    }

    #[tokio::test]
    async fn starts_on_ephemeral_port_and_shuts_down() {
        let handle = ServerHandle::start(test_options()).await.unwrap();
        assert_ne!(handle.local_addr.port(), 0);
        assert!(handle.is_running());
        assert!(handle.base_url().starts_with("http://127.0.0.1:"));

        let signal = handle.shutdown_signal();
        handle.shutdown().await;
        assert!(signal.is_triggered());
    }
}
