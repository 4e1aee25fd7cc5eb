//! Server instance management

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::signal;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::handlers::{create_router, AppState};
use crate::remote::{recommender_from_config, CollaborativeRecommender};
use coursecat::{seed_from_file, Catalog};

/// Course recommendation HTTP server
///
/// Owns the catalog and recommender and manages the Axum server
/// lifecycle including startup and graceful shutdown.
pub struct CourseServer {
    /// Server configuration
    config: ServerConfig,

    /// Catalog wrapped in Arc<Mutex> for thread safety
    catalog: Arc<Mutex<Catalog>>,

    /// Collaborative recommender
    recommender: Arc<dyn CollaborativeRecommender>,
}

impl CourseServer {
    /// Create new server instance
    ///
    /// Validates the configuration, opens (and optionally seeds) the catalog
    /// and builds the collaborative recommender.
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        if let Err(e) = config.validate() {
            return Err(ApiError::internal(format!("Invalid config: {}", e)));
        }

        let mut catalog = Catalog::open(&config.db_path).map_err(|e| {
            error!("Failed to open catalog: {}", e);
            ApiError::internal(format!("Failed to open catalog: {}", e))
        })?;

        if let Some(seed_path) = &config.seed_path {
            seed_from_file(&mut catalog, Path::new(seed_path)).map_err(|e| {
                error!("Failed to seed catalog: {}", e);
                ApiError::internal(format!("Failed to seed catalog: {}", e))
            })?;
        }

        let recommender = recommender_from_config(&config.personalize)
            .map_err(|e| ApiError::internal(format!("Failed to build recommender: {}", e)))?;

        Ok(Self {
            config,
            catalog: Arc::new(Mutex::new(catalog)),
            recommender,
        })
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ApiError> {
        self.config
            .socket_addr()
            .map_err(|e| ApiError::internal(format!("Failed to parse address: {}", e)))
    }

    /// Application state shared by the handlers
    #[must_use]
    pub fn state(&self) -> AppState {
        AppState::new_from_arc(
            Arc::clone(&self.catalog),
            Arc::clone(&self.recommender),
            self.config.clone(),
        )
    }

    /// Start server and run until a shutdown signal arrives
    pub async fn start(&self) -> Result<(), ApiError> {
        let addr = self.socket_addr()?;
        let app = create_router(&self.config).with_state(self.state());

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            error!("Failed to bind to {}: {:?}", addr, e);
            ApiError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;

        info!("Course recommendation API listening on {}", self.server_url());
        info!("Health check: {}/api/health", self.server_url());
        info!("Main endpoint: POST {}/api/recommend-courses", self.server_url());

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown())
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        self.close();
        Ok(())
    }

    /// Checkpoint the catalog on the way out
    fn close(&self) {
        match self.catalog.lock() {
            Ok(mut catalog) => {
                if let Err(e) = catalog.close() {
                    error!("Failed to close catalog: {}", e);
                }
            }
            Err(_) => error!("Catalog lock poisoned during shutdown"),
        }
    }

    /// Get catalog reference
    #[must_use]
    pub fn catalog(&self) -> Arc<Mutex<Catalog>> {
        Arc::clone(&self.catalog)
    }

    /// Get server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        self.config.server_url()
    }
}

/// Wait for shutdown signal
///
/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn wait_for_shutdown() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix;
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received TERM signal");
            }
            Err(e) => {
                error!("Failed to install TERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
