//! Server configuration from TOML or environment

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Default host address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port number
pub const DEFAULT_PORT: u16 = 3000;

/// Default CORS origins (any origin, the catalog client is served elsewhere)
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["*"];

/// Candidates requested from the recommender and kept by the engine
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

/// Recommendations returned to the client after filtering
pub const DEFAULT_RESPONSE_LIMIT: usize = 8;

/// Courses returned by the listing endpoint
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Remote recommender request timeout in milliseconds
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 3000;

/// Collaborative recommender settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalizeConfig {
    /// Campaign identifier; the recommender is disabled when unset
    pub campaign_arn: Option<String>,

    /// Recommendation endpoint URL
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for PersonalizeConfig {
    fn default() -> Self {
        Self {
            campaign_arn: None,
            endpoint: None,
            timeout_ms: DEFAULT_REMOTE_TIMEOUT_MS,
        }
    }
}

impl PersonalizeConfig {
    /// Whether both a campaign and an endpoint are set
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let set = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        set(&self.campaign_arn) && set(&self.endpoint)
    }
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Allowed CORS origins ("*" allows any)
    pub cors_origins: Vec<String>,

    /// Path to SQLite database
    pub db_path: String,

    /// Optional JSON file of courses upserted at startup
    pub seed_path: Option<String>,

    /// Deployment environment ("development" exposes error details)
    pub environment: String,

    /// Log level for tracing
    pub log_level: String,

    /// Candidates requested from the recommender and kept by the engine
    pub candidate_limit: usize,

    /// Recommendations returned to the client
    pub response_limit: usize,

    /// Courses returned by the listing endpoint
    pub list_limit: usize,

    /// Collaborative recommender settings
    pub personalize: PersonalizeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            db_path: "courses.db".to_string(),
            seed_path: None,
            environment: "production".to_string(),
            log_level: "info".to_string(),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            response_limit: DEFAULT_RESPONSE_LIMIT,
            list_limit: DEFAULT_LIST_LIMIT,
            personalize: PersonalizeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load config from environment variables with fallback to defaults
    ///
    /// Environment variables:
    /// - `COURSE_SERVE_HOST` - Server host
    /// - `COURSE_SERVE_PORT` - Server port
    /// - `COURSE_SERVE_DB_PATH` - Database path
    /// - `COURSE_SERVE_SEED_PATH` - Seed file of courses
    /// - `COURSE_SERVE_ENV` - `production` or `development`
    /// - `COURSE_SERVE_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
    /// - `PERSONALIZE_CAMPAIGN_ARN` - Recommender campaign
    /// - `PERSONALIZE_ENDPOINT` - Recommender endpoint URL
    /// - `PERSONALIZE_TIMEOUT_MS` - Recommender timeout
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load config from a TOML file, then apply environment overrides
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    /// Parse config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("COURSE_SERVE_HOST") {
            self.host = host;
        }

        if let Ok(port_str) = std::env::var("COURSE_SERVE_PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                self.port = port;
            }
        }

        if let Ok(db_path) = std::env::var("COURSE_SERVE_DB_PATH") {
            self.db_path = db_path;
        }

        if let Ok(seed_path) = std::env::var("COURSE_SERVE_SEED_PATH") {
            self.seed_path = Some(seed_path);
        }

        if let Ok(environment) = std::env::var("COURSE_SERVE_ENV") {
            self.environment = environment;
        }

        if let Ok(log_level) = std::env::var("COURSE_SERVE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(arn) = std::env::var("PERSONALIZE_CAMPAIGN_ARN") {
            self.personalize.campaign_arn = Some(arn);
        }

        if let Ok(endpoint) = std::env::var("PERSONALIZE_ENDPOINT") {
            self.personalize.endpoint = Some(endpoint);
        }

        if let Ok(timeout) = std::env::var("PERSONALIZE_TIMEOUT_MS") {
            if let Ok(timeout_ms) = timeout.parse::<u64>() {
                self.personalize.timeout_ms = timeout_ms;
            }
        }

        self
    }

    /// Whether error responses may carry internal details
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Get the socket address for the server
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {}", e))
    }

    /// Get the full server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be zero".to_string());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.db_path.trim().is_empty() {
            return Err("Database path cannot be empty".to_string());
        }

        if self.candidate_limit == 0 || self.response_limit == 0 {
            return Err("Recommendation limits must be greater than zero".to_string());
        }

        if self.personalize.timeout_ms == 0 {
            return Err("Recommender timeout must be greater than zero".to_string());
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                ));
            }
        }

        Ok(())
    }
}
