//! courserve - Course Recommendation HTTP Server
//!
//! Axum-based HTTP API that recommends similar courses, trying a collaborative
//! recommender first and falling back to the content-based similarity engine

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// API error types
pub mod error;

/// HTTP handlers for REST endpoints
pub mod handlers;

/// Server configuration from TOML or environment
pub mod config;

/// Collaborative recommender client
pub mod remote;

/// Remote-then-local recommendation orchestration
pub mod recommend;

/// API response types matching the client contract
pub mod responses;

/// Server instance management
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use handlers::{create_router, AppState};
pub use recommend::{RecommendationMethod, Recommendations};
pub use remote::{CollaborativeRecommender, FixedRecommender, RemoteOutcome};
pub use server::CourseServer;
