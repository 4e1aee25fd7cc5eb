//! HTTP handlers for REST API endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json, Router,
};
use coursecat::{Catalog, CourseStore};
use http::{header, HeaderValue, Method};
use std::sync::{Arc, Mutex};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult, INVALID_REQUEST_MESSAGE};
use crate::recommend::{drop_same_semester, lock_catalog, recommend};
use crate::remote::CollaborativeRecommender;
use crate::responses::{
    CourseDetailResponse, CourseListResponse, CourseRequest, HealthResponse, InputCourseSummary,
    RecommendationResponse, ServiceStatus,
};

/// State shared across all handlers
///
/// Uses `Arc<Mutex<Catalog>>` because `rusqlite::Connection` is not `Sync`.
/// Handlers lock the mutex only around synchronous catalog calls.
#[derive(Clone)]
pub struct AppState {
    /// Course catalog
    pub catalog: Arc<Mutex<Catalog>>,

    /// Collaborative recommender tried before the similarity engine
    pub recommender: Arc<dyn CollaborativeRecommender>,

    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new AppState from owned parts
    pub fn new(
        catalog: Catalog,
        recommender: Arc<dyn CollaborativeRecommender>,
        config: ServerConfig,
    ) -> Self {
        Self::new_from_arc(Arc::new(Mutex::new(catalog)), recommender, config)
    }

    /// Create AppState from an existing Arc<Mutex<Catalog>>
    pub fn new_from_arc(
        catalog: Arc<Mutex<Catalog>>,
        recommender: Arc<dyn CollaborativeRecommender>,
        config: ServerConfig,
    ) -> Self {
        Self {
            catalog,
            recommender,
            config: Arc::new(config),
        }
    }

    fn reveal(&self, error: ApiError) -> ApiError {
        error.expose_details(self.config.is_development())
    }
}

/// POST /api/recommend-courses - Recommend courses similar to the posted one
pub async fn recommend_courses(
    State(state): State<AppState>,
    body: Result<Json<CourseRequest>, JsonRejection>,
) -> ApiResult<Json<RecommendationResponse>> {
    let course = match body {
        Ok(Json(CourseRequest { course: Some(course) })) if !course.course_code.trim().is_empty() => course,
        Ok(_) => return Err(ApiError::bad_request(INVALID_REQUEST_MESSAGE)),
        Err(rejection) => {
            warn!("Rejected recommendation request body: {}", rejection.body_text());
            return Err(state.reveal(
                ApiError::bad_request(INVALID_REQUEST_MESSAGE).with_details(rejection.body_text()),
            ));
        }
    };

    info!("Recommending courses for {}", course.course_code);

    let recommendations = recommend(
        &course,
        state.recommender.as_ref(),
        &state.catalog,
        state.config.candidate_limit,
    )
    .await
    .map_err(|e| {
        warn!("Recommendation error: {}", e);
        state.reveal(e)
    })?;

    let mut filtered = drop_same_semester(&course, recommendations.courses);
    let total_found = filtered.len();
    filtered.truncate(state.config.response_limit);

    Ok(Json(RecommendationResponse {
        success: true,
        input_course: InputCourseSummary::from(&course),
        recommendations: filtered,
        total_found,
        recommendation_method: recommendations.method,
    }))
}

/// GET /api/courses - List the first page of the catalog
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<CourseListResponse>> {
    let mut courses = {
        let mut guard = lock_catalog(&state.catalog)?;
        CourseStore::new(&mut guard)
            .get_all()
            .map_err(|e| state.reveal(e.into()))?
    };

    let total = courses.len();
    courses.truncate(state.config.list_limit);
    info!("Listing {} of {} courses", courses.len(), total);

    Ok(Json(CourseListResponse {
        success: true,
        courses,
        total,
    }))
}

/// GET /api/courses/:course_code - Get one course
pub async fn get_course(
    Path(course_code): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<CourseDetailResponse>> {
    let course = {
        let mut guard = lock_catalog(&state.catalog)?;
        CourseStore::new(&mut guard)
            .get_by_code(&course_code)
            .map_err(|e| state.reveal(e.into()))?
    };

    match course {
        Some(course) => Ok(Json(CourseDetailResponse {
            success: true,
            course,
        })),
        None => Err(ApiError::not_found("Course not found")),
    }
}

/// GET /api/health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match lock_catalog(&state.catalog) {
        Ok(mut guard) => match CourseStore::new(&mut guard).count() {
            Ok(_) => "connected",
            Err(_) => "unavailable",
        },
        Err(_) => "unavailable",
    };

    let personalize = if state.recommender.is_configured() {
        "configured"
    } else {
        "not configured"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        services: ServiceStatus {
            database: database.to_string(),
            personalize: personalize.to_string(),
        },
    })
}

/// CORS policy for the configured origins ("*" allows any)
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Create router with all API endpoints
pub fn create_router(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/api/health", axum::routing::get(health_check))
        .route("/api/recommend-courses", axum::routing::post(recommend_courses))
        .route("/api/courses", axum::routing::get(list_courses))
        .route("/api/courses/:course_code", axum::routing::get(get_course))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}
