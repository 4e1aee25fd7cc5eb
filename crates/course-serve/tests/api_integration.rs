// Integration tests for the HTTP API
//
// Requests go through the full router (CORS and tracing layers included)
// against an in-memory catalog, with the collaborative recommender stubbed.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use coursecat::{Catalog, CourseStore};
use courserve::{create_router, AppState, FixedRecommender, RemoteOutcome, ServerConfig};
use courserve::remote::UnconfiguredRecommender;
use coursimil::Course;
use rstest::rstest;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn course(code: &str, department: &str, credits: f64, semester: &str, description: &str) -> Course {
    Course {
        course_title: format!("{} title", code),
        department: department.to_string(),
        credits,
        semester: semester.to_string(),
        description: description.to_string(),
        ..Course::new(code)
    }
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::open_in_memory().unwrap();
    CourseStore::new(&mut catalog)
        .batch_upsert(&[
            course("CS101", "CS", 3.0, "Fall", "Programming fundamentals using python"),
            course("CS102", "CS", 3.0, "Spring", "Programming fundamentals using java"),
            course("CS103", "CS", 4.0, "Fall", "Programming fundamentals using rust"),
            course("ART100", "Art", 2.0, "Spring", "Drawing"),
        ])
        .unwrap();
    catalog
}

fn app_with(recommender: Arc<dyn courserve::CollaborativeRecommender>, config: ServerConfig) -> Router {
    create_router(&config).with_state(AppState::new(catalog(), recommender, config))
}

fn app() -> Router {
    app_with(Arc::new(UnconfiguredRecommender), ServerConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn codes(body: &Value) -> Vec<String> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["courseCode"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_reports_services() {
    let (status, body) = send(app(), Request::get("/api/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"], "connected");
    assert_eq!(body["services"]["personalize"], "not configured");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_recommend_falls_back_to_content_based() {
    let target = json!({
        "course": {
            "courseCode": "CS101",
            "courseTitle": "Intro",
            "department": "CS",
            "credits": 3,
            "semester": "Fall",
            "description": "Programming fundamentals using python"
        }
    });

    let (status, body) = send(app(), post_json("/api/recommend-courses", &target)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["recommendationMethod"], "content-based");
    assert_eq!(body["inputCourse"]["courseCode"], "CS101");
    assert_eq!(body["inputCourse"]["courseTitle"], "Intro");
    // CS103 ranks second but shares the Fall semester and is filtered out
    assert_eq!(codes(&body), vec!["CS102", "ART100"]);
    assert_eq!(body["totalFound"], 2);
}

#[tokio::test]
async fn test_recommend_uses_collaborative_results() {
    let recommender = FixedRecommender::new(RemoteOutcome::Items(vec![
        "ART100".to_string(),
        "CS103".to_string(),
        "CS102".to_string(),
    ]));
    let app = app_with(Arc::new(recommender), ServerConfig::default());
    let target = json!({"course": {
        "courseCode": "CS101",
        "courseTitle": "Intro",
        "department": "CS",
        "credits": 3,
        "semester": "Fall",
        "description": "Programming fundamentals"
    }});

    let (status, body) = send(app, post_json("/api/recommend-courses", &target)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendationMethod"], "personalize");
    assert_eq!(codes(&body), vec!["ART100", "CS102"]);
}

#[tokio::test]
async fn test_recommend_truncates_to_response_limit() {
    let config = ServerConfig {
        response_limit: 1,
        ..Default::default()
    };
    let app = app_with(Arc::new(UnconfiguredRecommender), config);
    let target = json!({"course": {
        "courseCode": "X1",
        "courseTitle": "Seminar",
        "department": "CS",
        "credits": 3,
        "semester": "Winter",
        "description": "Research seminar"
    }});

    let (status, body) = send(app, post_json("/api/recommend-courses", &target)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    assert_eq!(body["totalFound"], 4);
}

#[rstest]
#[case::missing_course(json!({}))]
#[case::null_course(json!({"course": null}))]
#[case::empty_code(json!({"course": {"courseCode": ""}}))]
#[case::wrong_type(json!({"course": {"courseCode": 42}}))]
#[case::only_code(json!({"course": {"courseCode": "CS101"}}))]
#[case::missing_description(json!({"course": {
    "courseCode": "CS101", "courseTitle": "Intro", "department": "CS", "credits": 3
}}))]
#[case::blank_code(json!({"course": {
    "courseCode": "  ", "courseTitle": "Intro", "department": "CS", "credits": 3, "description": "Programming"
}}))]
#[tokio::test]
async fn test_recommend_rejects_invalid_body(#[case] body: Value) {
    let (status, response) = send(app(), post_json("/api/recommend-courses", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(
        response["error"],
        "Invalid request. Course object with courseCode is required."
    );
    assert!(response.get("details").is_none());
}

#[tokio::test]
async fn test_recommend_rejects_negative_credits() {
    let target = json!({"course": {
        "courseCode": "CS101",
        "courseTitle": "Intro",
        "department": "CS",
        "credits": -1,
        "description": "Programming"
    }});
    let (status, body) = send(app(), post_json("/api/recommend-courses", &target)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_body_details_in_development() {
    let config = ServerConfig {
        environment: "development".to_string(),
        ..Default::default()
    };
    let app = app_with(Arc::new(UnconfiguredRecommender), config);
    let request = Request::post("/api/recommend-courses")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_list_courses_pages() {
    let config = ServerConfig {
        list_limit: 2,
        ..Default::default()
    };
    let app = app_with(Arc::new(UnconfiguredRecommender), config);

    let (status, body) = send(app, Request::get("/api/courses").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["courses"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn test_get_course_by_code() {
    let (status, body) = send(app(), Request::get("/api/courses/CS102").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course"]["courseCode"], "CS102");
    assert_eq!(body["course"]["semester"], "Spring");
}

#[tokio::test]
async fn test_get_course_not_found() {
    let (status, body) = send(app(), Request::get("/api/courses/NOPE").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}

#[tokio::test]
async fn test_invalid_stored_course_is_server_error() {
    let mut catalog = catalog();
    catalog
        .conn()
        .execute(
            "INSERT INTO courses (course_code, course_title, department, credits, description, created_at, updated_at)
             VALUES ('BAD1', 'Broken', 'CS', -1, 'Negative credits', 0, 0)",
            [],
        )
        .unwrap();
    let config = ServerConfig::default();
    let app = create_router(&config).with_state(AppState::new(
        catalog,
        Arc::new(UnconfiguredRecommender),
        config,
    ));
    let target = json!({"course": {
        "courseCode": "CS101",
        "courseTitle": "Intro",
        "department": "CS",
        "credits": 3,
        "semester": "Fall",
        "description": "Programming fundamentals"
    }});

    let (status, body) = send(app, post_json("/api/recommend-courses", &target)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert!(body.get("details").is_none());
}
