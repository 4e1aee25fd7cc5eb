//! API response types matching the catalog client contract

use crate::recommend::RecommendationMethod;
use coursimil::Course;
use serde::{Deserialize, Serialize};

/// Request body of the recommendation endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRequest {
    /// Course to find recommendations for
    #[serde(default)]
    pub course: Option<Course>,
}

/// Short echo of the course a recommendation was made for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputCourseSummary {
    /// Course code
    pub course_code: String,

    /// Course title
    pub course_title: String,

    /// Department
    pub department: String,
}

impl From<&Course> for InputCourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            course_code: course.course_code.clone(),
            course_title: course.course_title.clone(),
            department: course.department.clone(),
        }
    }
}

/// Response for the recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    /// Success flag
    pub success: bool,

    /// Course the recommendations are for
    pub input_course: InputCourseSummary,

    /// Recommended courses, best first
    pub recommendations: Vec<Course>,

    /// Recommendations left after the semester filter, before truncation
    pub total_found: usize,

    /// Strategy that produced the list
    pub recommendation_method: RecommendationMethod,
}

/// Response for course list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    /// Success flag
    pub success: bool,

    /// First page of courses
    pub courses: Vec<Course>,

    /// Total courses in the catalog
    pub total: usize,
}

/// Response for single course endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetailResponse {
    /// Success flag
    pub success: bool,

    /// Course data
    pub course: Course,
}

/// Status of backing services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// "connected" or "unavailable"
    pub database: String,

    /// "configured" or "not configured"
    pub personalize: String,
}

/// Response for health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status
    pub status: String,

    /// RFC 3339 timestamp of the check
    pub timestamp: String,

    /// Backing service status
    pub services: ServiceStatus,
}
