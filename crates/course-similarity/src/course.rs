// Course model shared by the engine, the catalog and the HTTP layer

use crate::error::{Result, SimilarityError};
use serde::{Deserialize, Serialize};

/// Course instructor contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Instructor {
    /// Instructor name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Free-form office hours
    pub office_hours: String,
}

/// A catalog course
///
/// Only `course_code`, `department`, `credits`, `description`,
/// `prerequisites` and `learning_outcomes` take part in scoring. The
/// remaining fields are carried through to clients untouched.
///
/// Code, title, department, credits and description are required when
/// deserializing; the other fields fall back to empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier (e.g. "CS101")
    pub course_code: String,

    /// Display title
    pub course_title: String,

    /// Owning department, compared case-sensitively
    pub department: String,

    /// Offering university
    #[serde(default)]
    pub university: String,

    /// Credit count, may be fractional
    pub credits: f64,

    /// Semester the course is offered in
    #[serde(default)]
    pub semester: String,

    /// Instructor details
    #[serde(default)]
    pub instructor: Instructor,

    /// Free text description
    pub description: String,

    /// Prerequisite course names or codes
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Stated learning outcomes
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
}

impl Course {
    /// Create a course with the given code and every other field empty
    pub fn new(course_code: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            ..Default::default()
        }
    }

    /// Check the fields the scoring formulas depend on
    ///
    /// A blank course code, or credits that are negative or not finite,
    /// would silently corrupt scores, so they are rejected here.
    pub fn validate(&self) -> Result<()> {
        if self.course_code.trim().is_empty() {
            return Err(SimilarityError::invalid(
                &self.course_code,
                "course code must not be empty",
            ));
        }

        if !self.credits.is_finite() {
            return Err(SimilarityError::invalid(
                &self.course_code,
                format!("credits must be a finite number, got {}", self.credits),
            ));
        }

        if self.credits < 0.0 {
            return Err(SimilarityError::invalid(
                &self.course_code,
                format!("credits must not be negative, got {}", self.credits),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_deserialize_camel_case() {
        let json = r#"{
            "courseCode": "CS101",
            "courseTitle": "Intro to Programming",
            "department": "Computer Science",
            "credits": 3,
            "semester": "Fall",
            "instructor": {"name": "Ada", "email": "ada@example.edu", "officeHours": "Mon 10-12"},
            "description": "Programming fundamentals",
            "prerequisites": ["MATH100"],
            "learningOutcomes": ["Write programs"]
        }"#;

        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.course_code, "CS101");
        assert_eq!(course.credits, 3.0);
        assert_eq!(course.instructor.office_hours, "Mon 10-12");
        assert_eq!(course.prerequisites, vec!["MATH100".to_string()]);
        assert_eq!(course.learning_outcomes, vec!["Write programs".to_string()]);
    }

    #[test]
    fn test_course_missing_optional_fields_default_to_empty() {
        let json = r#"{
            "courseCode": "CS101",
            "courseTitle": "Intro",
            "department": "CS",
            "credits": 3,
            "description": "Programming fundamentals"
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert!(course.prerequisites.is_empty());
        assert!(course.learning_outcomes.is_empty());
        assert_eq!(course.university, "");
        assert_eq!(course.semester, "");
        assert_eq!(course.instructor, Instructor::default());
    }

    #[test]
    fn test_course_missing_required_fields_rejected() {
        let base = serde_json::json!({
            "courseCode": "CS101",
            "courseTitle": "Intro",
            "department": "CS",
            "credits": 3,
            "description": "Programming fundamentals"
        });
        for field in ["courseCode", "courseTitle", "department", "credits", "description"] {
            let mut partial = base.clone();
            partial.as_object_mut().unwrap().remove(field);
            let err = serde_json::from_value::<Course>(partial).unwrap_err();
            assert!(err.to_string().contains(field), "{}: {}", field, err);
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_course() {
        let mut course = Course::new("CS101");
        course.credits = 4.0;
        assert!(course.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_code() {
        let course = Course::new("   ");
        assert!(matches!(
            course.validate(),
            Err(SimilarityError::InvalidCourseData { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_credits() {
        let mut course = Course::new("CS101");
        course.credits = -1.0;
        let err = course.validate().unwrap_err();
        assert!(err.to_string().contains("CS101"));
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_validate_rejects_nan_credits() {
        let mut course = Course::new("CS101");
        course.credits = f64::NAN;
        assert!(course.validate().is_err());
    }
}
