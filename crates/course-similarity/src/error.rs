// Similarity engine errors

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Errors raised by the similarity engine
///
/// Scoring itself is total; the only failure is malformed input caught at
/// the ranking entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimilarityError {
    /// A course is missing data the scoring formulas rely on
    #[error("Invalid course data for '{course_code}': {reason}")]
    InvalidCourseData {
        /// Code of the offending course (may be empty)
        course_code: String,

        /// What was wrong with it
        reason: String,
    },
}

impl SimilarityError {
    /// Create an invalid course data error
    pub fn invalid(course_code: impl Into<String>, reason: impl Into<String>) -> Self {
        SimilarityError::InvalidCourseData {
            course_code: course_code.into(),
            reason: reason.into(),
        }
    }
}
