//! Recommendation orchestration
//!
//! RemoteAttempt -> LocalFallback: the collaborative recommender is asked
//! first; if it yields no usable courses the similarity engine ranks the
//! full catalog instead.

use crate::error::{ApiError, ApiResult};
use crate::remote::{CollaborativeRecommender, RemoteOutcome};
use coursecat::{Catalog, CourseStore};
use coursimil::Course;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Which strategy produced a recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationMethod {
    /// Collaborative recommender
    Personalize,

    /// Local similarity engine
    ContentBased,
}

/// Ranked recommendations before client-facing filtering
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    /// Courses, best first
    pub courses: Vec<Course>,

    /// Strategy that produced them
    pub method: RecommendationMethod,
}

/// Outcome of the remote attempt once codes are resolved to courses
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteAttempt {
    /// Remote recommendations that exist in the catalog
    Found(Vec<Course>),

    /// Nothing usable came back
    Empty,

    /// The recommender or catalog lookup failed
    Failed(String),
}

/// Lock the catalog, mapping a poisoned lock to an internal error
pub(crate) fn lock_catalog(catalog: &Mutex<Catalog>) -> ApiResult<std::sync::MutexGuard<'_, Catalog>> {
    catalog
        .lock()
        .map_err(|_| ApiError::internal("Course catalog lock poisoned"))
}

/// Ask the recommender and resolve its codes against the catalog
pub async fn remote_attempt(
    target: &Course,
    recommender: &dyn CollaborativeRecommender,
    catalog: &Mutex<Catalog>,
    num_results: usize,
) -> RemoteAttempt {
    let codes = match recommender.recommend(&target.course_code, num_results).await {
        RemoteOutcome::Items(codes) => codes,
        RemoteOutcome::Empty => return RemoteAttempt::Empty,
        RemoteOutcome::Failed(reason) => return RemoteAttempt::Failed(reason),
    };

    let resolved = match lock_catalog(catalog) {
        Ok(mut guard) => CourseStore::new(&mut guard).get_by_codes(&codes).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match resolved {
        Ok(courses) if courses.is_empty() => RemoteAttempt::Empty,
        Ok(courses) => RemoteAttempt::Found(courses),
        Err(reason) => RemoteAttempt::Failed(reason),
    }
}

/// Rank the whole catalog against `target` with the similarity engine
pub fn local_fallback(target: &Course, catalog: &Mutex<Catalog>, limit: usize) -> ApiResult<Vec<Course>> {
    let pool = {
        let mut guard = lock_catalog(catalog)?;
        CourseStore::new(&mut guard).get_all()?
    };

    // Target checked first, so rank_scored can only reject a stored course
    target.validate()?;
    let ranked = coursimil::rank_scored(target, &pool, limit).map_err(|e| {
        error!("Catalog holds an invalid course: {}", e);
        ApiError::internal("Course catalog contains invalid data").with_details(e.to_string())
    })?;
    for result in &ranked {
        debug!(
            "{} -> {} similarity={:.3} criteria={:?}",
            target.course_code, result.course.course_code, result.similarity, result.matched_criteria
        );
    }

    Ok(ranked.into_iter().map(|result| result.course).collect())
}

/// Produce recommendations for `target`
///
/// The single decision point: remote results are used when found, anything
/// else falls back to the similarity engine.
pub async fn recommend(
    target: &Course,
    recommender: &dyn CollaborativeRecommender,
    catalog: &Mutex<Catalog>,
    limit: usize,
) -> ApiResult<Recommendations> {
    match remote_attempt(target, recommender, catalog, limit).await {
        RemoteAttempt::Found(courses) => {
            info!("Using collaborative recommendations for {}", target.course_code);
            Ok(Recommendations {
                courses,
                method: RecommendationMethod::Personalize,
            })
        }
        attempt => {
            if let RemoteAttempt::Failed(reason) = &attempt {
                warn!("Personalize not available ({}), falling back to content-based filtering", reason);
            }
            info!("Using content-based filtering for {}", target.course_code);
            Ok(Recommendations {
                courses: local_fallback(target, catalog, limit)?,
                method: RecommendationMethod::ContentBased,
            })
        }
    }
}

/// Drop courses offered in the same semester as `target`
pub fn drop_same_semester(target: &Course, courses: Vec<Course>) -> Vec<Course> {
    courses
        .into_iter()
        .filter(|course| course.semester != target.semester)
        .collect()
}
