// Candidate ranking

use crate::course::Course;
use crate::criteria::{matched_criteria, MatchedCriterion};
use crate::error::Result;
use crate::similarity::score;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// A scored candidate with its match explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    /// Candidate course
    pub course: Course,

    /// Weighted similarity to the target
    pub similarity: f64,

    /// Labels explaining the match, computed independently of `similarity`
    pub matched_criteria: Vec<MatchedCriterion>,
}

impl SimilarityResult {
    /// Score `candidate` against `target`
    pub fn compute(target: &Course, candidate: &Course) -> Self {
        Self {
            course: candidate.clone(),
            similarity: score(target, candidate),
            matched_criteria: matched_criteria(target, candidate),
        }
    }
}

/// Rank `pool` against `target` and keep the annotations
///
/// Every course is validated before scoring. The target itself (matched by
/// course code) is excluded. Results are sorted by similarity, highest
/// first; equal scores keep their order from `pool`. At most `limit`
/// results are returned.
pub fn rank_scored(target: &Course, pool: &[Course], limit: usize) -> Result<Vec<SimilarityResult>> {
    target.validate()?;
    for candidate in pool {
        candidate.validate()?;
    }

    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut ranked: Vec<SimilarityResult> = pool
        .iter()
        .filter(|candidate| candidate.course_code != target.course_code)
        .map(|candidate| SimilarityResult::compute(target, candidate))
        .collect();

    // sort_by is stable, ties keep pool order
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);

    debug!(
        "Ranked {} of {} candidates for {}",
        ranked.len(),
        pool.len(),
        target.course_code
    );

    Ok(ranked)
}

/// Rank `pool` against `target`, returning only the courses
pub fn rank(target: &Course, pool: &[Course], limit: usize) -> Result<Vec<Course>> {
    Ok(rank_scored(target, pool, limit)?
        .into_iter()
        .map(|result| result.course)
        .collect())
}
