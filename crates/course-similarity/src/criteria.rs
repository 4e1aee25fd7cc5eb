// Human-readable explanations of why a candidate matched

use crate::course::Course;
use crate::similarity::words;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Shared description words needed for a content match (exclusive)
const SHARED_WORDS_THRESHOLD: usize = 2;

/// Maximum credit difference still considered similar
const SIMILAR_CREDITS_MAX_DIFF: f64 = 1.0;

/// Explanation label attached to a ranked candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchedCriterion {
    /// Departments are exactly equal
    #[serde(rename = "Same Department")]
    SameDepartment,

    /// Credits differ by at most one
    #[serde(rename = "Similar Credits")]
    SimilarCredits,

    /// Descriptions share more than two words
    #[serde(rename = "Similar Content")]
    SimilarContent,
}

impl MatchedCriterion {
    /// Return the display label of the criterion.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedCriterion::SameDepartment => "Same Department",
            MatchedCriterion::SimilarCredits => "Similar Credits",
            MatchedCriterion::SimilarContent => "Similar Content",
        }
    }
}

impl fmt::Display for MatchedCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explain why `candidate` resembles `target`
///
/// Criteria are evaluated in a fixed order (department, credits, content)
/// and are independent of the numeric score: a candidate may carry labels
/// and still score below one that carries none.
pub fn matched_criteria(target: &Course, candidate: &Course) -> Vec<MatchedCriterion> {
    let mut criteria = Vec::new();

    if target.department == candidate.department {
        criteria.push(MatchedCriterion::SameDepartment);
    }

    if (target.credits - candidate.credits).abs() <= SIMILAR_CREDITS_MAX_DIFF {
        criteria.push(MatchedCriterion::SimilarCredits);
    }

    if shared_word_count(&target.description, &candidate.description) > SHARED_WORDS_THRESHOLD {
        criteria.push(MatchedCriterion::SimilarContent);
    }

    criteria
}

/// Count words of `target` (with repetition) that also occur in `candidate`
fn shared_word_count(target: &str, candidate: &str) -> usize {
    let candidate_words: HashSet<String> = words(candidate).into_iter().collect();
    words(target)
        .iter()
        .filter(|word| candidate_words.contains(*word))
        .count()
}
