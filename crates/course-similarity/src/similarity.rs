// Weighted multi-attribute similarity

use crate::course::Course;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Runs of characters outside `[A-Za-z0-9_]` separate words
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("word separator pattern is valid"));

/// Description words shorter than this are ignored when scoring
const MIN_SIGNIFICANT_WORD_LEN: usize = 4;

/// Per-attribute weights of the similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Exact department match
    pub department: f64,

    /// Credit count closeness
    pub credits: f64,

    /// Description word overlap
    pub description: f64,

    /// Prerequisite overlap
    pub prerequisites: f64,

    /// Learning outcome overlap
    pub learning_outcomes: f64,
}

impl Weights {
    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.department + self.credits + self.description + self.prerequisites + self.learning_outcomes
    }
}

/// Fixed scoring weights, summing to 1.0
pub const WEIGHTS: Weights = Weights {
    department: 0.3,
    credits: 0.1,
    description: 0.4,
    prerequisites: 0.1,
    learning_outcomes: 0.1,
};

/// Unweighted sub-scores of one target/candidate pairing, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Department sub-score
    pub department: f64,

    /// Credits sub-score
    pub credits: f64,

    /// Description sub-score
    pub description: f64,

    /// Prerequisites sub-score
    pub prerequisites: f64,

    /// Learning outcomes sub-score
    pub learning_outcomes: f64,
}

impl ScoreBreakdown {
    /// Compute every sub-score of `candidate` against `target`
    pub fn between(target: &Course, candidate: &Course) -> Self {
        Self {
            department: department_similarity(&target.department, &candidate.department),
            credits: credit_similarity(target.credits, candidate.credits),
            description: text_similarity(&target.description, &candidate.description),
            prerequisites: array_similarity(&target.prerequisites, &candidate.prerequisites),
            learning_outcomes: array_similarity(
                &target.learning_outcomes,
                &candidate.learning_outcomes,
            ),
        }
    }

    /// Weighted sum of the sub-scores
    pub fn weighted(&self, weights: &Weights) -> f64 {
        self.department * weights.department
            + self.credits * weights.credits
            + self.description * weights.description
            + self.prerequisites * weights.prerequisites
            + self.learning_outcomes * weights.learning_outcomes
    }
}

/// Similarity of `candidate` to `target` under [`WEIGHTS`]
///
/// No normalization is applied to the weighted sum. Each sub-score is
/// bounded by 1, so the result lies in [0, 1].
pub fn score(target: &Course, candidate: &Course) -> f64 {
    ScoreBreakdown::between(target, candidate).weighted(&WEIGHTS)
}

fn department_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        1.0
    } else {
        0.0
    }
}

fn credit_similarity(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    if diff == 0.0 {
        1.0
    } else if diff == 1.0 {
        0.5
    } else {
        0.0
    }
}

/// Lower-case `text` and split it into words, dropping empty fragments
pub(crate) fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .split(&lowered)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn significant_words(text: &str) -> HashSet<String> {
    words(text)
        .into_iter()
        .filter(|word| word.len() >= MIN_SIGNIFICANT_WORD_LEN)
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Jaccard similarity of the significant words of two descriptions
///
/// Words of three characters or fewer are discarded. Two texts with no
/// significant words score 0.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    jaccard(&significant_words(a), &significant_words(b))
}

/// Case-insensitive Jaccard similarity of two string sets
///
/// Two empty sets are identical (1.0); an empty set against a non-empty one
/// shares nothing (0.0).
pub fn array_similarity(a: &[String], b: &[String]) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let a: HashSet<String> = a.iter().map(|item| item.to_lowercase()).collect();
    let b: HashSet<String> = b.iter().map(|item| item.to_lowercase()).collect();
    jaccard(&a, &b)
}
