// coursimil - Course Similarity Engine
//
// Content-based scoring and ranking of candidate courses against a target course

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

//! Content-based course similarity.
//!
//! The engine is a set of pure functions: [`score`] weighs five attributes of a
//! candidate against a target, [`matched_criteria`] explains a pairing in plain
//! labels, and [`rank`] orders a candidate pool by score.

/// Course model and input validation
pub mod course;

/// Engine error types
pub mod error;

/// Match explanation labels
pub mod criteria;

/// Ranking of candidate pools
pub mod ranking;

/// Weighted attribute similarity
pub mod similarity;

pub use course::{Course, Instructor};
pub use criteria::{matched_criteria, MatchedCriterion};
pub use error::{Result, SimilarityError};
pub use ranking::{rank, rank_scored, SimilarityResult};
pub use similarity::{array_similarity, score, text_similarity, ScoreBreakdown, Weights, WEIGHTS};
