//! Candidate ranker library
//!
//! Scores candidates against a job requirement with a fixed, deterministic
//! formula (50% skill coverage, 30% qualification, 20% category affinity)
//! and ranks a pool by the result.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, RankerError};
pub use config::Config;
pub use processing::category::CategoryTable;
pub use processing::qualification::qualification_score;
pub use processing::ranker::{Ranker, ScoredCandidate};
pub use processing::record::{Candidate, Requirement};
pub use processing::scorer::{round_to_cents, FitScore, FitScorer, ScoreBreakdown};
pub use processing::shortlist::ShortlistPolicy;
pub use processing::skills::skill_match_score;
