//! Shortlist policy applied by collaborators on top of a ranking

use crate::processing::ranker::ScoredCandidate;
use log::info;
use serde::{Deserialize, Serialize};

/// Keeps ranked entries whose skill score is strictly above `min_skill_score`.
/// With the default of 0 a candidate needs at least one exact or partial
/// skill overlap. The shortlist is rebuilt from a fresh ranking every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistPolicy {
    pub min_skill_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Default for ShortlistPolicy {
    fn default() -> Self {
        Self {
            min_skill_score: 0.0,
            limit: None,
        }
    }
}

impl ShortlistPolicy {
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn admits(&self, entry: &ScoredCandidate<'_>) -> bool {
        entry.skill_score > self.min_skill_score
    }

    /// Filters a ranking, preserving its order.
    pub fn apply<'a>(&self, ranked: &[ScoredCandidate<'a>]) -> Vec<ScoredCandidate<'a>> {
        let shortlist: Vec<ScoredCandidate<'a>> = ranked
            .iter()
            .filter(|entry| self.admits(entry))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        info!(
            "Shortlisted {} of {} ranked candidates (skill score > {})",
            shortlist.len(),
            ranked.len(),
            self.min_skill_score
        );
        shortlist
    }
}
