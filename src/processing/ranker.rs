//! Ranks a candidate pool against one requirement

use crate::processing::record::{Candidate, Requirement};
use crate::processing::scorer::{FitScore, FitScorer};
use log::{debug, info, warn};
use serde::Serialize;
use std::cmp::Ordering;

/// One candidate with its scores from a single ranking pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a Candidate,
    pub fit_score: f64,
    pub skill_score: f64,
}

impl<'a> ScoredCandidate<'a> {
    pub fn new(candidate: &'a Candidate, score: FitScore) -> Self {
        Self {
            candidate,
            fit_score: score.fit_score,
            skill_score: score.skill_score,
        }
    }
}

pub struct Ranker {
    scorer: FitScorer,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(FitScorer::default())
    }
}

impl Ranker {
    pub fn new(scorer: FitScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &FitScorer {
        &self.scorer
    }

    /// Scores every candidate and orders them by fit score, highest first.
    /// Nothing is filtered. Ties fall back to ascending candidate identifier:
    /// numeric identifiers compare by value ("9" before "10") and sort ahead
    /// of textual ones, which compare lexicographically.
    pub fn rank<'a>(
        &self,
        candidates: &'a [Candidate],
        requirement: &Requirement,
    ) -> Vec<ScoredCandidate<'a>> {
        if candidates.is_empty() {
            warn!("Ranking requested for an empty candidate pool");
            return Vec::new();
        }

        let mut ranked: Vec<ScoredCandidate<'a>> = candidates
            .iter()
            .map(|candidate| {
                let score = self.scorer.score(candidate, requirement);
                debug!(
                    "Scored candidate {}: fit={:.2} skill={:.2}",
                    candidate.id, score.fit_score, score.skill_score
                );
                ScoredCandidate::new(candidate, score)
            })
            .collect();

        ranked.sort_by(compare_ranked);

        info!(
            "Ranked {} candidates for {}",
            ranked.len(),
            requirement.title()
        );
        ranked
    }
}

fn compare_ranked(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.fit_score
        .total_cmp(&a.fit_score)
        .then_with(|| id_key(&a.candidate.id).cmp(&id_key(&b.candidate.id)))
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum IdKey<'a> {
    Numeric(u64, &'a str),
    Text(&'a str),
}

fn id_key(id: &str) -> IdKey<'_> {
    match id.parse::<u64>() {
        Ok(value) => IdKey::Numeric(value, id),
        Err(_) => IdKey::Text(id),
    }
}
