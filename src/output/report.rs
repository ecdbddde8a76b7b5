//! Report structures built from a ranking pass

use crate::processing::ranker::ScoredCandidate;
use crate::processing::record::{Candidate, Requirement};
use crate::processing::scorer::{FitScorer, ScoreBreakdown};
use crate::processing::shortlist::ShortlistPolicy;
use crate::processing::skills::PartialMatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ranked output handed to the formatters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    pub requirement: Requirement,
    pub entries: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the full ranking
    pub rank: usize,
    pub candidate: Candidate,
    pub fit_score: f64,
    pub skill_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EntryDetails>,
}

/// Sub-scores and skill evidence, present in detailed reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDetails {
    pub qualification_score: f64,
    pub category_score: f64,
    pub matched_skills: Vec<String>,
    pub partial_skills: Vec<PartialMatch>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub ranker_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_file: Option<String>,
    pub candidates_scored: usize,
    /// Policy used to filter the entries, `None` when the full ranking is listed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortlist: Option<ShortlistPolicy>,
}

impl From<ScoreBreakdown> for EntryDetails {
    fn from(breakdown: ScoreBreakdown) -> Self {
        Self {
            qualification_score: breakdown.qualification_score,
            category_score: breakdown.category_score,
            matched_skills: breakdown.skills.exact,
            partial_skills: breakdown.skills.partial,
            missing_skills: breakdown.skills.missing,
        }
    }
}

impl RankingReport {
    /// Builds a report from a full ranking, optionally filtered by a shortlist policy.
    /// `scorer` is only consulted when `detailed` is set.
    pub fn from_ranking(
        requirement: &Requirement,
        ranked: &[ScoredCandidate<'_>],
        shortlist: Option<&ShortlistPolicy>,
        scorer: &FitScorer,
        detailed: bool,
    ) -> Self {
        let entries = ranked
            .iter()
            .enumerate()
            .filter(|(_, entry)| shortlist.map_or(true, |policy| policy.admits(entry)))
            .take(shortlist.and_then(|policy| policy.limit).unwrap_or(usize::MAX))
            .map(|(index, entry)| RankedEntry {
                rank: index + 1,
                candidate: entry.candidate.clone(),
                fit_score: entry.fit_score,
                skill_score: entry.skill_score,
                details: detailed
                    .then(|| scorer.breakdown(entry.candidate, requirement).into()),
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                ranker_version: env!("CARGO_PKG_VERSION").to_string(),
                candidates_file: None,
                requirement_file: None,
                candidates_scored: ranked.len(),
                shortlist: shortlist.cloned(),
            },
            requirement: requirement.clone(),
            entries,
        }
    }

    pub fn with_sources(mut self, candidates_file: &str, requirement_file: &str) -> Self {
        self.metadata.candidates_file = Some(candidates_file.to_string());
        self.metadata.requirement_file = Some(requirement_file.to_string());
        self
    }

    pub fn is_shortlist(&self) -> bool {
        self.metadata.shortlist.is_some()
    }

    pub fn top(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }
}
