//! Composite fit scoring: skill coverage, qualification and category affinity

use crate::processing::category::CategoryTable;
use crate::processing::qualification::{qualification_score, DEFAULT_MAX_QUALIFICATION};
use crate::processing::record::{Candidate, Requirement};
use crate::processing::skills::{match_skill_sets, SkillMatch};
use serde::{Deserialize, Serialize};

/// Fixed weights of the three sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub qualification: f64,
    pub category: f64,
}

pub const FIT_WEIGHTS: ScoreWeights = ScoreWeights {
    skills: 0.5,
    qualification: 0.3,
    category: 0.2,
};

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.qualification + self.category
    }
}

/// Result handed to collaborators: the composite plus the skill sub-score,
/// which shortlist policies gate on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitScore {
    pub fit_score: f64,
    pub skill_score: f64,
}

/// Every sub-score behind a fit score, for detailed reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub fit_score: f64,
    pub skill_score: f64,
    pub qualification_score: f64,
    pub category_score: f64,
    pub skills: SkillMatch,
}

impl ScoreBreakdown {
    pub fn fit(&self) -> FitScore {
        FitScore {
            fit_score: self.fit_score,
            skill_score: self.skill_score,
        }
    }
}

/// Pure scorer. Holds only immutable configuration, so the same inputs
/// always produce the same score.
#[derive(Debug, Clone)]
pub struct FitScorer {
    categories: CategoryTable,
    max_qualification: f64,
}

impl Default for FitScorer {
    fn default() -> Self {
        Self::new(CategoryTable::default(), DEFAULT_MAX_QUALIFICATION)
    }
}

impl FitScorer {
    pub fn new(categories: CategoryTable, max_qualification: f64) -> Self {
        Self {
            categories,
            max_qualification,
        }
    }

    pub fn score(&self, candidate: &Candidate, requirement: &Requirement) -> FitScore {
        self.breakdown(candidate, requirement).fit()
    }

    pub fn breakdown(&self, candidate: &Candidate, requirement: &Requirement) -> ScoreBreakdown {
        let skills = match_skill_sets(&candidate.skill_set(), &requirement.skill_set());
        let qualification = qualification_score(
            candidate.qualification,
            requirement.min_qualification,
            self.max_qualification,
        );
        let category = self
            .categories
            .affinity(&candidate.category, requirement.category_preference());

        let weighted = skills.score * FIT_WEIGHTS.skills
            + qualification * FIT_WEIGHTS.qualification
            + category * FIT_WEIGHTS.category;
        debug_assert!(
            (0.0..=100.0 + 1e-9).contains(&weighted),
            "fit score out of range: {}",
            weighted
        );
        let fit_score = round_to_cents(weighted.clamp(0.0, 100.0));

        ScoreBreakdown {
            fit_score,
            skill_score: skills.score,
            qualification_score: qualification,
            category_score: category,
            skills,
        }
    }
}

/// Rounds to two decimal places, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
