//! Required-skill coverage scoring with exact and partial (substring) matches

use crate::processing::record::parse_skill_set;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Credit given to a required skill that only matches by substring
pub const PARTIAL_MATCH_CREDIT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialMatch {
    pub required: String,
    pub candidate: String,
}

/// Outcome of matching a candidate's skills against the required set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub score: f64,
    pub exact: Vec<String>,
    pub partial: Vec<PartialMatch>,
    pub missing: Vec<String>,
}

/// Skill sub-score in [0, 100] for two comma-separated skill lists.
pub fn skill_match_score(candidate_skills: &str, required_skills: &str) -> f64 {
    match_skills(candidate_skills, required_skills).score
}

pub fn match_skills(candidate_skills: &str, required_skills: &str) -> SkillMatch {
    match_skill_sets(
        &parse_skill_set(candidate_skills),
        &parse_skill_set(required_skills),
    )
}

/// Exact matches earn full credit. Each remaining required skill earns
/// `PARTIAL_MATCH_CREDIT` when it and some candidate token contain one another;
/// the first such token wins.
pub fn match_skill_sets(candidate: &BTreeSet<String>, required: &BTreeSet<String>) -> SkillMatch {
    if required.is_empty() {
        return SkillMatch {
            score: 100.0,
            exact: Vec::new(),
            partial: Vec::new(),
            missing: Vec::new(),
        };
    }

    let exact: Vec<String> = required.intersection(candidate).cloned().collect();
    let mut partial = Vec::new();
    let mut missing = Vec::new();

    for req_skill in required.difference(candidate) {
        let hit = candidate.iter().find(|cand_skill| {
            cand_skill.contains(req_skill.as_str()) || req_skill.contains(cand_skill.as_str())
        });

        match hit {
            Some(cand_skill) => partial.push(PartialMatch {
                required: req_skill.clone(),
                candidate: cand_skill.clone(),
            }),
            None => missing.push(req_skill.clone()),
        }
    }

    let required_len = required.len() as f64;
    let exact_score = exact.len() as f64 / required_len * 100.0;
    let partial_score = partial.len() as f64 * PARTIAL_MATCH_CREDIT / required_len * 100.0;
    let score = (exact_score + partial_score).min(100.0);
    debug_assert!((0.0..=100.0).contains(&score), "skill score out of range: {}", score);

    SkillMatch {
        score,
        exact,
        partial,
        missing,
    }
}
