//! Category affinity scoring against a configurable table of related groups

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const EXACT_CATEGORY_SCORE: f64 = 100.0;
pub const RELATED_CATEGORY_SCORE: f64 = 70.0;
pub const UNRELATED_CATEGORY_SCORE: f64 = 0.0;

/// Groups of category labels that count as related to each other.
/// Labels are stored trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    groups: Vec<BTreeSet<String>>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::from_groups(default_related_groups())
    }
}

/// Related groups shipped with the default configuration
pub fn default_related_groups() -> Vec<Vec<String>> {
    [
        &["computer science", "information technology", "software engineering"][..],
        &["electronics", "electrical", "communication"][..],
        &["mechanical", "automobile", "production"][..],
    ]
    .iter()
    .map(|group| group.iter().map(|s| s.to_string()).collect())
    .collect()
}

impl CategoryTable {
    pub fn from_groups<G, S>(groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = groups
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|label| normalize_category(label.as_ref()))
                    .filter(|label| !label.is_empty())
                    .collect::<BTreeSet<_>>()
            })
            .filter(|group| !group.is_empty())
            .collect();
        Self { groups }
    }

    pub fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn groups(&self) -> &[BTreeSet<String>] {
        &self.groups
    }

    pub fn are_related(&self, a: &str, b: &str) -> bool {
        let a = normalize_category(a);
        let b = normalize_category(b);
        self.groups
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
    }

    /// Category sub-score: one of 0, 70 or 100.
    pub fn affinity(&self, candidate_category: &str, preferred: Option<&str>) -> f64 {
        let preferred = match preferred.map(normalize_category) {
            Some(p) if !p.is_empty() => p,
            _ => return EXACT_CATEGORY_SCORE,
        };
        let candidate = normalize_category(candidate_category);

        if candidate == preferred {
            EXACT_CATEGORY_SCORE
        } else if self
            .groups
            .iter()
            .any(|group| group.contains(&candidate) && group.contains(&preferred))
        {
            RELATED_CATEGORY_SCORE
        } else {
            UNRELATED_CATEGORY_SCORE
        }
    }
}

fn normalize_category(label: &str) -> String {
    label.trim().to_lowercase()
}
