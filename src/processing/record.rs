//! Candidate and requirement records supplied by the persistence layer

use crate::error::{RankerError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A candidate as loaded from the pool. Immutable for the duration of a ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(alias = "student_id", deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Comma-separated, case-insensitive skill list
    #[serde(default)]
    pub skills: String,

    /// Qualification metric on the configured scale (CGPA out of 10 by default)
    #[serde(alias = "cgpa", deserialize_with = "deserialize_qualification")]
    pub qualification: f64,

    /// Category label, e.g. academic branch
    #[serde(default, alias = "branch")]
    pub category: String,
}

/// A job requirement the pool is ranked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, alias = "company_name", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Comma-separated required skills; empty means no skill constraint
    #[serde(default)]
    pub required_skills: String,

    #[serde(alias = "min_cgpa", deserialize_with = "deserialize_min_qualification")]
    pub min_qualification: f64,

    /// Empty or absent means no preference
    #[serde(default, alias = "branch_pref")]
    pub preferred_category: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(text) => text,
        IdRepr::Number(n) => n.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MetricRepr {
    Number(f64),
    Other(serde_json::Value),
}

fn deserialize_qualification<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_metric(deserializer, "qualification")
}

fn deserialize_min_qualification<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_metric(deserializer, "min_qualification")
}

/// Reads a numeric metric; any other value is rejected with an error naming `field`.
fn deserialize_metric<'de, D>(deserializer: D, field: &str) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match MetricRepr::deserialize(deserializer)? {
        MetricRepr::Number(value) => Ok(value),
        MetricRepr::Other(other) => Err(D::Error::custom(format!(
            "{} must be a number, got {}",
            field, other
        ))),
    }
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        skills: impl Into<String>,
        qualification: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            phone: None,
            skills: skills.into(),
            qualification,
            category: category.into(),
        }
    }

    pub fn with_contact(
        mut self,
        name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        self.name = Some(name.into());
        self.email = email;
        self.phone = phone;
        self
    }

    /// Name to show in reports, falling back to the identifier
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Boundary check run before a candidate reaches the scorer.
    pub fn validate(&self, max_qualification: f64) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(RankerError::validation("id", "candidate identifier is empty"));
        }
        check_on_scale(
            &format!("candidates[{}].qualification", self.id),
            self.qualification,
            max_qualification,
        )
    }

    pub fn skill_set(&self) -> BTreeSet<String> {
        parse_skill_set(&self.skills)
    }
}

impl Requirement {
    pub fn new(required_skills: impl Into<String>, min_qualification: f64) -> Self {
        Self {
            id: None,
            company: None,
            description: None,
            required_skills: required_skills.into(),
            min_qualification,
            preferred_category: None,
        }
    }

    pub fn with_preferred_category(mut self, category: impl Into<String>) -> Self {
        self.preferred_category = Some(category.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn validate(&self, max_qualification: f64) -> Result<()> {
        check_on_scale("min_qualification", self.min_qualification, max_qualification)
    }

    pub fn skill_set(&self) -> BTreeSet<String> {
        parse_skill_set(&self.required_skills)
    }

    /// The preferred category, or `None` when it is absent or blank
    pub fn category_preference(&self) -> Option<&str> {
        self.preferred_category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn title(&self) -> String {
        match (&self.company, &self.id) {
            (Some(company), _) => company.clone(),
            (None, Some(id)) => format!("Requirement {}", id),
            (None, None) => "Requirement".to_string(),
        }
    }
}

/// Validates every candidate and rejects duplicate identifiers in the pool.
pub fn validate_pool(candidates: &[Candidate], max_qualification: f64) -> Result<()> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        candidate.validate(max_qualification)?;
        if !seen.insert(candidate.id.as_str()) {
            return Err(RankerError::validation(
                "id",
                format!("duplicate candidate identifier '{}'", candidate.id),
            ));
        }
    }
    Ok(())
}

/// Splits a comma-separated skill list into trimmed, lower-cased tokens.
/// Blank tokens are dropped, so an empty string yields an empty set.
pub fn parse_skill_set(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

fn check_on_scale(field: &str, value: f64, max: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RankerError::validation(field, "value is not a finite number"));
    }
    if value < 0.0 || value > max {
        return Err(RankerError::validation(
            field,
            format!("{} is outside the scale 0..={}", value, max),
        ));
    }
    Ok(())
}
