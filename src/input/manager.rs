//! Input manager for loading candidate pools and requirements from disk

use crate::error::{RankerError, Result};
use crate::input::file_detector::FileType;
use crate::processing::qualification::DEFAULT_MAX_QUALIFICATION;
use crate::processing::record::{validate_pool, Candidate, Requirement};
use log::info;
use serde::Deserialize;
use std::path::Path;

pub struct InputManager {
    max_qualification: f64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUALIFICATION)
    }
}

impl InputManager {
    pub fn new(max_qualification: f64) -> Self {
        Self { max_qualification }
    }

    /// Loads and validates a candidate pool. The file holds either a bare
    /// JSON array or a document with a `candidates` array (the only shape
    /// TOML allows).
    pub fn load_candidates(&self, path: &Path) -> Result<Vec<Candidate>> {
        let candidates = match FileType::from_path(path) {
            FileType::Json => {
                let items = match serde_json::from_str::<serde_json::Value>(&read(path)?)? {
                    serde_json::Value::Array(items) => items,
                    serde_json::Value::Object(mut doc) => match doc.remove("candidates") {
                        Some(serde_json::Value::Array(items)) => items,
                        _ => return Err(missing_candidates(path)),
                    },
                    _ => return Err(missing_candidates(path)),
                };
                decode_records(items, serde_json::from_value::<Candidate>)?
            }
            FileType::Toml => {
                let mut doc: toml::Table = read(path)?.parse()?;
                let items = match doc.remove("candidates") {
                    Some(toml::Value::Array(items)) => items,
                    _ => return Err(missing_candidates(path)),
                };
                decode_records(items, |item: toml::Value| Candidate::deserialize(item))?
            }
            FileType::Unknown => return Err(unsupported_format(path)),
        };

        validate_pool(&candidates, self.max_qualification)?;
        info!(
            "Loaded {} candidates from {}",
            candidates.len(),
            path.display()
        );
        Ok(candidates)
    }

    /// Loads and validates a single requirement.
    pub fn load_requirement(&self, path: &Path) -> Result<Requirement> {
        let requirement: Requirement = match FileType::from_path(path) {
            FileType::Json => serde_json::from_str(&read(path)?)?,
            FileType::Toml => toml::from_str(&read(path)?)?,
            FileType::Unknown => return Err(unsupported_format(path)),
        };

        requirement.validate(self.max_qualification)?;
        info!("Loaded requirement '{}' from {}", requirement.title(), path.display());
        Ok(requirement)
    }
}

/// Decodes records one by one so a malformed record is reported with its
/// position in the pool.
fn decode_records<V, E>(
    items: Vec<V>,
    decode: impl Fn(V) -> std::result::Result<Candidate, E>,
) -> Result<Vec<Candidate>>
where
    E: std::fmt::Display,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            decode(item)
                .map_err(|e| RankerError::validation(format!("candidates[{}]", index), e.to_string()))
        })
        .collect()
}

fn read(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(RankerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn missing_candidates(path: &Path) -> RankerError {
    RankerError::InvalidInput(format!(
        "Expected an array of candidates or a `candidates` array: {}",
        path.display()
    ))
}

fn unsupported_format(path: &Path) -> RankerError {
    RankerError::UnsupportedFormat(format!(
        "Expected a .json or .toml file: {}",
        path.display()
    ))
}
