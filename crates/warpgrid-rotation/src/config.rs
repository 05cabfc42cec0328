//! Rotation configuration (TOML).
//!
//! ```toml
//! default_weight = 0
//!
//! [[entries]]
//! value = "10.0.0.1:8080"
//! weight = 2
//!
//! [[entries]]
//! value = "10.0.0.2:8080"
//! ```
//!
//! Weights are read as signed integers so that a negative weight is
//! reported as a configuration error instead of a parse failure.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::DEFAULT_WEIGHT;
use crate::error::{RotationError, RotationResult};
use crate::rotation::Rotation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RotationConfig<T> {
    /// Weight for entries that do not set one.
    #[serde(default = "default_weight")]
    pub default_weight: i64,
    /// Entries in rotation order.
    #[serde(default)]
    pub entries: Vec<EntryConfig<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryConfig<T> {
    pub value: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

fn default_weight() -> i64 {
    i64::from(DEFAULT_WEIGHT)
}

impl<T> RotationConfig<T> {
    /// Pair `values` with optional per-position `weights`.
    ///
    /// Fails with `InvalidArgument` when `weights` is given with a
    /// different length than `values`.
    pub fn from_parts(values: Vec<T>, weights: Option<Vec<i64>>) -> RotationResult<Self> {
        let entries = match weights {
            Some(weights) => {
                if weights.len() != values.len() {
                    return Err(RotationError::InvalidArgument(format!(
                        "{} weights given for {} values",
                        weights.len(),
                        values.len()
                    )));
                }
                values
                    .into_iter()
                    .zip(weights)
                    .map(|(value, weight)| EntryConfig {
                        value,
                        weight: Some(weight),
                    })
                    .collect()
            }
            None => values
                .into_iter()
                .map(|value| EntryConfig {
                    value,
                    weight: None,
                })
                .collect(),
        };

        Ok(Self {
            default_weight: default_weight(),
            entries,
        })
    }

    /// Validate weights and construct the rotation in entry order.
    pub fn build(self) -> RotationResult<Rotation<T>> {
        let default = self.default_weight;
        let mut values = Vec::with_capacity(self.entries.len());
        let mut weights = Vec::with_capacity(self.entries.len());

        for (index, entry) in self.entries.into_iter().enumerate() {
            let weight = entry.weight.unwrap_or(default);
            weights.push(checked_weight(index, weight)?);
            values.push(entry.value);
        }

        debug!(entries = values.len(), "building rotation from config");
        Rotation::with_weights(values, weights)
    }
}

impl<T: DeserializeOwned> RotationConfig<T> {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(?path, entries = config.entries.len(), "rotation config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl<T: Serialize> RotationConfig<T> {
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn checked_weight(index: usize, weight: i64) -> RotationResult<u32> {
    if weight < 0 {
        return Err(RotationError::InvalidArgument(format!(
            "entry {index} has negative weight {weight}"
        )));
    }
    u32::try_from(weight).map_err(|_| {
        RotationError::InvalidArgument(format!("entry {index} weight {weight} is too large"))
    })
}
