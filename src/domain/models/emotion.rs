use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::errors::{AppError, Result};

/// Emotion label to score mapping returned by the prediction endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionResult(pub BTreeMap<String, f64>);

impl EmotionResult {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest scoring label, if any
    pub fn dominant(&self) -> Option<(&str, f64)> {
        self.0
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(label, score)| (label.as_str(), *score))
    }
}

impl<const N: usize> From<[(&str, f64); N]> for EmotionResult {
    fn from(pairs: [(&str, f64); N]) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Body of a successful prediction response.
///
/// Only `emotions` is required; other top-level fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub emotions: EmotionResult,
}

impl PredictionResponse {
    /// Decode and validate a raw response body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| AppError::Decode(e.to_string()))
    }
}
