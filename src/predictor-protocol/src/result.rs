//! Typed prediction outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::predict::{ConfidenceTier, ExplainResponse, Impact};

/// Binary class predicted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedLabel {
    Failure,
    Success,
}

impl PredictedLabel {
    /// Map the wire value (1 = success, anything else = failure).
    pub fn from_wire(value: u8) -> Self {
        if value == 1 {
            PredictedLabel::Success
        } else {
            PredictedLabel::Failure
        }
    }
}

/// A factor that contributed to the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopFactor {
    pub label: String,
    pub weight: f64,
    pub impact: Impact,
}

/// Result shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub success_probability: f64,
    pub predicted_label: PredictedLabel,
    pub model_name: String,
    pub confidence: ConfidenceTier,
    pub feature_importances: BTreeMap<String, f64>,
    pub top_factors: Vec<TopFactor>,
}

impl From<ExplainResponse> for PredictionResult {
    fn from(resp: ExplainResponse) -> Self {
        let summary = resp.prediction;
        Self {
            success_probability: summary.success_probability.clamp(0.0, 1.0),
            predicted_label: PredictedLabel::from_wire(summary.prediction),
            model_name: summary.model_used,
            confidence: summary.confidence,
            feature_importances: resp.feature_importance,
            top_factors: resp
                .top_factors
                .into_iter()
                .map(|f| TopFactor {
                    label: f.feature,
                    weight: f.importance,
                    impact: f.impact,
                })
                .collect(),
        }
    }
}
