//! `POST /predict/explain` request and response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload sent to `POST /predict/explain`.
///
/// `category_list` carries the selected categories joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub country_code: String,
    pub region: String,
    pub city: String,
    pub category_list: String,
    pub founded_year: i32,
}

/// Confidence tier reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
    /// Any tier name the client does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ConfidenceTier {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
            ConfidenceTier::Unknown => "unknown",
        }
    }

    /// Capitalised name used in badges (`High`).
    pub fn title(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::High => "High",
            ConfidenceTier::Unknown => "Unknown",
        }
    }
}

/// Direction in which a factor pushed the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
}

impl Impact {
    /// `+` or `-`.
    pub fn sign(&self) -> char {
        match self {
            Impact::Positive => '+',
            Impact::Negative => '-',
        }
    }
}

/// `prediction` object of the explain response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub success_probability: f64,
    /// 1 for success, 0 for failure.
    pub prediction: u8,
    pub model_used: String,
    #[serde(default)]
    pub confidence: ConfidenceTier,
}

/// One entry of `top_factors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorDto {
    pub feature: String,
    pub importance: f64,
    pub impact: Impact,
}

/// Successful body of `POST /predict/explain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub prediction: PredictionSummary,
    #[serde(default)]
    pub feature_importance: BTreeMap<String, f64>,
    #[serde(default)]
    pub top_factors: Vec<FactorDto>,
}

/// Error body returned with a non-2xx status.
///
/// The service answers either `{"detail": "text"}` or, for request validation
/// failures, `{"detail": [{"loc": [...], "msg": "text", "type": "..."}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human readable message carried by the body, if any.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .filter(|msg| !msg.is_empty())
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }

    /// Extract a message from a raw response body.
    ///
    /// Falls back to `API Error: <status>` when the body is not JSON or
    /// carries no usable detail.
    pub fn message_from_body(body: &str, status: u16) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message())
            .unwrap_or_else(|| format!("API Error: {status}"))
    }
}
