//! Startup Predictor Protocol - types shared between the form and the service
//!
//! This crate defines the HTTP contract of the prediction service (reference
//! lists, the explain request and response, error bodies) together with the
//! domain types the form works with: the [`FormRecord`] being edited and the
//! [`PredictionResult`] rendered after a successful submission.

pub mod countries;
pub mod predict;
pub mod record;
pub mod reference;
pub mod result;

// Re-exports
pub use countries::{COUNTRIES, Country, country_by_code, country_index};
pub use predict::{
    ConfidenceTier, ErrorBody, ExplainResponse, FactorDto, Impact, PredictRequest,
    PredictionSummary,
};
pub use record::{DEFAULT_COUNTRY_CODE, FOUNDED_YEAR_MAX, FOUNDED_YEAR_MIN, FormRecord};
pub use reference::{ReferenceKind, ReferenceListBody};
pub use result::{PredictedLabel, PredictionResult, TopFactor};
