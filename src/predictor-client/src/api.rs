//! Service seam used by the form logic.

use async_trait::async_trait;
use predictor_protocol::{ExplainResponse, PredictRequest, ReferenceKind};

use crate::Result;

/// Operations the form needs from the prediction service.
#[async_trait]
pub trait PredictorApi: Send + Sync {
    /// Fetch one reference list. A body without the expected key yields an
    /// empty list.
    async fn fetch_reference(&self, kind: ReferenceKind) -> Result<Vec<String>>;

    /// Submit a prediction request and return the explained prediction.
    async fn predict_explain(&self, request: &PredictRequest) -> Result<ExplainResponse>;
}
