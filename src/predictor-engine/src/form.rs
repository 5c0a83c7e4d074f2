//! Form orchestrator: record, submission state machine and outcome.

use predictor_client::{PredictorApi, PredictorError};
use predictor_protocol::{ExplainResponse, FormRecord, PredictRequest, PredictionResult};

use crate::error::RequestError;
use crate::validation::validate;

/// Where the form is in its submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What the last submission produced. A result and an error never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Prediction(PredictionResult),
    Error(RequestError),
}

/// Answer of [`PredictionForm::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// A request is already in flight; nothing changed.
    InFlight,
    /// Validation failed; the error is stored as the outcome.
    Invalid(RequestError),
    /// Send this payload, then call [`PredictionForm::finish_submit`].
    Ready(PredictRequest),
}

/// The prediction form: the record being edited plus the submission state.
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    record: FormRecord,
    status: SubmissionStatus,
    outcome: Option<Outcome>,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: FormRecord) -> Self {
        Self {
            record,
            ..Default::default()
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.outcome {
            Some(Outcome::Prediction(result)) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RequestError> {
        match &self.outcome {
            Some(Outcome::Error(err)) => Some(err),
            _ => None,
        }
    }

    pub fn set_country(&mut self, code: impl Into<String>) {
        self.record.country_code = code.into();
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.record.region = region.into();
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.record.city = city.into();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.record.categories = categories;
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.record.categories.iter().position(|c| c == category) {
            self.record.categories.remove(pos);
        } else {
            self.record.categories.push(category.to_string());
        }
    }

    pub fn remove_category(&mut self, category: &str) {
        self.record.categories.retain(|c| c != category);
    }

    /// Set the founding year, clamped to the supported range.
    pub fn set_founded_year(&mut self, year: i32) {
        self.record.founded_year = FormRecord::clamp_year(year);
    }

    /// Validate and freeze the payload.
    ///
    /// Rejected while a request is in flight. Otherwise the previous outcome
    /// is cleared first, whatever it was.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_submitting() {
            tracing::debug!("submit ignored: a prediction request is already in flight");
            return SubmitStart::InFlight;
        }

        self.outcome = None;
        self.status = SubmissionStatus::Validating;

        if let Err(err) = validate(&self.record) {
            let err = RequestError::from(err);
            tracing::debug!(message = %err, "submission rejected by validation");
            self.status = SubmissionStatus::Failed;
            self.outcome = Some(Outcome::Error(err.clone()));
            return SubmitStart::Invalid(err);
        }

        let request = self.record.to_request();
        tracing::info!(
            country = %request.country_code,
            region = %request.region,
            city = %request.city,
            categories = %request.category_list,
            founded_year = request.founded_year,
            "submitting prediction"
        );
        self.status = SubmissionStatus::Submitting;
        SubmitStart::Ready(request)
    }

    /// Store the answer of the request started by [`Self::begin_submit`].
    ///
    /// Returns false (and changes nothing) if no request was in flight.
    pub fn finish_submit(&mut self, result: Result<ExplainResponse, PredictorError>) -> bool {
        if !self.is_submitting() {
            tracing::warn!(status = ?self.status, "dropping prediction result: no request in flight");
            return false;
        }

        match result {
            Ok(response) => {
                let prediction = PredictionResult::from(response);
                tracing::info!(
                    probability = prediction.success_probability,
                    confidence = prediction.confidence.as_str(),
                    model = %prediction.model_name,
                    "prediction received"
                );
                self.status = SubmissionStatus::Succeeded;
                self.outcome = Some(Outcome::Prediction(prediction));
            }
            Err(err) => {
                tracing::warn!(error = %err, "prediction request failed");
                self.status = SubmissionStatus::Failed;
                self.outcome = Some(Outcome::Error(RequestError::from(err)));
            }
        }
        true
    }

    /// Run a whole submission against `api`.
    ///
    /// Returns `None` when rejected because a request is in flight.
    pub async fn submit(&mut self, api: &dyn PredictorApi) -> Option<&Outcome> {
        match self.begin_submit() {
            SubmitStart::InFlight => return None,
            SubmitStart::Invalid(_) => {}
            SubmitStart::Ready(request) => {
                let result = api.predict_explain(&request).await;
                self.finish_submit(result);
            }
        }
        self.outcome.as_ref()
    }
}
