//! Request error taxonomy shown to the user.

use predictor_client::PredictorError;

use crate::validation::ValidationError;

/// Message shown when the service could not be reached at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Prediction failed: unable to reach the prediction service";

/// Where a failed submission went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Rejected before any network call.
    Validation,
    /// No HTTP response was received.
    Transport,
    /// The service answered with an error or an unreadable body.
    Backend,
}

/// A user-facing submission error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    pub class: ErrorClass,
}

impl RequestError {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            class,
        }
    }

    pub fn transport() -> Self {
        Self::new(ErrorClass::Transport, TRANSPORT_FAILURE_MESSAGE)
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Backend, message)
    }
}

impl From<ValidationError> for RequestError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorClass::Validation, err.to_string())
    }
}

impl From<PredictorError> for RequestError {
    fn from(err: PredictorError) -> Self {
        match err {
            PredictorError::Transport { .. } => Self::transport(),
            PredictorError::Api { message, .. } => Self::backend(message),
            PredictorError::InvalidResponse(_) => Self::backend(err.to_string()),
            PredictorError::Client(_) | PredictorError::Config(_) | PredictorError::Io(_) => {
                Self::new(ErrorClass::Transport, format!("Prediction failed: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_verbatim() {
        let err = RequestError::from(PredictorError::Api {
            status: 503,
            message: "Model not loaded".to_string(),
        });
        assert_eq!(err.class, ErrorClass::Backend);
        assert_eq!(err.message, "Model not loaded");
    }

    #[test]
    fn test_invalid_response_is_backend() {
        let err = RequestError::from(PredictorError::InvalidResponse("eof".to_string()));
        assert_eq!(err.class, ErrorClass::Backend);
        assert_eq!(err.message, "Invalid response from prediction service: eof");
    }

    #[test]
    fn test_validation_conversion() {
        let err = RequestError::from(ValidationError::NoCity);
        assert_eq!(err.class, ErrorClass::Validation);
        assert_eq!(err.to_string(), "Please select a city");
    }
}
