//! Form orchestration for the startup predictor
//!
//! This crate owns everything between the widgets and the HTTP client:
//! loading the reference lists, holding the [`FormRecord`] being edited,
//! gating submission on validation, calling the prediction service and
//! turning its answer into a [`PredictionResult`] or a classified
//! [`RequestError`]. The [`display`] module derives the text and tones shown
//! for a result.
//!
//! [`FormRecord`]: predictor_protocol::FormRecord
//! [`PredictionResult`]: predictor_protocol::PredictionResult

pub mod display;
mod error;
mod form;
mod reference;
mod validation;

pub use error::{ErrorClass, RequestError, TRANSPORT_FAILURE_MESSAGE};
pub use form::{Outcome, PredictionForm, SubmissionStatus, SubmitStart};
pub use reference::{ReferenceData, ReferenceList, ReferenceUpdate, load_all, spawn_loads};
pub use validation::{ValidationError, validate};

#[cfg(test)]
mod tests;
