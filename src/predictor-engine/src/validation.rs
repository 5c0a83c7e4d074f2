//! Client-side checks run before any network call.

use predictor_protocol::FormRecord;

/// First reason a record cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select at least one category")]
    NoCategory,

    #[error("Please select a region")]
    NoRegion,

    #[error("Please select a city")]
    NoCity,
}

/// Check categories, then region, then city. The founding year is bounded by
/// its input and not checked here.
pub fn validate(record: &FormRecord) -> Result<(), ValidationError> {
    if record.categories.is_empty() {
        return Err(ValidationError::NoCategory);
    }
    if record.region.trim().is_empty() {
        return Err(ValidationError::NoRegion);
    }
    if record.city.trim().is_empty() {
        return Err(ValidationError::NoCity);
    }
    Ok(())
}
