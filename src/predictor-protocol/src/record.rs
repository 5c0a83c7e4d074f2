//! The record edited by the form.

use serde::{Deserialize, Serialize};

use crate::predict::PredictRequest;

/// Country preselected in a fresh form.
pub const DEFAULT_COUNTRY_CODE: &str = "USA";

/// Earliest founding year the model was trained on.
pub const FOUNDED_YEAR_MIN: i32 = 1995;

/// Latest founding year the model was trained on.
pub const FOUNDED_YEAR_MAX: i32 = 2015;

/// Values collected by the form.
///
/// Empty `region`/`city` strings mean "nothing selected". Categories keep the
/// order in which they were selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub country_code: String,
    pub region: String,
    pub city: String,
    pub categories: Vec<String>,
    pub founded_year: i32,
}

impl Default for FormRecord {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            region: String::new(),
            city: String::new(),
            categories: Vec::new(),
            founded_year: FOUNDED_YEAR_MAX,
        }
    }
}

impl FormRecord {
    /// Freeze the record into an owned request payload.
    pub fn to_request(&self) -> PredictRequest {
        PredictRequest {
            country_code: self.country_code.clone(),
            region: self.region.clone(),
            city: self.city.clone(),
            category_list: self.categories.join(" "),
            founded_year: self.founded_year,
        }
    }

    /// Clamp a year into the supported range.
    pub fn clamp_year(year: i32) -> i32 {
        year.clamp(FOUNDED_YEAR_MIN, FOUNDED_YEAR_MAX)
    }
}
