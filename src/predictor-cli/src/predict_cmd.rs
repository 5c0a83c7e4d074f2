//! `predictor predict`: one submission without the form.

use std::fmt::Write as _;
use std::process::ExitCode;

use anyhow::{Result, bail};
use predictor_client::PredictorApi;
use predictor_engine::display::{
    capitalize, confidence_badge, format_factor_weight, format_probability, humanize_factor,
    interpretation, prediction_label,
};
use predictor_engine::{Outcome, PredictionForm};
use predictor_protocol::{
    FOUNDED_YEAR_MAX, FOUNDED_YEAR_MIN, FormRecord, PredictionResult, country_by_code,
};
use tracing::warn;

use crate::cli::PredictArgs;

impl PredictArgs {
    /// Build the record the form would have produced.
    ///
    /// # Errors
    ///
    /// Fails on a country code outside the supported list.
    pub fn to_record(&self) -> Result<FormRecord> {
        let code = self.country.trim().to_uppercase();
        let Some(country) = country_by_code(&code) else {
            bail!("Unknown country code '{}'", self.country);
        };

        let founded_year = FormRecord::clamp_year(self.founded_year);
        if founded_year != self.founded_year {
            warn!(
                requested = self.founded_year,
                used = founded_year,
                "founded year outside {FOUNDED_YEAR_MIN}-{FOUNDED_YEAR_MAX}, clamped"
            );
        }

        Ok(FormRecord {
            country_code: country.code.to_string(),
            region: self.region.trim().to_string(),
            city: self.city.trim().to_string(),
            categories: dedup(&self.categories),
            founded_year,
        })
    }

    /// Submit once and print the outcome.
    ///
    /// Validation and request failures print to stderr and exit with a
    /// failure code.
    pub async fn run(self, api: &dyn PredictorApi) -> Result<ExitCode> {
        let mut form = PredictionForm::with_record(self.to_record()?);

        match form.submit(api).await {
            Some(Outcome::Prediction(result)) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    print!("{}", render_text(result));
                }
                Ok(ExitCode::SUCCESS)
            }
            Some(Outcome::Error(err)) => {
                eprintln!("Error: {err}");
                Ok(ExitCode::FAILURE)
            }
            None => bail!("A prediction request is already in flight"),
        }
    }
}

/// Keep the first occurrence of each non-blank category.
fn dedup(categories: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories.iter().map(|c| c.trim()) {
        if !category.is_empty() && !out.iter().any(|c| c == category) {
            out.push(category.to_string());
        }
    }
    out
}

/// Plain-text rendering of a result.
pub fn render_text(result: &PredictionResult) -> String {
    let mut out = String::new();
    let probability = result.success_probability;

    let _ = writeln!(
        out,
        "Success probability: {} ({})",
        format_probability(probability),
        confidence_badge(result.confidence)
    );
    let _ = writeln!(out, "Model: {}", capitalize(&result.model_name));
    let _ = writeln!(out, "Prediction: {}", prediction_label(result.predicted_label));
    let _ = writeln!(out);
    let _ = writeln!(out, "Key factors:");
    if result.top_factors.is_empty() {
        let _ = writeln!(out, "  No factors reported");
    }
    for factor in &result.top_factors {
        let _ = writeln!(
            out,
            "  {:<28} {}",
            humanize_factor(&factor.label),
            format_factor_weight(factor)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", interpretation(probability));
    out
}
