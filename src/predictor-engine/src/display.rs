//! Text and tones derived from a prediction result.

use predictor_protocol::{ConfidenceTier, Impact, PredictedLabel, TopFactor};

/// Probability at or above which a result reads as favourable.
pub const HIGH_THRESHOLD: f64 = 0.7;

/// Probability at or above which a result reads as mixed.
pub const MEDIUM_THRESHOLD: f64 = 0.4;

/// Colour family a value is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Moderate,
    Poor,
    Neutral,
}

pub fn confidence_tone(tier: ConfidenceTier) -> Tone {
    match tier {
        ConfidenceTier::High => Tone::Good,
        ConfidenceTier::Medium => Tone::Moderate,
        ConfidenceTier::Low => Tone::Poor,
        ConfidenceTier::Unknown => Tone::Neutral,
    }
}

pub fn probability_tone(probability: f64) -> Tone {
    if probability >= HIGH_THRESHOLD {
        Tone::Good
    } else if probability >= MEDIUM_THRESHOLD {
        Tone::Moderate
    } else {
        Tone::Poor
    }
}

/// One-paragraph reading of the probability.
pub fn interpretation(probability: f64) -> &'static str {
    if probability >= HIGH_THRESHOLD {
        "This startup shows strong indicators for success based on historical patterns. \
         Consider factors like market timing and execution quality."
    } else if probability >= MEDIUM_THRESHOLD {
        "This startup shows mixed signals. Success will likely depend heavily on execution, \
         market conditions, and strategic decisions."
    } else {
        "This startup faces significant challenges based on historical patterns. \
         Consider pivoting or addressing key risk factors."
    }
}

/// `0.82` → `82.0%`.
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// `founded_year` → `Founded Year`.
pub fn humanize_factor(label: &str) -> String {
    label
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Absolute weight with three decimals.
pub fn format_weight(weight: f64) -> String {
    format!("{:.3}", weight.abs())
}

/// `+`/`-` marker followed by the weight, e.g. `+0.120`.
pub fn format_factor_weight(factor: &TopFactor) -> String {
    format!("{}{}", factor.impact.sign(), format_weight(factor.weight))
}

pub fn factor_tone(impact: Impact) -> Tone {
    match impact {
        Impact::Positive => Tone::Good,
        Impact::Negative => Tone::Poor,
    }
}

pub fn prediction_label(label: PredictedLabel) -> &'static str {
    match label {
        PredictedLabel::Success => "Likely Success",
        PredictedLabel::Failure => "Likely Failure",
    }
}

/// `High Confidence`.
pub fn confidence_badge(tier: ConfidenceTier) -> String {
    format!("{} Confidence", tier.title())
}

/// First character upper-cased, the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_thresholds_inclusive() {
        assert_eq!(probability_tone(0.7), Tone::Good);
        assert_eq!(probability_tone(0.69), Tone::Moderate);
        assert_eq!(probability_tone(0.4), Tone::Moderate);
        assert_eq!(probability_tone(0.39), Tone::Poor);
        assert!(interpretation(0.7).starts_with("This startup shows strong indicators"));
        assert!(interpretation(0.4).starts_with("This startup shows mixed signals"));
        assert!(interpretation(0.1).starts_with("This startup faces significant challenges"));
    }

    #[test]
    fn test_interpretation_full_text() {
        assert_eq!(
            interpretation(0.5),
            "This startup shows mixed signals. Success will likely depend heavily on \
             execution, market conditions, and strategic decisions."
        );
    }

    #[test]
    fn test_confidence_tone() {
        assert_eq!(confidence_tone(ConfidenceTier::High), Tone::Good);
        assert_eq!(confidence_tone(ConfidenceTier::Medium), Tone::Moderate);
        assert_eq!(confidence_tone(ConfidenceTier::Low), Tone::Poor);
        assert_eq!(confidence_tone(ConfidenceTier::Unknown), Tone::Neutral);
        assert_eq!(confidence_badge(ConfidenceTier::Low), "Low Confidence");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_probability(0.82), "82.0%");
        assert_eq!(format_probability(0.0), "0.0%");
        assert_eq!(format_probability(1.0), "100.0%");
        assert_eq!(humanize_factor("founded_year"), "Founded Year");
        assert_eq!(humanize_factor("category_software"), "Category Software");
        assert_eq!(format_weight(-0.04567), "0.046");
        assert_eq!(capitalize("xgboost"), "Xgboost");
        assert_eq!(capitalize(""), "");
        assert_eq!(prediction_label(PredictedLabel::Failure), "Likely Failure");
    }

    #[test]
    fn test_factor_weight_sign() {
        let factor = TopFactor {
            label: "region_other".to_string(),
            weight: -0.05,
            impact: Impact::Negative,
        };
        assert_eq!(format_factor_weight(&factor), "-0.050");
        assert_eq!(factor_tone(factor.impact), Tone::Poor);
    }
}
