//! # Logistic Scoring
//!
//! `z = features · weights + bias`, `p = 1 / (1 + e^-z)` is the probability
//! of default, and the confidence in repayment `1 - p` maps to the integer
//! contract score via [`Score::from_confidence`] (clamp, ×1000, round half
//! to even).
//!
//! ## Security Invariant
//!
//! The feature slice length is checked against the model before any
//! arithmetic. A score is only produced from finite inputs.

use fort_core::{FortError, Ledger, Score};
use serde::Serialize;

use crate::features::extract_features;
use crate::model::Model;

/// Output of scoring one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// `1 - probability_of_default`, in `[0, 1]`.
    pub confidence_in_repayment: f64,
    /// Sigmoid of the logit.
    pub probability_of_default: f64,
    /// Raw linear score `z`.
    pub logit: f64,
    /// Contract score in `[0, 1000]`.
    pub score: Score,
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Score a feature slice.
///
/// # Errors
///
/// - [`FortError::Dimension`] when `features.len()` differs from the model.
/// - [`FortError::Format`] when a feature is NaN or infinite.
pub fn score(model: &Model, features: &[f64]) -> Result<ScoreResult, FortError> {
    let weights = model.weights();
    if features.len() != weights.len() {
        return Err(FortError::Dimension {
            expected: weights.len(),
            actual: features.len(),
        });
    }
    if let Some(i) = features.iter().position(|f| !f.is_finite()) {
        return Err(FortError::Format(format!("feature {i} is not finite")));
    }

    let logit = features
        .iter()
        .zip(weights)
        .map(|(f, w)| f * w)
        .sum::<f64>()
        + model.bias();
    let probability_of_default = sigmoid(logit);
    let confidence_in_repayment = (1.0 - probability_of_default).clamp(0.0, 1.0);

    Ok(ScoreResult {
        confidence_in_repayment,
        probability_of_default,
        logit,
        score: Score::from_confidence(confidence_in_repayment),
    })
}

/// Extract features from `ledger` and score them.
pub fn score_ledger(
    model: &Model,
    ledger: &Ledger,
    window_days: usize,
) -> Result<ScoreResult, FortError> {
    let features = extract_features(ledger, window_days)?;
    let result = score(model, features.as_slice())?;
    tracing::debug!(
        score = result.score.value(),
        logit = result.logit,
        "scored ledger"
    );
    Ok(result)
}
