//! # Feature Extraction
//!
//! Turns a [`Ledger`] into the fixed 11-element feature vector the linear
//! model was trained on. The order of [`FEATURE_NAMES`] is part of the model
//! contract: weight `i` multiplies feature `i`.
//!
//! ## Pipeline
//!
//! 1. Aggregate the ledger into a zero-filled [`DailySeries`] of
//!    `window_days` days ending at the latest transaction date.
//! 2. Split each day into inflow `max(x, 0)` and outflow `max(-x, 0)`.
//! 3. Compute cash-flow statistics (population std throughout).
//! 4. Apply `sign(v) * ln(1 + |v|)` to the monetary features (0..=6).
//!
//! Every step is deterministic and total. A single-day ledger or an all-zero
//! ledger produces a finite vector.
//!
//! [`DailySeries`]: fort_core::DailySeries

use fort_core::{FortError, Ledger};
use serde::Serialize;

use crate::stats::{excess_kurtosis, mean, pearson, skewness, std_pop};

/// Number of features the model consumes.
pub const FEATURE_COUNT: usize = 11;

/// Default aggregation window in days.
pub const DEFAULT_WINDOW_DAYS: usize = 90;

/// Feature names in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "inflow_mean",
    "inflow_std",
    "outflow_mean",
    "outflow_std",
    "net_mean",
    "outflow_inflow_vol_ratio",
    "max_drawdown",
    "periodicity",
    "shock_recovery",
    "skewness",
    "excess_kurtosis",
];

/// Added to standard deviations so ratios never divide by zero.
const STD_EPSILON: f64 = 1e-6;

/// Below this, a series is treated as constant.
const FLAT_STD: f64 = 1e-8;

/// Autocorrelation lags checked for pay-cycle regularity.
const PERIODICITY_LAGS: [usize; 3] = [14, 28, 30];

/// Shortest series for which periodicity is computed.
const PERIODICITY_MIN_DAYS: usize = 31;

/// Features 0..MONETARY_FEATURES are signed-log transformed.
const MONETARY_FEATURES: usize = 7;

/// An ordered, fixed-length feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wrap an array of features in model order.
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Build from a slice, checking its length.
    ///
    /// # Errors
    ///
    /// [`FortError::Dimension`] when `values.len() != FEATURE_COUNT`.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, FortError> {
        let arr: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| FortError::Dimension {
                expected: FEATURE_COUNT,
                actual: values.len(),
            })?;
        Ok(Self(arr))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate `(name, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Series features
// ---------------------------------------------------------------------------

/// Largest fall of the cumulative balance from its running peak.
pub fn max_drawdown(xs: &[f64]) -> f64 {
    let mut cum = 0.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for x in xs {
        cum += x;
        peak = peak.max(cum);
        worst = worst.max(peak - cum);
    }
    worst
}

/// Strongest positive autocorrelation at the checked lags, floored at 0.
///
/// Series shorter than 31 days score 0. A lag whose leading or trailing
/// segment is flat contributes 0.
pub fn periodicity_score(xs: &[f64]) -> f64 {
    if xs.len() < PERIODICITY_MIN_DAYS {
        return 0.0;
    }
    PERIODICITY_LAGS
        .iter()
        .map(|&lag| {
            let head = &xs[..xs.len() - lag];
            let tail = &xs[lag..];
            if std_pop(head) < FLAT_STD || std_pop(tail) < FLAT_STD {
                0.0
            } else {
                pearson(head, tail)
            }
        })
        .fold(0.0, f64::max)
}

/// Fraction of the window needed to absorb a one-sigma shock.
///
/// The shock is `-std(x)` applied to the cumulative balance; the result is
/// the first day the shocked balance reaches the final balance, divided by
/// the window length. Flat series recover immediately (1.0 by convention).
pub fn shock_recovery(xs: &[f64]) -> f64 {
    let sigma = std_pop(xs);
    if xs.is_empty() || sigma < FLAT_STD {
        return 1.0;
    }
    let n = xs.len();
    let mut bal = Vec::with_capacity(n);
    let mut acc = 0.0;
    for x in xs {
        acc += x;
        bal.push(acc);
    }
    let target = bal[n - 1];
    let steps = bal
        .iter()
        .position(|b| b - sigma >= target)
        .map_or(n, |i| i + 1);
    (steps as f64 / n as f64).min(1.0)
}

fn signed_log(v: f64) -> f64 {
    v.signum() * v.abs().ln_1p()
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Compute the feature vector for a daily net-amount series.
pub fn features_from_series(xs: &[f64]) -> FeatureVector {
    let inflow: Vec<f64> = xs.iter().map(|x| x.max(0.0)).collect();
    let outflow: Vec<f64> = xs.iter().map(|x| (-x).max(0.0)).collect();
    let net: Vec<f64> = inflow.iter().zip(&outflow).map(|(i, o)| i - o).collect();

    let in_mean = mean(&inflow);
    let in_std = std_pop(&inflow);
    let out_mean = mean(&outflow);
    let out_std = std_pop(&outflow);

    let mut f = [
        in_mean,
        in_std + STD_EPSILON,
        out_mean,
        out_std + STD_EPSILON,
        in_mean - out_mean,
        out_std / (in_std + STD_EPSILON),
        max_drawdown(xs),
        periodicity_score(&net),
        shock_recovery(xs),
        skewness(xs),
        excess_kurtosis(xs),
    ];
    for v in f.iter_mut().take(MONETARY_FEATURES) {
        *v = signed_log(*v);
    }
    FeatureVector(f)
}

/// Extract features from a ledger over the trailing `window_days` days.
///
/// # Errors
///
/// [`FortError::Format`] when `window_days` is zero.
pub fn extract_features(ledger: &Ledger, window_days: usize) -> Result<FeatureVector, FortError> {
    let series = ledger.daily_series(window_days)?;
    let features = features_from_series(series.amounts());
    tracing::debug!(
        entries = ledger.len(),
        window_days,
        window_start = %series.start(),
        window_end = %series.end(),
        "extracted features"
    );
    Ok(features)
}
