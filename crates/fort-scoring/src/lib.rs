//! # fort-scoring: Deterministic Credit Scoring
//!
//! The scoring pipeline of the FORT stack:
//!
//! - **Model** (`model.rs`): loads the logistic model (11 weights + bias)
//!   from JSON and fixes its identity hash.
//!
//! - **Features** (`features.rs`): aggregates a ledger into a daily series
//!   and computes the 11 cash-flow features in model order.
//!
//! - **Scorer** (`scorer.rs`): logit, sigmoid, and the mapping from
//!   confidence in repayment to the integer contract score.
//!
//! - **Stats** (`stats.rs`): mean, population std, Pearson correlation,
//!   bias-adjusted skewness and kurtosis.
//!
//! ## Determinism
//!
//! For a fixed model and ledger, `score_ledger` returns bit-identical
//! results on every call. Nothing here reads the clock, the environment,
//! or shared mutable state.

pub mod features;
pub mod model;
pub mod scorer;
pub mod stats;

pub use features::{
    extract_features, FeatureVector, DEFAULT_WINDOW_DAYS, FEATURE_COUNT, FEATURE_NAMES,
};
pub use model::{
    compute_model_hash, compute_nested_model_hash, HashSource, LoadOptions, Model, ModelLayout,
};
pub use scorer::{score, score_ledger, ScoreResult};
