//! # Scoring Subcommands
//!
//! - `fort score`: score a ledger file offline with a model file, printing
//!   the features, the score, and the hashes an attestation would bind.
//! - `fort model-hash`: print a model's identity hash.
//!
//! Both read the same files the service reads and go through the same
//! library calls, so their output matches what the service would sign.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use fort_core::{Hash32, Ledger};
use fort_crypto::artifact_hash;
use fort_scoring::{
    extract_features, score, HashSource, LoadOptions, Model, ScoreResult, DEFAULT_WINDOW_DAYS,
};

/// Arguments for `fort score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the model JSON.
    #[arg(long)]
    pub model: PathBuf,
    /// Aggregation window in days.
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub window: usize,
    /// Reject a declared model hash that does not match the weights.
    #[arg(long)]
    pub verify_model_hash: bool,
    /// Ledger CSV to score.
    #[arg(value_name = "LEDGER")]
    pub ledger: PathBuf,
}

/// Arguments for `fort model-hash`.
#[derive(Args, Debug)]
pub struct ModelHashArgs {
    /// Fail if a declared hash does not match the weights.
    #[arg(long)]
    pub verify: bool,
    /// Path to the model JSON.
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,
}

/// Output of `fort score`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub ledger: String,
    pub artifact_hash_hex: Hash32,
    pub model_hash_hex: Hash32,
    pub window_days: usize,
    pub features: serde_json::Map<String, serde_json::Value>,
    #[serde(flatten)]
    pub result: ScoreResult,
}

/// Score a ledger file. Used by `fort score` and `fort sign`.
pub fn score_file(model: &Model, ledger_path: &Path, window_days: usize) -> Result<ScoreReport> {
    let bytes = std::fs::read(ledger_path)
        .with_context(|| format!("failed to read ledger: {}", ledger_path.display()))?;
    let artifact = artifact_hash(&bytes);
    let text = std::str::from_utf8(&bytes)
        .with_context(|| format!("ledger is not UTF-8: {}", ledger_path.display()))?;
    let ledger = Ledger::parse_csv(text)
        .with_context(|| format!("failed to parse ledger: {}", ledger_path.display()))?;
    let features = extract_features(&ledger, window_days)?;
    let result = score(model, features.as_slice())?;

    Ok(ScoreReport {
        ledger: ledger_path.display().to_string(),
        artifact_hash_hex: artifact,
        model_hash_hex: model.model_hash(),
        window_days,
        features: features
            .named()
            .map(|(name, v)| (name.to_string(), serde_json::json!(v)))
            .collect(),
        result,
    })
}

/// Load a model file with CLI context on failure.
pub fn load_model(path: &Path, verify_hash: bool) -> Result<Model> {
    Model::load_with(path, LoadOptions { verify_hash })
        .with_context(|| format!("failed to load model: {}", path.display()))
}

/// Execute `fort score`.
pub fn run_score(args: &ScoreArgs) -> Result<u8> {
    let model = load_model(&args.model, args.verify_model_hash)?;
    let report = score_file(&model, &args.ledger, args.window)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}

/// Execute `fort model-hash`.
pub fn run_model_hash(args: &ModelHashArgs) -> Result<u8> {
    let model = load_model(&args.model, args.verify)?;
    let source = match model.hash_source() {
        HashSource::Declared => "declared",
        HashSource::Computed => "computed",
    };
    println!("{}  ({source})", model.model_hash());
    Ok(0)
}
