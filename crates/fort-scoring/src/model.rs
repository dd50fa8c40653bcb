//! # Model Loading
//!
//! The scoring model is a logistic regression over the 11 features of
//! [`crate::features`]: 11 weights and a bias, loaded once from JSON and
//! never mutated.
//!
//! ## File Layouts
//!
//! Two layouts are accepted:
//!
//! ```json
//! {"weights": [0.1, ...], "bias": -0.5, "model_hash": "ab12..."}
//! {"weights": {"w": [0.1, ...], "b": -0.5}, "model_hash": "ab12..."}
//! ```
//!
//! `model_hash` is optional in both.
//!
//! ## Model Identity
//!
//! When the file declares `model_hash` it is used as the model identity
//! (lower-cased, `0x` stripped, must be 32 bytes). Otherwise the identity is
//! computed from the parameters, in the convention of the file's layout:
//!
//! | Layout | Hashed text                                    |
//! |--------|------------------------------------------------|
//! | flat   | JCS `{"bias":-0.5,"weights":[0.1,...]}`        |
//! | nested | sorted-spaced `{"b": -0.5, "w": [0.1, ...]}`   |
//!
//! The nested convention is the one deployed nested-layout models were
//! published with, so their hashes do not change. The same parameters
//! therefore hash differently in the two layouts. With
//! [`LoadOptions::verify_hash`] a declared hash must also equal the
//! computed one.

use std::path::Path;

use fort_core::{sha256_digest, CanonicalBytes, FortError, Hash32};
use serde::{Deserialize, Serialize};

use crate::features::FEATURE_COUNT;

/// Where a model's identity hash came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashSource {
    /// Taken verbatim from the file's `model_hash` field.
    Declared,
    /// Computed from the canonical weights and bias.
    Computed,
}

/// On-disk layout a model was read from. Selects the hash convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelLayout {
    /// `{"weights": [...], "bias": b}`, hashed as JCS.
    Flat,
    /// `{"weights": {"w": [...], "b": b}}`, hashed in sorted-spaced form.
    Nested,
}

/// Options controlling model loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Reject a declared `model_hash` that differs from the computed hash.
    pub verify_hash: bool,
}

/// An immutable, loaded scoring model.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    weights: Vec<f64>,
    bias: f64,
    model_hash: Hash32,
    hash_source: HashSource,
    layout: ModelLayout,
}

// ---------------------------------------------------------------------------
// On-disk representation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ModelFile {
    weights: WeightsField,
    #[serde(default)]
    bias: Option<f64>,
    #[serde(default)]
    model_hash: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightsField {
    Flat(Vec<f64>),
    Nested { w: Vec<f64>, b: f64 },
}

#[derive(Serialize)]
struct CanonicalModel<'a> {
    bias: f64,
    weights: &'a [f64],
}

#[derive(Serialize)]
struct NestedModel<'a> {
    w: &'a [f64],
    b: f64,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Model {
    /// Build a flat-layout model from parameters, computing its hash.
    ///
    /// # Errors
    ///
    /// [`FortError::ModelLoad`] on a wrong weight count or non-finite values.
    pub fn from_parts(weights: Vec<f64>, bias: f64) -> Result<Self, FortError> {
        validate_parameters(&weights, bias)?;
        let model_hash = compute_model_hash(&weights, bias)?;
        Ok(Self {
            weights,
            bias,
            model_hash,
            hash_source: HashSource::Computed,
            layout: ModelLayout::Flat,
        })
    }

    /// Load a model file with default options.
    pub fn load(path: &Path) -> Result<Self, FortError> {
        Self::load_with(path, LoadOptions::default())
    }

    /// Load a model file.
    ///
    /// # Errors
    ///
    /// - [`FortError::ModelLoad`] if the file is missing, unreadable, not a
    ///   model, or fails hash verification.
    /// - [`FortError::Format`] if `model_hash` is not 32 bytes of hex.
    pub fn load_with(path: &Path, options: LoadOptions) -> Result<Self, FortError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FortError::ModelLoad(format!("cannot read {}: {e}", path.display()))
        })?;
        let model = Self::from_json_str(&text, options)?;
        tracing::info!(
            path = %path.display(),
            model_hash = %model.model_hash,
            hash_source = ?model.hash_source,
            layout = ?model.layout,
            "model loaded"
        );
        Ok(model)
    }

    /// Parse a model from JSON text.
    pub fn from_json_str(text: &str, options: LoadOptions) -> Result<Self, FortError> {
        let file: ModelFile = serde_json::from_str(text)
            .map_err(|e| FortError::ModelLoad(format!("invalid model JSON: {e}")))?;

        let (weights, bias, layout) = match file.weights {
            WeightsField::Nested { w, b } => (w, b, ModelLayout::Nested),
            WeightsField::Flat(w) => {
                let b = file
                    .bias
                    .ok_or_else(|| FortError::ModelLoad("missing \"bias\"".to_string()))?;
                (w, b, ModelLayout::Flat)
            }
        };
        validate_parameters(&weights, bias)?;

        let computed = match layout {
            ModelLayout::Flat => compute_model_hash(&weights, bias)?,
            ModelLayout::Nested => compute_nested_model_hash(&weights, bias)?,
        };
        let (model_hash, hash_source) = match file.model_hash {
            None => (computed, HashSource::Computed),
            Some(declared) => {
                let declared = Hash32::from_hex(&declared)?;
                if declared != computed {
                    if options.verify_hash {
                        return Err(FortError::ModelLoad(format!(
                            "declared model_hash {declared} does not match computed {computed}"
                        )));
                    }
                    tracing::warn!(
                        declared = %declared,
                        computed = %computed,
                        "declared model_hash differs from parameters; using declared value"
                    );
                }
                (declared, HashSource::Declared)
            }
        };

        Ok(Self {
            weights,
            bias,
            model_hash,
            hash_source,
            layout,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// The model identity bound into attestations.
    pub fn model_hash(&self) -> Hash32 {
        self.model_hash
    }

    pub fn hash_source(&self) -> HashSource {
        self.hash_source
    }

    pub fn layout(&self) -> ModelLayout {
        self.layout
    }
}

fn validate_parameters(weights: &[f64], bias: f64) -> Result<(), FortError> {
    if weights.len() != FEATURE_COUNT {
        return Err(FortError::ModelLoad(format!(
            "expected {FEATURE_COUNT} weights, got {}",
            weights.len()
        )));
    }
    if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
        return Err(FortError::ModelLoad(
            "weights and bias must be finite".to_string(),
        ));
    }
    Ok(())
}

/// SHA-256 of the canonical `{"bias":b,"weights":[...]}` form.
pub fn compute_model_hash(weights: &[f64], bias: f64) -> Result<Hash32, FortError> {
    let canonical = CanonicalBytes::new(&CanonicalModel { bias, weights })?;
    Ok(sha256_digest(&canonical))
}

/// SHA-256 of the nested layout's sorted-spaced `{"b": b, "w": [...]}` form.
pub fn compute_nested_model_hash(weights: &[f64], bias: f64) -> Result<Hash32, FortError> {
    let text = CanonicalBytes::sorted_spaced(&NestedModel { w: weights, b: bias })?;
    Ok(sha256_digest(&text))
}
