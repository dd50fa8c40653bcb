//! # Application State
//!
//! The immutable context shared by every handler through Axum's `State`
//! extractor. The model and signing key are loaded once at startup; requests
//! read them concurrently without locking.

use std::sync::Arc;

use fort_attestation::AttestationSigner;
use fort_core::FortError;
use fort_scoring::{LoadOptions, Model};

use crate::config::AppConfig;

/// Shared application state. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub model: Arc<Model>,
    pub signer: AttestationSigner,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Assemble state from already-loaded parts.
    pub fn new(model: Model, signer: AttestationSigner, config: AppConfig) -> Self {
        Self {
            model: Arc::new(model),
            signer,
            config: Arc::new(config),
        }
    }

    /// Load the signing key and model named by `config`.
    ///
    /// # Errors
    ///
    /// - [`FortError::Config`] if the signing seed is malformed.
    /// - [`FortError::ModelLoad`] or [`FortError::Format`] if the model
    ///   cannot be loaded.
    pub fn from_config(config: AppConfig) -> Result<Self, FortError> {
        let signer = AttestationSigner::from_seed_base64(&config.signing_seed_b64)?;
        let model = Model::load_with(
            &config.model_path,
            LoadOptions {
                verify_hash: config.verify_model_hash,
            },
        )?;
        tracing::info!(
            signer = %signer.address(),
            model_hash = %model.model_hash(),
            "application state initialized"
        );
        Ok(Self::new(model, signer, config))
    }
}
