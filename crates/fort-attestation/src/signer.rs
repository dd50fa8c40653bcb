//! # Attestation Signer
//!
//! Holds the aggregator key for the life of the process and turns validated
//! score tuples into [`Attestation`]s.
//!
//! ## Security Invariant
//!
//! - All validation (lengths, score range) completes before the key is
//!   touched. Invalid input never produces a signature.
//! - The seed is never logged. `AttestationSigner`'s `Debug` shows only the
//!   public address.

use std::sync::Arc;

use fort_core::{FortError, Hash32, Score, UnixTimestamp, UserAddress};
use fort_crypto::{Ed25519KeyPair, Ed25519PublicKey};

use crate::attestation::Attestation;
use crate::message::AttestationMessage;

/// Signs score attestations with the process-wide aggregator key.
///
/// Cheap to clone; clones share the key.
#[derive(Clone)]
pub struct AttestationSigner {
    key: Arc<Ed25519KeyPair>,
    public_key: Ed25519PublicKey,
}

impl AttestationSigner {
    pub fn new(key: Ed25519KeyPair) -> Self {
        let public_key = key.public_key();
        Self {
            key: Arc::new(key),
            public_key,
        }
    }

    /// Load the signer from a base64 32-byte seed.
    ///
    /// # Errors
    ///
    /// [`FortError::Config`] when the seed is not base64 or not 32 bytes. The
    /// message does not contain the input.
    pub fn from_seed_base64(seed_b64: &str) -> Result<Self, FortError> {
        let key = Ed25519KeyPair::from_seed_base64(seed_b64)
            .map_err(|e| FortError::Config(e.to_string()))?;
        Ok(Self::new(key))
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.public_key
    }

    /// The signer's own chain address.
    pub fn address(&self) -> UserAddress {
        self.public_key.address()
    }

    /// Sign already-validated fields.
    ///
    /// `timestamp` defaults to the current time when `None`.
    pub fn sign(
        &self,
        user: UserAddress,
        score: Score,
        model_hash: Hash32,
        artifact_hash: Hash32,
        timestamp: Option<UnixTimestamp>,
    ) -> Attestation {
        let timestamp = timestamp.unwrap_or_else(UnixTimestamp::now);
        let message = AttestationMessage::new(&user, score, &model_hash, &artifact_hash, timestamp);
        let signature = self.key.sign(&message);
        tracing::debug!(
            user = %user,
            score = score.value(),
            model_hash = %model_hash,
            artifact_hash = %artifact_hash,
            ts = timestamp.as_secs(),
            "signed attestation"
        );
        Attestation {
            user,
            score,
            model_hash,
            artifact_hash,
            timestamp,
            signature,
        }
    }

    /// Validate raw fields, then sign.
    ///
    /// # Errors
    ///
    /// - [`FortError::Format`] if `user_pk`, `model_hash`, or
    ///   `artifact_hash` is not exactly 32 bytes.
    /// - [`FortError::Range`] if `score` is outside `[0, 1000]`.
    pub fn sign_raw(
        &self,
        user_pk: &[u8],
        score: i64,
        model_hash: &[u8],
        artifact_hash: &[u8],
        timestamp: Option<u64>,
    ) -> Result<Attestation, FortError> {
        let user = Hash32::from_slice(user_pk)
            .map(|h| UserAddress::from_public_key(h.0))
            .map_err(|_| {
                FortError::Format(format!("user key must be 32 bytes, got {}", user_pk.len()))
            })?;
        let model_hash = Hash32::from_slice(model_hash).map_err(|_| {
            FortError::Format(format!("model hash must be 32 bytes, got {}", model_hash.len()))
        })?;
        let artifact_hash = Hash32::from_slice(artifact_hash).map_err(|_| {
            FortError::Format(format!(
                "artifact hash must be 32 bytes, got {}",
                artifact_hash.len()
            ))
        })?;
        let score = Score::new(score)?;
        Ok(self.sign(
            user,
            score,
            model_hash,
            artifact_hash,
            timestamp.map(UnixTimestamp::from_secs),
        ))
    }
}

impl std::fmt::Debug for AttestationSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttestationSigner")
            .field("address", &self.address().encode())
            .finish_non_exhaustive()
    }
}
