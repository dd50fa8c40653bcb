//! # Attestations
//!
//! An [`Attestation`] is the signed tuple handed to the contract: who was
//! scored, the score, which model and which input produced it, when, and
//! the aggregator's signature over the canonical message.
//!
//! [`AttestationDocument`] is its JSON form. Field names follow the service
//! response (`userAddr`, `score`, `modelHashHex`, `artifactHashHex`, `ts`,
//! `sigB64`), so a response body can be verified directly.

use fort_core::{FortError, Hash32, Score, UnixTimestamp, UserAddress};
use fort_crypto::{verify_with_public_key, Ed25519PublicKey, Ed25519Signature};
use serde::{Deserialize, Serialize};

use crate::message::AttestationMessage;

/// A signed score attestation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attestation {
    pub user: UserAddress,
    pub score: Score,
    pub model_hash: Hash32,
    pub artifact_hash: Hash32,
    pub timestamp: UnixTimestamp,
    pub signature: Ed25519Signature,
}

impl Attestation {
    /// Rebuild the signed message.
    pub fn message(&self) -> AttestationMessage {
        AttestationMessage::new(
            &self.user,
            self.score,
            &self.model_hash,
            &self.artifact_hash,
            self.timestamp,
        )
    }

    /// JSON form.
    pub fn to_document(&self) -> AttestationDocument {
        AttestationDocument {
            user_addr: self.user,
            score: self.score,
            model_hash_hex: self.model_hash,
            artifact_hash_hex: self.artifact_hash,
            ts: self.timestamp,
            sig_b64: self.signature.to_base64(),
        }
    }
}

/// Check an attestation's signature against the signer's public key.
///
/// # Errors
///
/// [`FortError::Crypto`] if the key is invalid or the signature does not
/// cover the attestation's fields.
pub fn verify_attestation(
    public_key: &Ed25519PublicKey,
    attestation: &Attestation,
) -> Result<(), FortError> {
    verify_with_public_key(&attestation.message(), &attestation.signature, public_key)?;
    Ok(())
}

/// Serialized attestation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationDocument {
    pub user_addr: UserAddress,
    pub score: Score,
    pub model_hash_hex: Hash32,
    pub artifact_hash_hex: Hash32,
    pub ts: UnixTimestamp,
    pub sig_b64: String,
}

impl TryFrom<AttestationDocument> for Attestation {
    type Error = FortError;

    fn try_from(doc: AttestationDocument) -> Result<Self, Self::Error> {
        let signature = Ed25519Signature::from_base64(&doc.sig_b64)
            .map_err(|e| FortError::Format(e.to_string()))?;
        Ok(Self {
            user: doc.user_addr,
            score: doc.score,
            model_hash: doc.model_hash_hex,
            artifact_hash: doc.artifact_hash_hex,
            timestamp: doc.ts,
            signature,
        })
    }
}

impl From<&Attestation> for AttestationDocument {
    fn from(a: &Attestation) -> Self {
        a.to_document()
    }
}
