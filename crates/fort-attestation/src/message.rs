//! # Attestation Message Layout
//!
//! The on-chain verifier reconstructs this exact byte string and checks the
//! signature over it, so the layout is a wire contract:
//!
//! ```text
//! offset  len  field
//!      0   14  ASCII "FORT|score|v1|"
//!     14   32  user public key
//!     46    8  score, u64 big-endian
//!     54   32  model hash
//!     86   32  artifact hash
//!    118    8  timestamp, u64 big-endian seconds
//!    126       (end)
//! ```
//!
//! ## Security Invariant
//!
//! Every field is a validated fixed-size type, so construction cannot fail
//! and a message is always exactly [`MESSAGE_LEN`] bytes. The prefix
//! domain-separates these signatures from anything else the key might sign.

use fort_core::{Hash32, Score, UnixTimestamp, UserAddress};
use fort_crypto::Signable;

/// Domain-separation prefix. Must match the contract.
pub const MESSAGE_PREFIX: &[u8; 14] = b"FORT|score|v1|";

/// Total signed length in bytes.
pub const MESSAGE_LEN: usize = MESSAGE_PREFIX.len() + 32 + 8 + 32 + 32 + 8;

/// The canonical bytes signed for one attestation.
#[derive(Clone, PartialEq, Eq)]
pub struct AttestationMessage([u8; MESSAGE_LEN]);

impl AttestationMessage {
    /// Lay out the message fields in contract order.
    pub fn new(
        user: &UserAddress,
        score: Score,
        model_hash: &Hash32,
        artifact_hash: &Hash32,
        timestamp: UnixTimestamp,
    ) -> Self {
        let mut buf = [0u8; MESSAGE_LEN];
        let fields: [&[u8]; 6] = [
            MESSAGE_PREFIX,
            user.public_key(),
            &score.to_be_bytes(),
            model_hash.as_bytes(),
            artifact_hash.as_bytes(),
            &timestamp.to_be_bytes(),
        ];
        let mut offset = 0;
        for field in fields {
            buf[offset..offset + field.len()].copy_from_slice(field);
            offset += field.len();
        }
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8; MESSAGE_LEN] {
        &self.0
    }
}

impl Signable for AttestationMessage {
    fn signing_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for AttestationMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AttestationMessage({} bytes)", self.0.len())
    }
}
