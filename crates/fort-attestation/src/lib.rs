//! # fort-attestation: Signed Score Attestations
//!
//! Binds a score to the user it describes, the model that produced it, and
//! the exact input bytes it was computed from, under the aggregator's
//! Ed25519 key:
//!
//! - **Message** (`message.rs`): the canonical 126-byte layout the contract
//!   verifies.
//! - **Signer** (`signer.rs`): validates raw fields, then signs.
//! - **Attestation** (`attestation.rs`): the signed tuple, its JSON form,
//!   and [`verify_attestation`].
//!
//! ## Crate Policy
//!
//! - Signing goes through `fort_crypto::Signable`; this crate never hands
//!   raw bytes to the key.
//! - No clock reads except the default timestamp in `AttestationSigner::sign`.

pub mod attestation;
pub mod message;
pub mod signer;

pub use attestation::{verify_attestation, Attestation, AttestationDocument};
pub use message::{AttestationMessage, MESSAGE_LEN, MESSAGE_PREFIX};
pub use signer::AttestationSigner;
