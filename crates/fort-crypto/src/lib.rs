//! # fort-crypto: Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for the FORT stack:
//!
//! - **Ed25519** key pairs, signing, and verification. Signing accepts only
//!   [`Signable`] messages, never raw byte slices.
//! - **SHA-256** artifact hashing over raw file bytes.
//!
//! ## Crate Policy
//!
//! - Depends only on `fort-core` internally.
//! - No mocking of cryptographic operations in tests: all tests use real
//!   SHA-256 and real Ed25519.
//! - `unsafe` prohibited.

pub mod ed25519;
pub mod sha256;

pub use ed25519::{
    verify, verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, Signable,
};
pub use sha256::{artifact_hash, artifact_hash_file, artifact_hash_hex};
