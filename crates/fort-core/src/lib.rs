//! # fort-core: Foundational Types for the FORT Stack
//!
//! This crate is the leaf of the FORT workspace. It defines the value types
//! every other crate exchanges and the single error taxonomy they report.
//!
//! ## Key Design Principles
//!
//! 1. **Fixed-size newtypes at the boundary.** `Hash32`, `UserAddress`,
//!    `Score`, and `UnixTimestamp` are validated on construction. Code past
//!    the boundary never re-checks lengths or ranges.
//!
//! 2. **`CanonicalBytes` newtype.** Structured values that get hashed (the
//!    model identity) flow through `CanonicalBytes::new()`, which produces
//!    RFC 8785 output. No raw `serde_json::to_vec()` for digests.
//!
//! 3. **One error enum.** `FortError` carries the whole taxonomy (config,
//!    model load, format, dimension, range, not found, ledger) so callers
//!    match on variants instead of strings.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fort-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod score;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{bytes_to_hex32, hex32_to_bytes, sha256_digest, Hash32};
pub use error::{CanonicalizationError, CryptoError, FortError};
pub use identity::UserAddress;
pub use ledger::{DailySeries, Ledger, LedgerEntry};
pub use score::Score;
pub use temporal::UnixTimestamp;
