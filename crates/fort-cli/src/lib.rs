//! # fort-cli: FORT Operator Command-Line Interface
//!
//! Offline counterpart of the attestation service. Operators use it to
//! score a ledger before publishing it, check a model's identity hash,
//! generate aggregator keys, and verify attestations returned by the API.
//!
//! ## Subcommands
//!
//! - `score`: extract features and score a ledger file
//! - `model-hash`: print a model's identity hash
//! - `sign`: score a ledger and sign the result
//! - `verify`: verify an attestation against a signer key
//! - `keygen`: generate an Ed25519 aggregator key pair
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates; no scoring or message
//!   layout logic lives here.
//! - Handlers return an exit code; `main` maps it to the process status.

pub mod scoring;
pub mod signing;
