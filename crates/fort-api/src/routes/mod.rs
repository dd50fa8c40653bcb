//! # API Route Modules
//!
//! - `health`: liveness with server time.
//! - `scoring`: score the latest ledger and sign it; sign caller-supplied
//!   tuples.
//! - `signer`: the aggregator's public identity and the loaded model hash.

pub mod health;
pub mod scoring;
pub mod signer;
