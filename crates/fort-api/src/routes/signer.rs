//! # Signer Identity
//!
//! `GET /signer`: lets a verifier pin the aggregator key and the model
//! identity this process attests with.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use fort_core::{Hash32, UserAddress};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerResponse {
    /// Raw Ed25519 public key, base64.
    pub public_key_b64: String,
    /// The same key as a chain address.
    pub address: UserAddress,
    pub model_hash_hex: Hash32,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/signer", get(signer_info))
}

async fn signer_info(State(state): State<AppState>) -> Json<SignerResponse> {
    Json(SignerResponse {
        public_key_b64: state.signer.public_key().to_base64(),
        address: state.signer.address(),
        model_hash_hex: state.model.model_hash(),
    })
}
