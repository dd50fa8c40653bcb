//! # Score Attestation Endpoints
//!
//! ## Endpoints
//!
//! - `POST /sign-score-latest`: score the latest ledger in the data
//!   directory and sign the result for `userAddr`.
//! - `POST /sign-score`: sign a caller-supplied (key, score, model hash,
//!   artifact hash, timestamp) tuple.
//!
//! ## Security Invariant
//!
//! Every field is decoded and range-checked in [`Validate`] before the
//! handler reaches the signer. A request that fails validation never
//! produces a signature.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use fort_attestation::AttestationDocument;
use fort_core::{FortError, Hash32, Ledger, Score, UnixTimestamp, UserAddress};
use fort_crypto::artifact_hash;
use fort_scoring::score_ledger;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::latest::read_latest;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Body of `POST /sign-score-latest`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignLatestRequest {
    /// 58-character chain address of the scored user.
    pub user_addr: String,
}

/// Body of `POST /sign-score`. Byte fields are base64 of 32 raw bytes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignScoreRequest {
    pub user_pk_b64: String,
    pub score: i64,
    pub model_hash_b64: String,
    pub artifact_hash_b64: String,
    /// Unix seconds; the server's current time when absent.
    #[serde(default)]
    pub ts: Option<u64>,
}

/// Response of `POST /sign-score`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignScoreResponse {
    pub sig_b64: String,
    pub ts: UnixTimestamp,
}

/// A decoded `SignScoreRequest`.
#[derive(Debug)]
pub struct SignScoreInput {
    pub user: UserAddress,
    pub score: Score,
    pub model_hash: Hash32,
    pub artifact_hash: Hash32,
    pub ts: Option<UnixTimestamp>,
}

impl Validate for SignLatestRequest {
    type Validated = UserAddress;

    fn validate(self) -> Result<UserAddress, FortError> {
        UserAddress::parse(&self.user_addr).map_err(|e| in_field("userAddr", e))
    }
}

impl Validate for SignScoreRequest {
    type Validated = SignScoreInput;

    fn validate(self) -> Result<SignScoreInput, FortError> {
        // Lengths first, then range.
        let user = UserAddress::from_base64(&self.user_pk_b64)
            .map_err(|e| in_field("userPkB64", e))?;
        let model_hash =
            Hash32::from_base64(&self.model_hash_b64).map_err(|e| in_field("modelHashB64", e))?;
        let artifact_hash = Hash32::from_base64(&self.artifact_hash_b64)
            .map_err(|e| in_field("artifactHashB64", e))?;
        let score = Score::new(self.score)?;
        Ok(SignScoreInput {
            user,
            score,
            model_hash,
            artifact_hash,
            ts: self.ts.map(UnixTimestamp::from_secs),
        })
    }
}

fn in_field(field: &str, err: FortError) -> FortError {
    match err {
        FortError::Format(msg) => FortError::Format(format!("{field}: {msg}")),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-score-latest", post(sign_score_latest))
        .route("/sign-score", post(sign_score))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /sign-score-latest: score the newest ledger and attest.
///
/// Steps run in a fixed order: select and read the ledger, hash its bytes,
/// parse and score the same bytes, sign.
async fn sign_score_latest(
    State(state): State<AppState>,
    body: Result<Json<SignLatestRequest>, JsonRejection>,
) -> Result<Json<AttestationDocument>, AppError> {
    let user = extract_validated_json(body)?;

    let dir = state.config.data_dir.clone();
    let pattern = state.config.ledger_pattern.clone();
    let input = tokio::task::spawn_blocking(move || read_latest(&dir, &pattern))
        .await
        .map_err(|e| AppError::Internal(format!("ledger read task failed: {e}")))??;

    let artifact = artifact_hash(&input.bytes);
    let text = std::str::from_utf8(&input.bytes)
        .map_err(|_| FortError::Ledger("ledger is not valid UTF-8".to_string()))?;
    let ledger = Ledger::parse_csv(text)?;
    let result = score_ledger(&state.model, &ledger, state.config.window_days)?;

    let attestation =
        state
            .signer
            .sign(user, result.score, state.model.model_hash(), artifact, None);
    tracing::info!(
        user = %user,
        ledger = %input.path.display(),
        score = result.score.value(),
        artifact_hash = %artifact,
        ts = attestation.timestamp.as_secs(),
        "attested latest ledger"
    );
    Ok(Json(attestation.to_document()))
}

/// POST /sign-score: sign a caller-supplied tuple.
async fn sign_score(
    State(state): State<AppState>,
    body: Result<Json<SignScoreRequest>, JsonRejection>,
) -> Result<Json<SignScoreResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let attestation = state.signer.sign(
        req.user,
        req.score,
        req.model_hash,
        req.artifact_hash,
        req.ts,
    );
    tracing::info!(
        user = %req.user,
        score = req.score.value(),
        ts = attestation.timestamp.as_secs(),
        "signed supplied score"
    );
    Ok(Json(SignScoreResponse {
        sig_b64: attestation.signature.to_base64(),
        ts: attestation.timestamp,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PK_B64: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";
    const HASH_B64: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    fn request(score: i64) -> SignScoreRequest {
        SignScoreRequest {
            user_pk_b64: PK_B64.to_string(),
            score,
            model_hash_b64: HASH_B64.to_string(),
            artifact_hash_b64: HASH_B64.to_string(),
            ts: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        let input = request(1000).validate().unwrap();
        assert_eq!(input.score.value(), 1000);
        assert!(input.ts.is_none());
    }

    #[test]
    fn test_validate_range() {
        assert!(matches!(request(1001).validate(), Err(FortError::Range { .. })));
    }

    #[test]
    fn test_validate_length_names_field() {
        let mut req = request(5);
        // 31 bytes.
        req.model_hash_b64 = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA==".to_string();
        match req.validate() {
            Err(FortError::Format(msg)) => assert!(msg.starts_with("modelHashB64")),
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn test_lengths_checked_before_range() {
        let mut req = request(5000);
        req.artifact_hash_b64 = "not base64".to_string();
        assert!(matches!(req.validate(), Err(FortError::Format(_))));
    }

    #[test]
    fn test_latest_request_parses_address() {
        let req = SignLatestRequest {
            user_addr: "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYP7MUPJQE".to_string(),
        };
        let user = req.validate().unwrap();
        assert_eq!(user.public_key()[31], 31);
    }
}
