//! # Integration Tests for fort-api
//!
//! Drives the full router with `tower::ServiceExt::oneshot`: health, signer
//! identity, latest-ledger attestation (selection, hashing, scoring,
//! signing), caller-supplied signing, error mapping, and CORS.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fort_api::config::AppConfig;
use fort_api::state::AppState;
use fort_attestation::{verify_attestation, Attestation, AttestationDocument, AttestationSigner};
use fort_scoring::{Model, FEATURE_COUNT};

const SEED_B64: &str = "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A=";
const SIGNER_PK_B64: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";
const SIGNER_ADDR: &str = "25NJQAMCWEFLPVKL73J4SZAHHIHOC4XT3KTCGJNPAINGR5YHKENMEF5QTE";
const USER_ADDR: &str = "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYP7MUPJQE";
const USER_PK_B64: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";
const ZERO_MODEL_HASH: &str = "77d07a802220bfcf5b0ec9b5832283c08483f768f81226143766029a6430badc";
const ZERO_MODEL_HASH_B64: &str = "d9B6gCIgv89bDsm1gyKDwISD92j4EiYUN2YCmmQwutw=";
const ARTIFACT_HASH_B64: &str = "yn7pZMJsvBDL5GzUH+e3/OAreB7RePV6kn1vd7b+QCw=";
const VECTOR_SIG_B64: &str =
    "fiYh8S+Q0kuC3e067iASG+p4ORvBGY2mNhZNxzvjr/w87mrzaGwhQ1O6B2d5Wmjs0dXYI4PH8kKDV0ljskYDCg==";

const OLDER_LEDGER: &str = "date,amount\n2024-01-01,100\n2024-01-02,-20\n";
const NEWER_LEDGER: &str = "date,amount\n2024-03-01,2500\n2024-03-05,-700.25\n2024-03-20,-80\n";

// -- Helpers ------------------------------------------------------------------

fn config_for(data_dir: &Path) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("AGG_SK_BASE64", SEED_B64.to_string()),
        ("DATA_DIR", data_dir.display().to_string()),
    ]);
    AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap()
}

fn test_app(data_dir: &Path) -> axum::Router {
    let model = Model::from_parts(vec![0.0; FEATURE_COUNT], 0.0).unwrap();
    let signer = AttestationSigner::from_seed_base64(SEED_B64).unwrap();
    fort_api::app(AppState::new(model, signer, config_for(data_dir)))
}

fn ledger_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("client_001.csv"), OLDER_LEDGER).unwrap();
    std::fs::write(dir.path().join("client_002.csv"), NEWER_LEDGER).unwrap();
    std::fs::write(dir.path().join("readme.txt"), "not a ledger").unwrap();
    dir
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn call(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn sign_score_body(score: i64) -> Value {
    json!({
        "userPkB64": USER_PK_B64,
        "score": score,
        "modelHashB64": ZERO_MODEL_HASH_B64,
        "artifactHashB64": ARTIFACT_HASH_B64,
        "ts": 1_705_320_000u64,
    })
}

// -- Health -------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let dir = ledger_dir();
    let (status, body) = call(test_app(dir.path()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["ts"].as_u64().unwrap() > 1_700_000_000);
}

// -- Signer identity ----------------------------------------------------------

#[tokio::test]
async fn test_signer_identity() {
    let dir = ledger_dir();
    let (status, body) = call(test_app(dir.path()), get("/signer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["publicKeyB64"], SIGNER_PK_B64);
    assert_eq!(body["address"], SIGNER_ADDR);
    assert_eq!(body["modelHashHex"], ZERO_MODEL_HASH);
}

// -- POST /sign-score-latest --------------------------------------------------

#[tokio::test]
async fn test_sign_score_latest_happy_path() {
    let dir = ledger_dir();
    let (status, body) = call(
        test_app(dir.path()),
        post_json("/sign-score-latest", json!({ "userAddr": USER_ADDR })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["userAddr"], USER_ADDR);
    assert_eq!(body["score"], 500);
    assert_eq!(body["modelHashHex"], ZERO_MODEL_HASH);
    assert_eq!(
        body["artifactHashHex"],
        fort_crypto::artifact_hash_hex(NEWER_LEDGER.as_bytes())
    );
    assert_eq!(body["sigB64"].as_str().unwrap().len(), 88);

    let doc: AttestationDocument = serde_json::from_value(body).unwrap();
    let attestation = Attestation::try_from(doc).unwrap();
    let signer = AttestationSigner::from_seed_base64(SEED_B64).unwrap();
    verify_attestation(&signer.public_key(), &attestation).unwrap();
}

#[tokio::test]
async fn test_sign_score_latest_bad_address() {
    let dir = ledger_dir();
    let mut bad = USER_ADDR.to_string();
    bad.replace_range(0..1, "B");
    for addr in ["short", bad.as_str()] {
        let (status, body) = call(
            test_app(dir.path()),
            post_json("/sign-score-latest", json!({ "userAddr": addr })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{addr}");
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_sign_score_latest_no_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = call(
        test_app(dir.path()),
        post_json("/sign-score-latest", json!({ "userAddr": USER_ADDR })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_sign_score_latest_unparsable_ledger() {
    let dir = ledger_dir();
    std::fs::write(dir.path().join("client_003.csv"), "date,amount\nyesterday,12\n").unwrap();
    let (status, body) = call(
        test_app(dir.path()),
        post_json("/sign-score-latest", json!({ "userAddr": USER_ADDR })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]["message"].as_str().unwrap().contains("line 2"));
}

#[tokio::test]
async fn test_sign_score_latest_missing_field() {
    let dir = ledger_dir();
    let (status, _) = call(
        test_app(dir.path()),
        post_json("/sign-score-latest", json!({ "user": USER_ADDR })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -- POST /sign-score ---------------------------------------------------------

#[tokio::test]
async fn test_sign_score_matches_vector() {
    let dir = ledger_dir();
    let (status, body) =
        call(test_app(dir.path()), post_json("/sign-score", sign_score_body(742))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["sigB64"], VECTOR_SIG_B64);
    assert_eq!(body["ts"], 1_705_320_000u64);
}

#[tokio::test]
async fn test_sign_score_is_deterministic() {
    let dir = ledger_dir();
    let (_, a) = call(test_app(dir.path()), post_json("/sign-score", sign_score_body(10))).await;
    let (_, b) = call(test_app(dir.path()), post_json("/sign-score", sign_score_body(10))).await;
    assert_eq!(a["sigB64"], b["sigB64"]);
}

#[tokio::test]
async fn test_sign_score_defaults_timestamp() {
    let dir = ledger_dir();
    let mut body = sign_score_body(10);
    body.as_object_mut().unwrap().remove("ts");
    let (status, resp) = call(test_app(dir.path()), post_json("/sign-score", body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["ts"].as_u64().unwrap() > 1_700_000_000);
}

#[tokio::test]
async fn test_sign_score_out_of_range() {
    let dir = ledger_dir();
    for score in [1001, -1] {
        let (status, body) =
            call(test_app(dir.path()), post_json("/sign-score", sign_score_body(score))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "score {score}");
        assert!(body["error"]["message"].as_str().unwrap().contains("out of range"));
    }
}

#[tokio::test]
async fn test_sign_score_bad_lengths() {
    let dir = ledger_dir();
    let mut body = sign_score_body(10);
    // 31 bytes.
    body["modelHashB64"] = json!("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA==");
    let (status, resp) = call(test_app(dir.path()), post_json("/sign-score", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["error"]["message"].as_str().unwrap().contains("modelHashB64"));
}

#[tokio::test]
async fn test_sign_score_bad_base64() {
    let dir = ledger_dir();
    let mut body = sign_score_body(10);
    body["userPkB64"] = json!("%%%");
    let (status, _) = call(test_app(dir.path()), post_json("/sign-score", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_score_malformed_json() {
    let dir = ledger_dir();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/sign-score")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = call(test_app(dir.path()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// -- CORS ---------------------------------------------------------------------

#[tokio::test]
async fn test_cors_preflight_allows_frontend() {
    let dir = ledger_dir();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/sign-score-latest")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = test_app(dir.path()).oneshot(req).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let dir = ledger_dir();
    let req = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = test_app(dir.path()).oneshot(req).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let dir = ledger_dir();
    let response = test_app(dir.path()).oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
