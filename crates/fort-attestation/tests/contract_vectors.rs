//! # Contract Compatibility Vectors
//!
//! Fixed key, fixed inputs, fixed signature. The expected values were
//! produced by an independent Ed25519 implementation over the documented
//! 126-byte layout; any change to field order, prefix, or integer encoding
//! breaks these.

use fort_attestation::{
    verify_attestation, Attestation, AttestationDocument, AttestationSigner, MESSAGE_LEN,
};
use fort_core::{Hash32, Score, UnixTimestamp, UserAddress};

/// RFC 8032 test 1 secret key.
const SEED_B64: &str = "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A=";
const SIGNER_PK_B64: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";
const SIGNER_ADDR: &str = "25NJQAMCWEFLPVKL73J4SZAHHIHOC4XT3KTCGJNPAINGR5YHKENMEF5QTE";
const USER_ADDR: &str = "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYP7MUPJQE";
const MODEL_HASH: &str = "77d07a802220bfcf5b0ec9b5832283c08483f768f81226143766029a6430badc";
const ARTIFACT_HASH: &str = "ca7ee964c26cbc10cbe46cd41fe7b7fce02b781ed178f57a927d6f77b6fe402c";
const TS: u64 = 1_705_320_000;
const EXPECTED_SIG_B64: &str =
    "fiYh8S+Q0kuC3e067iASG+p4ORvBGY2mNhZNxzvjr/w87mrzaGwhQ1O6B2d5Wmjs0dXYI4PH8kKDV0ljskYDCg==";

fn sign_vector() -> Attestation {
    let signer = AttestationSigner::from_seed_base64(SEED_B64).unwrap();
    signer.sign(
        UserAddress::parse(USER_ADDR).unwrap(),
        Score::new(742).unwrap(),
        Hash32::from_hex(MODEL_HASH).unwrap(),
        Hash32::from_hex(ARTIFACT_HASH).unwrap(),
        Some(UnixTimestamp::from_secs(TS)),
    )
}

#[test]
fn signer_identity_matches_vector() {
    let signer = AttestationSigner::from_seed_base64(SEED_B64).unwrap();
    assert_eq!(signer.public_key().to_base64(), SIGNER_PK_B64);
    assert_eq!(signer.address().encode(), SIGNER_ADDR);
}

#[test]
fn signature_matches_independent_implementation() {
    let a = sign_vector();
    assert_eq!(a.message().as_bytes().len(), MESSAGE_LEN);
    assert_eq!(a.signature.to_base64(), EXPECTED_SIG_B64);
}

#[test]
fn artifact_hash_is_sha256_of_file_bytes() {
    let h = fort_crypto::artifact_hash(b"date,amount\n2024-01-01,100\n");
    assert_eq!(h.to_hex(), ARTIFACT_HASH);
}

#[test]
fn document_roundtrip_verifies() {
    let a = sign_vector();
    let json = serde_json::to_value(a.to_document()).unwrap();
    assert_eq!(json["userAddr"], USER_ADDR);
    assert_eq!(json["score"], 742);
    assert_eq!(json["modelHashHex"], MODEL_HASH);
    assert_eq!(json["artifactHashHex"], ARTIFACT_HASH);
    assert_eq!(json["ts"], TS);
    assert_eq!(json["sigB64"], EXPECTED_SIG_B64);

    let doc: AttestationDocument = serde_json::from_value(json).unwrap();
    let parsed = Attestation::try_from(doc).unwrap();
    assert_eq!(parsed, a);
    let signer = AttestationSigner::from_seed_base64(SEED_B64).unwrap();
    verify_attestation(&signer.public_key(), &parsed).unwrap();
}

#[test]
fn tampered_document_fails_verification() {
    let mut doc = sign_vector().to_document();
    doc.score = Score::new(743).unwrap();
    let parsed = Attestation::try_from(doc).unwrap();
    let signer = AttestationSigner::from_seed_base64(SEED_B64).unwrap();
    assert!(verify_attestation(&signer.public_key(), &parsed).is_err());
}

#[test]
fn out_of_range_score_in_document_rejected() {
    let mut json = serde_json::to_value(sign_vector().to_document()).unwrap();
    json["score"] = serde_json::json!(1001);
    assert!(serde_json::from_value::<AttestationDocument>(json).is_err());
}
