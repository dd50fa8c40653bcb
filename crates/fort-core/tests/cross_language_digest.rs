//! # Cross-Implementation Digest Vectors
//!
//! The model hash is bound into every attestation, and verifiers written in
//! other languages recompute it from the published weights. These vectors pin
//! the canonical JSON text and its SHA-256 so any drift in key ordering or
//! number formatting fails loudly.
//!
//! Flat models use JCS text; nested `{"w", "b"}` models use the sorted,
//! space-separated form their publisher hashes.
//!
//! Expected digests were produced by hashing the literal canonical strings
//! below with an independent SHA-256 implementation.

use fort_core::{sha256_digest, CanonicalBytes};
use serde::Serialize;

#[derive(Serialize)]
struct ModelShape {
    weights: Vec<f64>,
    bias: f64,
}

fn canonical(weights: &[f64], bias: f64) -> (String, String) {
    let shape = ModelShape {
        weights: weights.to_vec(),
        bias,
    };
    let cb = CanonicalBytes::new(&shape).expect("canonicalization should succeed");
    let text = String::from_utf8(cb.as_bytes().to_vec()).unwrap();
    (text, sha256_digest(&cb).to_hex())
}

// ---------------------------------------------------------------------------
// Vector 1: all-zero model
// ---------------------------------------------------------------------------

#[test]
fn test_zero_model_vector() {
    let (text, hex) = canonical(&[0.0; 11], 0.0);
    assert_eq!(text, r#"{"bias":0,"weights":[0,0,0,0,0,0,0,0,0,0,0]}"#);
    assert_eq!(
        hex,
        "77d07a802220bfcf5b0ec9b5832283c08483f768f81226143766029a6430badc"
    );
}

// ---------------------------------------------------------------------------
// Vector 2: mixed signs, integral floats, short decimals
// ---------------------------------------------------------------------------

#[test]
fn test_mixed_model_vector() {
    let weights = [0.1, -0.25, 1.5, 2.0, 0.003, -3.125, 0.5, 1.0, -1.0, 0.25, -0.05];
    let (text, hex) = canonical(&weights, -0.75);
    assert_eq!(
        text,
        r#"{"bias":-0.75,"weights":[0.1,-0.25,1.5,2,0.003,-3.125,0.5,1,-1,0.25,-0.05]}"#
    );
    assert_eq!(
        hex,
        "5b5a8967a066ebeadeb23fae2a92ffbd12606194b683fa7c6d4f108c45f2d067"
    );
}

// ---------------------------------------------------------------------------
// Vector 3: exponent form below 1e-6, integral value above 1
// ---------------------------------------------------------------------------

#[test]
fn test_exponent_formatting_vector() {
    let (text, hex) = canonical(&[1e-7, 100.0], 0.5);
    assert_eq!(text, r#"{"bias":0.5,"weights":[1e-7,100]}"#);
    assert_eq!(
        hex,
        "1882f1e957d7a8b09c745ea2a61cd5ff930aeab91cb38bc84c24e61b67a6adc6"
    );
}

#[test]
fn test_field_declaration_order_is_irrelevant() {
    #[derive(Serialize)]
    struct Reversed {
        bias: f64,
        weights: Vec<f64>,
    }
    let a = CanonicalBytes::new(&ModelShape {
        weights: vec![1.0, 2.0],
        bias: 3.0,
    })
    .unwrap();
    let b = CanonicalBytes::new(&Reversed {
        bias: 3.0,
        weights: vec![1.0, 2.0],
    })
    .unwrap();
    assert_eq!(a, b);
    assert_eq!(sha256_digest(&a), sha256_digest(&b));
}

// ---------------------------------------------------------------------------
// Nested layout: sorted keys, ", " and ": " separators, float repr
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct NestedShape {
    w: Vec<f64>,
    b: f64,
}

fn sorted_spaced(w: &[f64], b: f64) -> (String, String) {
    let cb = CanonicalBytes::sorted_spaced(&NestedShape { w: w.to_vec(), b })
        .expect("canonicalization should succeed");
    let text = String::from_utf8(cb.as_bytes().to_vec()).unwrap();
    (text, sha256_digest(&cb).to_hex())
}

#[test]
fn test_nested_zero_model_vector() {
    let (text, hex) = sorted_spaced(&[0.0; 11], 0.0);
    assert_eq!(
        text,
        r#"{"b": 0.0, "w": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]}"#
    );
    assert_eq!(
        hex,
        "b075fa408a629fb9d29c7c75589253a5a62ca480518cbd6e6d7a3eec94c32dbe"
    );
}

#[test]
fn test_nested_float_repr_vector() {
    let w = [
        0.35,
        -1.2e-5,
        3e16,
        1e-4,
        123_456_789.125,
        -0.5,
        2.0,
        1e15,
        0.1,
        7.0,
        -3.25,
    ];
    let (text, hex) = sorted_spaced(&w, 1e-7);
    assert_eq!(
        text,
        r#"{"b": 1e-07, "w": [0.35, -1.2e-05, 3e+16, 0.0001, 123456789.125, -0.5, 2.0, 1000000000000000.0, 0.1, 7.0, -3.25]}"#
    );
    assert_eq!(
        hex,
        "7d53daaa4c1d5f1c6c264224620752a899085c3066a7c83daa04e784fafe6f9d"
    );
}
