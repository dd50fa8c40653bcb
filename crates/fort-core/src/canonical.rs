//! # Canonical Serialization: JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! used in content-hash computation of structured values (model identity).
//!
//! ## Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. It is built only
//! by `CanonicalBytes::new()`, which serializes through RFC 8785 (JSON
//! Canonicalization Scheme), or by `CanonicalBytes::sorted_spaced()` below:
//!
//! 1. Object keys sorted by UTF-16 code units, compact separators.
//! 2. Numbers rendered in ECMAScript shortest round-trip form, so `0.0`
//!    becomes `0`, `0.5` stays `0.5`, and `1e-7` stays `1e-7`.
//! 3. Integers outside ±2^53 are rejected; they have no exact double form
//!    and other implementations would render them differently.
//!
//! Two implementations holding bit-identical `f64` values therefore produce
//! byte-identical canonical output.
//!
//! ## Sorted-Spaced Form
//!
//! Nested-layout model files predate JCS and are identified by a different
//! text: keys sorted, `", "` and `": "` separators, floats in shortest
//! round-trip digits that always read back as floats (`0.0`, `1e-07`,
//! `1e+16`), non-ASCII escaped as `\uXXXX`. [`CanonicalBytes::sorted_spaced`]
//! produces exactly that text so existing model hashes stay valid.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Largest integer magnitude that survives a round trip through `f64`.
const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// Bytes produced exclusively by a deterministic canonical serializer.
///
/// # Invariants
///
/// - The only constructors are `CanonicalBytes::new()` (JCS) and
///   `CanonicalBytes::sorted_spaced()`.
/// - Keys are sorted in both forms.
/// - All integers are within ±2^53.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::UnsafeInteger` if the value contains an
    /// integer beyond ±2^53. Returns `CanonicalizationError::SerializationFailed`
    /// if serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        check_json_value(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Construct the sorted-spaced form of a serializable value.
    ///
    /// # Errors
    ///
    /// Same as [`CanonicalBytes::new`].
    pub fn sorted_spaced(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        check_json_value(&value)?;
        let mut out = String::new();
        write_sorted_spaced(&value, &mut out)?;
        Ok(Self(out.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn check_json_value(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            let unsafe_int = match (n.as_u64(), n.as_i64()) {
                (Some(u), _) => u > MAX_SAFE_INTEGER,
                (None, Some(i)) => i.unsigned_abs() > MAX_SAFE_INTEGER,
                (None, None) => false,
            };
            if unsafe_int {
                return Err(CanonicalizationError::UnsafeInteger(n.to_string()));
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(check_json_value),
        Value::Array(arr) => arr.iter().try_for_each(check_json_value),
    }
}

fn write_sorted_spaced(value: &Value, out: &mut String) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => out.push_str(&float_repr(f)),
            _ => out.push_str(&n.to_string()),
        },
        Value::String(s) => write_ascii_string(s, out)?,
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_sorted_spaced(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_ascii_string(key, out)?;
                out.push_str(": ");
                write_sorted_spaced(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_ascii_string(s: &str, out: &mut String) -> Result<(), CanonicalizationError> {
    let escaped = serde_json::to_string(s)?;
    let mut units = [0u16; 2];
    for c in escaped.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    Ok(())
}

/// Shortest round-trip digits; positional for exponents in `[-4, 16)`,
/// otherwise `<mantissa>e<sign><at least two digits>`.
fn float_repr(v: f64) -> String {
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..16).contains(&exp) {
        let fixed = v.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}
