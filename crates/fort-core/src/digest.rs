//! # 32-Byte Content Hashes
//!
//! Defines `Hash32`, the fixed-size identifier for model versions and input
//! artifacts that is bound into every attestation.
//!
//! ## Boundary Encodings
//!
//! - **Hex**: lower-case, 64 characters. Parsing accepts upper case and an
//!   optional `0x` prefix.
//! - **Base64**: standard alphabet with padding, 44 characters.
//!
//! Both parsers reject anything that does not decode to exactly 32 bytes
//! with [`FortError::Format`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::FortError;

/// A 32-byte content hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, failing unless it is exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FortError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            FortError::Format(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as lower-case hex.
    pub fn to_hex(&self) -> String {
        bytes_to_hex32(&self.0)
    }

    /// Parse from hex, tolerating case and a `0x` prefix.
    pub fn from_hex(hex: &str) -> Result<Self, FortError> {
        hex32_to_bytes(hex).map(Self)
    }

    /// Render as standard padded base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Parse from standard padded base64.
    pub fn from_base64(b64: &str) -> Result<Self, FortError> {
        let bytes = STANDARD
            .decode(b64.trim())
            .map_err(|e| FortError::Format(format!("invalid base64: {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl std::fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hash32({})", self.to_hex())
    }
}

impl std::fmt::Display for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Hash32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Render 32 bytes as lower-case hex.
pub fn bytes_to_hex32(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a 32-byte value from hex.
///
/// The input is lower-cased and a leading `0x` is stripped before decoding,
/// so `0xABCD...` and `abcd...` are equivalent.
pub fn hex32_to_bytes(hex: &str) -> Result<[u8; 32], FortError> {
    let lowered = hex.trim().to_ascii_lowercase();
    let digits = lowered.strip_prefix("0x").unwrap_or(&lowered);
    let bytes = decode_hex(digits)?;
    let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        FortError::Format(format!("expected 32B hex, got {} bytes", bytes.len()))
    })?;
    Ok(arr)
}

/// Compute SHA-256 over canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> Hash32 {
    Hash32(Sha256::digest(data.as_bytes()).into())
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, FortError> {
    if hex.len() % 2 != 0 {
        return Err(FortError::Format(
            "hex string must have even length".to_string(),
        ));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| FortError::Format(format!("invalid hex at position {i}")))
        })
        .collect()
}
