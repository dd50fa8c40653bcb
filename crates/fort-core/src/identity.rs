//! # User Identity: Chain-Native Addresses
//!
//! A scored user is identified by a 32-byte Ed25519 public key. Callers pass
//! it either as a 58-character chain address or as raw base64.
//!
//! ## Address Format
//!
//! ```text
//! address = base32_nopad(pk ‖ sha512_256(pk)[28..32])
//! ```
//!
//! RFC 4648 alphabet, upper case, no padding, non-zero trailing bits
//! rejected. The trailing 4-byte checksum
//! is verified on parse so a mistyped address fails with a format error
//! instead of producing an attestation for a key nobody holds.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};

use crate::error::FortError;

const CHECKSUM_LEN: usize = 4;

/// The 32-byte public key of a scored user.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserAddress([u8; 32]);

impl UserAddress {
    /// Length of the textual address.
    pub const ENCODED_LEN: usize = 58;

    /// Wrap a raw public key.
    pub fn from_public_key(pk: [u8; 32]) -> Self {
        Self(pk)
    }

    /// The raw 32-byte public key bound into attestations.
    pub fn public_key(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the checksummed chain address.
    pub fn encode(&self) -> String {
        let mut buf = Vec::with_capacity(32 + CHECKSUM_LEN);
        buf.extend_from_slice(&self.0);
        buf.extend_from_slice(&checksum(&self.0));
        BASE32_NOPAD.encode(&buf)
    }

    /// Parse a checksummed chain address.
    pub fn parse(address: &str) -> Result<Self, FortError> {
        let address = address.trim();
        if address.len() != Self::ENCODED_LEN {
            return Err(FortError::Format(format!(
                "address must be {} characters, got {}",
                Self::ENCODED_LEN,
                address.len()
            )));
        }
        let decoded = BASE32_NOPAD
            .decode(address.as_bytes())
            .map_err(|e| FortError::Format(format!("address is not valid base32: {e}")))?;
        if decoded.len() != 32 + CHECKSUM_LEN {
            return Err(FortError::Format(format!(
                "address decodes to {} bytes",
                decoded.len()
            )));
        }
        let (pk_bytes, sum) = decoded.split_at(32);
        let mut pk = [0u8; 32];
        pk.copy_from_slice(pk_bytes);
        if checksum(&pk) != sum {
            return Err(FortError::Format("address checksum mismatch".to_string()));
        }
        Ok(Self(pk))
    }

    /// Parse a raw public key from standard base64 (44 characters).
    pub fn from_base64(b64: &str) -> Result<Self, FortError> {
        let bytes = STANDARD
            .decode(b64.trim())
            .map_err(|e| FortError::Format(format!("invalid base64 public key: {e}")))?;
        let pk: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            FortError::Format(format!("public key must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(pk))
    }

    /// Render the raw public key as standard base64.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }
}

impl std::fmt::Debug for UserAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserAddress({})", self.encode())
    }
}

impl std::fmt::Display for UserAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::str::FromStr for UserAddress {
    type Err = FortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for UserAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for UserAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn checksum(pk: &[u8; 32]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha512_256::digest(pk);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    out
}
