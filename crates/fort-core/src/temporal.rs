//! # Temporal Types: Unix-Second Timestamps
//!
//! Attestations carry their signing time as unsigned seconds since the Unix
//! epoch, encoded big-endian in the signed message. `UnixTimestamp` keeps
//! that value distinct from scores and other `u64` quantities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds since 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// The current UTC time, truncated to whole seconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Convert a UTC datetime, clamping instants before the epoch to zero.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(u64::try_from(dt.timestamp()).unwrap_or(0))
    }

    /// Wrap a raw second count.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The raw second count.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Big-endian encoding used in signed messages.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Render as an RFC 3339 UTC string, for logs.
    pub fn to_rfc3339(&self) -> String {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            .unwrap_or_else(|| format!("@{}", self.0))
    }
}

impl From<u64> for UnixTimestamp {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl std::fmt::Display for UnixTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
