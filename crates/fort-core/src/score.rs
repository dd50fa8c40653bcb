//! # Contract Scores
//!
//! The on-chain contract accepts integer scores in `[0, 1000]`. `Score` can
//! only hold values in that range, so the signer never has to re-check and
//! a malformed score cannot reach the signing key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FortError;

/// An integer creditworthiness score in `[Score::MIN, Score::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u16);

impl Score {
    /// Lowest representable score.
    pub const MIN: u64 = 0;
    /// Highest representable score.
    pub const MAX: u64 = 1000;

    /// Validate a caller-supplied score.
    ///
    /// # Errors
    ///
    /// Returns [`FortError::Range`] when `value` is outside `[0, 1000]`.
    pub fn new(value: i64) -> Result<Self, FortError> {
        u16::try_from(value)
            .ok()
            .filter(|v| u64::from(*v) <= Self::MAX)
            .map(Self)
            .ok_or_else(|| FortError::score_out_of_range(value, Self::MIN, Self::MAX))
    }

    /// Map a confidence in `[0, 1]` to a score.
    ///
    /// The confidence is clamped first, then scaled by 1000 and rounded half
    /// to even. NaN maps to 0.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence.is_nan() {
            return Self(0);
        }
        let scaled = (confidence.clamp(0.0, 1.0) * Self::MAX as f64).round_ties_even();
        Self(scaled as u16)
    }

    /// The score as the `u64` bound into signed messages.
    pub fn value(&self) -> u64 {
        u64::from(self.0)
    }

    /// Big-endian encoding used in signed messages.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.value().to_be_bytes()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value())
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_accepted() {
        assert_eq!(Score::new(0).unwrap().value(), 0);
        assert_eq!(Score::new(1000).unwrap().value(), 1000);
    }

    #[test]
    fn test_out_of_range_rejected() {
        for bad in [1001, -1, i64::MAX, i64::MIN, 65_536] {
            match Score::new(bad) {
                Err(FortError::Range { value, .. }) => assert_eq!(value, bad),
                other => panic!("expected Range for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_confidence_midpoint() {
        assert_eq!(Score::from_confidence(0.5).value(), 500);
    }

    #[test]
    fn test_from_confidence_clamps() {
        assert_eq!(Score::from_confidence(1.7).value(), 1000);
        assert_eq!(Score::from_confidence(-0.2).value(), 0);
        assert_eq!(Score::from_confidence(f64::NAN).value(), 0);
    }

    #[test]
    fn test_ties_round_to_even() {
        assert_eq!(2.5_f64.round_ties_even(), 2.0);
        assert_eq!(3.5_f64.round_ties_even(), 4.0);
        // 0.0625 * 1000 = 62.5 exactly.
        assert_eq!(Score::from_confidence(0.0625).value(), 62);
        // 0.1875 * 1000 = 187.5 exactly.
        assert_eq!(Score::from_confidence(0.1875).value(), 188);
    }

    #[test]
    fn test_be_bytes() {
        assert_eq!(Score::new(1000).unwrap().to_be_bytes(), [0, 0, 0, 0, 0, 0, 0x03, 0xe8]);
    }

    #[test]
    fn test_serde_range_checked() {
        assert_eq!(serde_json::to_string(&Score::new(712).unwrap()).unwrap(), "712");
        assert!(serde_json::from_str::<Score>("1001").is_err());
        assert!(serde_json::from_str::<Score>("-5").is_err());
        assert_eq!(serde_json::from_str::<Score>("0").unwrap().value(), 0);
    }
}
