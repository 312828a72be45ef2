use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Calendar year as stored in the simulation output.
pub type Year = i32;

/// Identifier of one stochastic simulation run.
///
/// Replicates are numbered from 1, so the zero value is unrepresentable and
/// `Option<Replicate>` stays the size of a `u32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Replicate(NonZeroU32);

impl Replicate {
    pub fn new(value: u32) -> CoreResult<Self> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidReplicate {
                value: value.to_string(),
                reason: "replicates are numbered from 1",
            })
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// True when a record's raw replicate field refers to this run.
    pub fn matches(self, raw: u32) -> bool {
        self.get() == raw
    }
}

impl Default for Replicate {
    fn default() -> Self {
        Self(NonZeroU32::MIN)
    }
}

impl TryFrom<u32> for Replicate {
    type Error = CoreError;

    fn try_from(value: u32) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl From<Replicate> for u32 {
    fn from(value: Replicate) -> Self {
        value.get()
    }
}

impl FromStr for Replicate {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidReplicate {
                value: trimmed.to_string(),
                reason: "not a positive integer",
            })?;
        Self::new(value)
    }
}

impl fmt::Debug for Replicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Replicate({})", self.get())
    }
}

impl fmt::Display for Replicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(matches!(
            Replicate::new(0),
            Err(CoreError::InvalidReplicate { .. })
        ));
    }

    #[test]
    fn parses_trimmed_text() {
        let rep: Replicate = " 42 ".parse().unwrap();
        assert_eq!(rep.get(), 42);
        assert!(rep.matches(42));
        assert!(!rep.matches(41));
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        assert!("abc".parse::<Replicate>().is_err());
        assert!("-3".parse::<Replicate>().is_err());
        assert!("1.5".parse::<Replicate>().is_err());
    }

    #[test]
    fn option_replicate_is_small() {
        assert_eq!(
            core::mem::size_of::<Replicate>(),
            core::mem::size_of::<Option<Replicate>>()
        );
    }

    #[test]
    fn serde_rejects_zero() {
        assert!(serde_json::from_str::<Replicate>("0").is_err());
        let rep: Replicate = serde_json::from_str("7").unwrap();
        assert_eq!(rep.get(), 7);
    }
}
