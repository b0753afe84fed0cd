use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::PolicyDriftError;

const MULTIPLIER: u64 = 31;

/// 64-bit polynomial rolling hash over the content's code points.
///
/// Only an equality pre-check ahead of the sentence diff. It is not a
/// content address and must not cross a trust boundary: distinct inputs can
/// collide, at roughly 2^-64 for unrelated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ContentHash(u64);

impl ContentHash {
    pub fn of(content: &str) -> Self {
        let value = content
            .chars()
            .fold(0u64, |h, c| h.wrapping_mul(MULTIPLIER).wrapping_add(c as u64));
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for ContentHash {
    type Err = PolicyDriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16)
            .map(ContentHash)
            .map_err(|_| PolicyDriftError::MalformedInput(format!("invalid content hash '{}'", s)))
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.to_string()
    }
}

impl TryFrom<String> for ContentHash {
    type Error = PolicyDriftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
