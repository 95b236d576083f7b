//! Content-derived block locators.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::domain::errors::VolumeError;

/// Length of a locator string: lowercase hex SHA-256.
pub const LOCATOR_LEN: usize = 64;

/// Identifier of an immutable block, derived from its bytes.
///
/// Two blocks with the same content share the same locator; the store
/// deduplicates by identity of hash and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locator(String);

impl Locator {
    /// Compute the locator for `data`.
    pub fn from_content(data: &[u8]) -> Self {
        Locator(hex::encode(Sha256::digest(data)))
    }

    /// Parse a locator string.
    ///
    /// Rejects anything that is not exactly [`LOCATOR_LEN`] lowercase hex
    /// characters. Foreign keys in a shared bucket must never be mistaken
    /// for blocks.
    pub fn parse(s: &str) -> Result<Self, VolumeError> {
        let valid = s.len() == LOCATOR_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if valid {
            Ok(Locator(s.to_string()))
        } else {
            Err(VolumeError::InvalidLocator(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that `data` still hashes to this locator.
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::from_content(data) == *self
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locator {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Locator {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
