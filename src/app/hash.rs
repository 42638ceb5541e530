//! Identifier hash token
//!
//! Manifest directories are namespaced by a short token derived from the item
//! identifier: the first 8 hex characters of the SHA-256 digest of the
//! identifier's decimal representation. The token only disambiguates names on
//! disk; collisions between truncated digests are not guarded against.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::constants::store::HASH_HEX_LEN;

/// Truncated SHA-256 of an item identifier, stored as its 4 raw bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdHash([u8; HASH_HEX_LEN / 2]);

impl IdHash {
    /// Derive the token for an identifier
    ///
    /// The digest input is the plain decimal form of `id` (no padding, no
    /// separators), so `IdHash::of(1)` hashes the single byte `"1"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gear_sync::app::IdHash;
    ///
    /// assert_eq!(IdHash::of(1).to_hex(), "6b86b273");
    /// assert_eq!(IdHash::of(1), IdHash::of(1));
    /// ```
    pub fn of(id: u64) -> Self {
        let digest = Sha256::digest(id.to_string().as_bytes());
        let mut bytes = [0u8; HASH_HEX_LEN / 2];
        bytes.copy_from_slice(&digest[..HASH_HEX_LEN / 2]);
        IdHash(bytes)
    }

    /// Lowercase hex representation, always 8 characters
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for IdHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
