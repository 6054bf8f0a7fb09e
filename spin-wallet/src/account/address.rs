//! Solana address type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::keys::solana::public_key_to_address;
use crate::crypto::keys::KEY_LEN;

/// A base58-encoded ed25519 public key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolanaAddress(String);

impl SolanaAddress {
    /// Encode a 32-byte public key
    pub fn from_public_key(public_key: &[u8; KEY_LEN]) -> Self {
        Self(public_key_to_address(public_key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// `abcd...wxyz` with `chars` characters kept on each side.
    ///
    /// Addresses that would not get shorter, and `chars == 0`, return the
    /// address whole.
    pub fn short(&self, chars: usize) -> String {
        let len = self.0.chars().count();
        if chars == 0 || len <= chars.saturating_mul(2).saturating_add(3) {
            return self.0.clone();
        }
        // base58 is ASCII, so byte offsets are char offsets
        format!("{}...{}", &self.0[..chars], &self.0[len - chars..])
    }
}

impl fmt::Display for SolanaAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SolanaAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_public_key() {
        let address = SolanaAddress::from_public_key(&[0u8; 32]);
        assert_eq!(address.as_str(), "11111111111111111111111111111111");
        assert_eq!(address.to_string(), address.as_str());
    }

    #[test]
    fn test_short() {
        let address = SolanaAddress("3zqCkmY1tWPZr6FrN2rZALeQdjrP7UMdySpjKpcMVgxa".to_string());
        assert_eq!(address.short(4), "3zqC...Vgxa");
        assert_eq!(address.short(6), "3zqCkm...cMVgxa");
    }

    #[test]
    fn test_short_keeps_short_addresses() {
        let address = SolanaAddress("abcdefghijk".to_string());
        assert_eq!(address.short(4), "abcdefghijk");
        assert_eq!(address.short(3), "abc...ijk");
    }

    #[test]
    fn test_short_out_of_range_widths() {
        let address = SolanaAddress("3zqCkmY1tWPZr6FrN2rZALeQdjrP7UMdySpjKpcMVgxa".to_string());
        assert_eq!(address.short(0), address.as_str());
        assert_eq!(address.short(21), address.as_str());
        assert_eq!(address.short(usize::MAX / 2), address.as_str());
        assert_eq!(address.short(usize::MAX), address.as_str());
    }

    #[test]
    fn test_serializes_as_string() {
        let address = SolanaAddress("abc".to_string());
        assert_eq!(serde_json::to_string(&address).unwrap(), "\"abc\"");
    }
}
