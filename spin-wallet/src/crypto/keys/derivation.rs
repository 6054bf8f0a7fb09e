//! Hardened-only ed25519 key derivation (SLIP-0010)
//!
//! ed25519 has no public-parent-to-public-child derivation, so every segment
//! of a path must be hardened. Paths with a normal segment are rejected
//! rather than derived differently.

use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::hmac::{BuiltinMac, MacBackend};
use crate::error::{Error, Result};

/// Offset added to an index to mark it hardened
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for the master node of the ed25519 curve
pub const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// Length of a derived key and of a chain code
pub const KEY_LEN: usize = 32;

/// Message length for a hardened child: 0x00 || key || index
const CHILD_MESSAGE_LEN: usize = 1 + KEY_LEN + 4;

/// One segment of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    index: u32,
    hardened: bool,
}

impl ChildIndex {
    /// A hardened segment (`index'`)
    pub fn hardened(index: u32) -> Self {
        Self { index, hardened: true }
    }

    /// A normal segment; never derivable on ed25519
    pub fn normal(index: u32) -> Self {
        Self { index, hardened: false }
    }

    /// The index without the hardened offset
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Whether the segment carries the hardened marker
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// The big-endian value that goes into the child HMAC message.
    ///
    /// Fails for normal segments and for indices that do not fit in 31 bits.
    fn hardened_value(&self) -> Result<u32> {
        if !self.is_hardened() {
            return Err(Error::UnsupportedDerivation(format!(
                "non-hardened segment {} is not supported for ed25519",
                self
            )));
        }
        if self.index >= HARDENED_OFFSET {
            return Err(Error::InvalidPathSegment(format!(
                "index {} does not fit in 31 bits",
                self.index
            )));
        }
        Ok(self.index + HARDENED_OFFSET)
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// An ordered list of segments below the master node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    pub fn new(segments: Vec<ChildIndex>) -> Self {
        Self(segments)
    }

    /// `m/44'/501'/0'/0'`, the path Solana wallets use for the first account
    pub fn solana() -> Self {
        Self(vec![
            ChildIndex::hardened(44),
            ChildIndex::hardened(501),
            ChildIndex::hardened(0),
            ChildIndex::hardened(0),
        ])
    }

    pub fn segments(&self) -> &[ChildIndex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    /// Parse `m/<n>'/<n>'/...`; `h` and `H` are accepted as hardened markers.
    fn from_str(path: &str) -> Result<Self> {
        let mut parts = path.split('/');
        if parts.next() != Some("m") {
            return Err(Error::InvalidPath(format!("path must start with m: {}", path)));
        }

        let mut segments = Vec::new();
        for part in parts {
            if part.is_empty() {
                return Err(Error::InvalidPath(format!("empty segment in {}", path)));
            }

            let digits = match part.strip_suffix(['\'', 'h', 'H']) {
                Some(digits) => digits,
                None => {
                    return Err(Error::UnsupportedDerivation(format!(
                        "non-hardened segment {} is not supported for ed25519",
                        part
                    )))
                }
            };

            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidPathSegment(part.to_string()));
            }
            let index = digits
                .parse::<u32>()
                .ok()
                .filter(|index| *index < HARDENED_OFFSET)
                .ok_or_else(|| Error::InvalidPathSegment(part.to_string()))?;

            segments.push(ChildIndex::hardened(index));
        }

        Ok(Self(segments))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// A derivation node: a private key and its chain code. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedKey {
    key: [u8; KEY_LEN],
    chain_code: [u8; KEY_LEN],
}

impl ExtendedKey {
    /// Derive the master node from a seed
    pub fn master<M: MacBackend + ?Sized>(mac: &M, seed: &[u8]) -> Result<Self> {
        let digest = mac.hmac_sha512(ED25519_SEED_KEY, seed)?;
        Ok(Self::from_digest(digest))
    }

    /// Derive the hardened child at `index`
    pub fn derive_child<M: MacBackend + ?Sized>(&self, mac: &M, index: ChildIndex) -> Result<Self> {
        let value = index.hardened_value()?;

        let mut data = [0u8; CHILD_MESSAGE_LEN];
        data[1..1 + KEY_LEN].copy_from_slice(&self.key);
        data[1 + KEY_LEN..].copy_from_slice(&value.to_be_bytes());

        let digest = mac.hmac_sha512(&self.chain_code, &data);
        data.zeroize();
        Ok(Self::from_digest(digest?))
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn chain_code(&self) -> &[u8; KEY_LEN] {
        &self.chain_code
    }

    fn from_digest(mut digest: [u8; 64]) -> Self {
        let mut key = [0u8; KEY_LEN];
        let mut chain_code = [0u8; KEY_LEN];
        key.copy_from_slice(&digest[..KEY_LEN]);
        chain_code.copy_from_slice(&digest[KEY_LEN..]);
        digest.zeroize();
        Self { key, chain_code }
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey").finish_non_exhaustive()
    }
}

/// Walk `path` from the master node of `seed` and return the final node.
///
/// Every segment is checked before any HMAC runs, so a bad path never
/// produces key material.
pub fn derive_node_with<M: MacBackend + ?Sized>(
    mac: &M,
    seed: &[u8],
    path: &DerivationPath,
) -> Result<ExtendedKey> {
    for segment in path.segments() {
        segment.hardened_value()?;
    }

    let mut node = ExtendedKey::master(mac, seed)?;
    for segment in path.segments() {
        node = node.derive_child(mac, *segment)?;
    }
    Ok(node)
}

/// Derive the 32-byte ed25519 private seed at `path` using `mac`
pub fn derive_hardened_with<M: MacBackend + ?Sized>(
    mac: &M,
    seed: &[u8],
    path: &DerivationPath,
) -> Result<[u8; KEY_LEN]> {
    let node = derive_node_with(mac, seed, path)?;
    Ok(*node.key())
}

/// Derive the 32-byte ed25519 private seed at `path` with the built-in HMAC
pub fn derive_hardened(seed: &[u8], path: &DerivationPath) -> Result<[u8; KEY_LEN]> {
    derive_hardened_with(&BuiltinMac, seed, path)
}
