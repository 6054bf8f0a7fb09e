//! HMAC-SHA512 (RFC 2104) and the MAC backends the derivation engine runs on

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

use super::sha512::{sha512, BLOCK_LEN, DIGEST_LEN};
use crate::error::{Error, Result};

const INNER_PAD: u8 = 0x36;
const OUTER_PAD: u8 = 0x5c;

/// Compute HMAC-SHA512 of `message` under `key` using the built-in SHA-512.
///
/// Keys longer than one block are hashed first; shorter keys are zero padded.
/// Any key or message length is valid, including zero.
pub fn hmac_sha512(key: &[u8], message: &[u8]) -> [u8; DIGEST_LEN] {
    let mut block_key = Zeroizing::new([0u8; BLOCK_LEN]);
    if key.len() > BLOCK_LEN {
        block_key[..DIGEST_LEN].copy_from_slice(&sha512(key));
    } else {
        block_key[..key.len()].copy_from_slice(key);
    }

    let mut inner = Zeroizing::new(Vec::with_capacity(BLOCK_LEN + message.len()));
    inner.extend(block_key.iter().map(|b| b ^ INNER_PAD));
    inner.extend_from_slice(message);
    let inner_digest = sha512(&inner);

    let mut outer = Zeroizing::new([0u8; BLOCK_LEN + DIGEST_LEN]);
    for (out, b) in outer.iter_mut().zip(block_key.iter()) {
        *out = b ^ OUTER_PAD;
    }
    outer[BLOCK_LEN..].copy_from_slice(&inner_digest);

    sha512(&outer[..])
}

/// A keyed HMAC-SHA512 implementation the derivation engine can walk with
pub trait MacBackend {
    /// Authenticate `message` under `key`
    fn hmac_sha512(&self, key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_LEN]>;
}

/// The in-crate SHA-512/HMAC implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMac;

impl MacBackend for BuiltinMac {
    fn hmac_sha512(&self, key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_LEN]> {
        Ok(hmac_sha512(key, message))
    }
}

/// HMAC-SHA512 from the RustCrypto `hmac` and `sha2` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoMac;

impl MacBackend for RustCryptoMac {
    fn hmac_sha512(&self, key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_LEN]> {
        let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(key)
            .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

        hmac.update(message);
        let result = hmac.finalize().into_bytes();

        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&result);
        Ok(out)
    }
}

/// Selectable MAC backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacBackendKind {
    /// Built-in SHA-512/HMAC
    #[default]
    Builtin,
    /// RustCrypto `hmac` + `sha2`
    RustCrypto,
}

impl MacBackend for MacBackendKind {
    fn hmac_sha512(&self, key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_LEN]> {
        match self {
            Self::Builtin => BuiltinMac.hmac_sha512(key, message),
            Self::RustCrypto => RustCryptoMac.hmac_sha512(key, message),
        }
    }
}

impl FromStr for MacBackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "rustcrypto" | "rust-crypto" => Ok(Self::RustCrypto),
            other => Err(Error::Config(format!("Unknown MAC backend: {}", other))),
        }
    }
}

impl fmt::Display for MacBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::RustCrypto => write!(f, "rustcrypto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_and_message() {
        assert_eq!(
            hex::encode(hmac_sha512(b"", b"")),
            "b936cee86c9f87aa5d3c6f2e84cb5a4239a5fe50480a6ec66b70ab5b1f4ac673\
             0c6c515421b327ec1d69402e53dfb49ad7381eb067b338fd7b0cb22247225d47"
        );
    }

    #[test]
    fn test_rfc4231_case_1() {
        assert_eq!(
            hex::encode(hmac_sha512(&[0x0b; 20], b"Hi There")),
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
             daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
    }

    #[test]
    fn test_rfc4231_case_2() {
        assert_eq!(
            hex::encode(hmac_sha512(b"Jefe", b"what do ya want for nothing?")),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_rfc4231_key_longer_than_block() {
        let key = [0xaa; 131];
        assert_eq!(
            hex::encode(hmac_sha512(&key, b"Test Using Larger Than Block-Size Key - Hash Key First")),
            "80b24263c7c1a3ebb71493c1dd7be8b49b46d1f41b4aeec1121b013783f8f352\
             6b56d037e05f2598bd0fd2215d6a1e5295e64f73f63f0aec8b915a985d786598"
        );
    }

    #[test]
    fn test_backends_agree() {
        let message = b"ed25519 seed";
        for key_len in [0usize, 1, 32, 64, 127, 128, 129, 200] {
            let key: Vec<u8> = (0..key_len).map(|i| i as u8).collect();
            let builtin = BuiltinMac.hmac_sha512(&key, message).unwrap();
            let rust_crypto = RustCryptoMac.hmac_sha512(&key, message).unwrap();
            assert_eq!(builtin, rust_crypto, "key length {}", key_len);
        }
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("builtin".parse::<MacBackendKind>().unwrap(), MacBackendKind::Builtin);
        assert_eq!("RustCrypto".parse::<MacBackendKind>().unwrap(), MacBackendKind::RustCrypto);
        assert_eq!("rust-crypto".parse::<MacBackendKind>().unwrap(), MacBackendKind::RustCrypto);
        assert!(matches!("openssl".parse::<MacBackendKind>(), Err(Error::Config(_))));
        assert_eq!(MacBackendKind::RustCrypto.to_string(), "rustcrypto");
    }
}
