//! Cryptographic primitives and operations
//!
//! This module provides the SHA-512 hash, HMAC-SHA512, hardened ed25519 key
//! derivation and the mnemonic handling the address pipeline is built on.

pub mod sha512;
pub mod hmac;
pub mod mnemonic;
pub mod keys;

pub use self::hmac::{BuiltinMac, MacBackend, MacBackendKind, RustCryptoMac};
pub use self::sha512::sha512;
pub use mnemonic::*;
pub use keys::*;
