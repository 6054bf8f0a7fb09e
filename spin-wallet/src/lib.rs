//! Spin Wallet Core - read-only Solana address derivation
//!
//! This library turns a random 12-word mnemonic into a Solana public address
//! without keeping a usable wallet around: a self-contained SHA-512 and
//! HMAC-SHA512, hardened-only ed25519 derivation along `m/44'/501'/0'/0'`,
//! and base58 encoding of the resulting public key. Nothing here signs,
//! exports private keys or talks to the network.

pub mod error;
pub mod config;
pub mod crypto;
pub mod account;

// Re-export commonly used types for convenience
pub use account::{derive_address, AddressDeriver, SolanaAddress, SpinOutcome};
pub use config::DeriveConfig;
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
