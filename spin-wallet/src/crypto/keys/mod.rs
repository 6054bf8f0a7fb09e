//! Key derivation and management
//!
//! Hardened ed25519 derivation and the Solana key/address helpers built on it.

pub mod solana;
mod derivation;

pub use derivation::*;
