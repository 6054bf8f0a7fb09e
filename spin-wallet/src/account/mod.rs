//! Address derivation
//!
//! Turns a validated 12-word mnemonic into a read-only Solana address. No
//! private key, seed or chain code is ever returned to the caller.

mod address;
mod deriver;

pub use address::*;
pub use deriver::*;
