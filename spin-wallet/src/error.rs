//! Error types for the spin-wallet library

use thiserror::Error;

/// Custom error type for spin-wallet operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Mnemonic must be {expected} words, got {actual}")]
    InvalidMnemonicLength { expected: usize, actual: usize },

    #[error("Mnemonic repeats the word at index {index}")]
    DuplicateWords { index: usize },

    #[error("Mnemonic contains an unknown word at index {index}")]
    UnknownWord { index: usize },

    #[error("Mnemonic checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Unsupported derivation: {0}")]
    UnsupportedDerivation(String),

    #[error("Invalid derivation path segment: {0}")]
    InvalidPathSegment(String),

    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for spin-wallet operations
pub type Result<T> = std::result::Result<T, Error>;
