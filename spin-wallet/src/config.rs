//! Derivation configuration

use serde::{Deserialize, Serialize};

use crate::crypto::hmac::MacBackendKind;
use crate::error::{Error, Result};

/// Widest `short_address_chars` accepted by `validate`.
///
/// A 44-character address shortened with 21 per side is already whole.
pub const MAX_SHORT_ADDRESS_CHARS: usize = 21;

/// Settings for address derivation and mnemonic generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeriveConfig {
    /// HMAC-SHA512 implementation used by the derivation engine
    pub mac_backend: MacBackendKind,
    /// Upper bound on draws when generating a duplicate-free mnemonic
    pub max_generate_attempts: u32,
    /// Characters kept on each side of a shortened address
    pub short_address_chars: usize,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            mac_backend: MacBackendKind::Builtin,
            max_generate_attempts: 64,
            short_address_chars: 4,
        }
    }
}

impl DeriveConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mac_backend = std::env::var("SPIN_MAC_BACKEND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.mac_backend);

        let max_generate_attempts = std::env::var("SPIN_MAX_GENERATE_ATTEMPTS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.max_generate_attempts);

        let short_address_chars = std::env::var("SPIN_SHORT_ADDRESS_CHARS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.short_address_chars);

        Self {
            mac_backend,
            max_generate_attempts,
            short_address_chars,
        }
    }

    /// Use a different MAC backend
    pub fn with_mac_backend(mut self, mac_backend: MacBackendKind) -> Self {
        self.mac_backend = mac_backend;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_generate_attempts == 0 {
            return Err(Error::Config("max_generate_attempts must be at least 1".to_string()));
        }
        if self.short_address_chars == 0 || self.short_address_chars > MAX_SHORT_ADDRESS_CHARS {
            return Err(Error::Config(format!(
                "short_address_chars must be between 1 and {}, got {}",
                MAX_SHORT_ADDRESS_CHARS, self.short_address_chars
            )));
        }
        Ok(())
    }
}
