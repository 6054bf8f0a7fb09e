//! Mnemonic to Solana address derivation

use serde::Serialize;
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

use super::address::SolanaAddress;
use crate::config::DeriveConfig;
use crate::crypto::keys::solana::{public_key_from_seed, SOLANA_DERIVATION_PATH};
use crate::crypto::keys::{derive_hardened_with, DerivationPath};
use crate::crypto::mnemonic::{generate_mnemonic, mnemonic_to_seed};
use crate::error::Result;

/// A generated mnemonic together with the address it derives to
#[derive(Clone, Serialize)]
pub struct SpinOutcome {
    pub mnemonic: Vec<String>,
    pub address: SolanaAddress,
    pub short_address: String,
}

impl fmt::Debug for SpinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinOutcome")
            .field("address", &self.address)
            .field("short_address", &self.short_address)
            .finish_non_exhaustive()
    }
}

/// Derives read-only Solana addresses from 12-word mnemonics.
///
/// Only the public key leaves this type. Seeds, derived keys and chain codes
/// are dropped (and wiped) before `derive` returns.
#[derive(Debug, Clone, Default)]
pub struct AddressDeriver {
    config: DeriveConfig,
}

impl AddressDeriver {
    pub fn new(config: DeriveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeriveConfig {
        &self.config
    }

    /// Validate `words` and derive the address at `m/44'/501'/0'/0'`
    pub fn derive<S: AsRef<str>>(&self, words: &[S]) -> Result<SolanaAddress> {
        let seed = mnemonic_to_seed(words)?;
        let path: DerivationPath = SOLANA_DERIVATION_PATH.parse()?;

        let key = Zeroizing::new(derive_hardened_with(&self.config.mac_backend, &seed[..], &path)?);
        let address = SolanaAddress::from_public_key(&public_key_from_seed(&key));

        debug!(backend = %self.config.mac_backend, %path, "derived address");
        Ok(address)
    }

    /// Generate a fresh duplicate-free mnemonic and derive its address
    pub fn spin(&self) -> Result<SpinOutcome> {
        self.config.validate()?;

        let mnemonic = generate_mnemonic(self.config.max_generate_attempts)?;
        let address = self.derive(&mnemonic)?;
        let short_address = address.short(self.config.short_address_chars);

        Ok(SpinOutcome {
            mnemonic,
            address,
            short_address,
        })
    }
}

/// Derive the base58 Solana address of a 12-word mnemonic with default settings
pub fn derive_address<S: AsRef<str>>(words: &[S]) -> Result<String> {
    AddressDeriver::default()
        .derive(words)
        .map(SolanaAddress::into_string)
}
