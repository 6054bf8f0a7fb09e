//! Solana public keys and addresses

use ed25519_dalek::SigningKey;

use super::derivation::KEY_LEN;

/// The derivation path of the first Solana account, in text form
pub const SOLANA_DERIVATION_PATH: &str = "m/44'/501'/0'/0'";

/// Expand a 32-byte ed25519 seed and return only its public key
pub fn public_key_from_seed(seed: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
    let signing_key = SigningKey::from_bytes(seed);
    signing_key.verifying_key().to_bytes()
}

/// Get the Solana address (base58) of a public key
pub fn public_key_to_address(public_key: &[u8; KEY_LEN]) -> String {
    bs58::encode(public_key).into_string()
}
