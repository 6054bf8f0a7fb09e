//! Mnemonic phrase generation and validation
//!
//! Mnemonics here are always 12 BIP-39 English words with no word repeated.
//! The no-repeat rule is stricter than BIP-39 itself and is applied both when
//! generating and when validating.

use std::collections::HashSet;

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::warn;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Number of words in every mnemonic handled by this crate
pub const MNEMONIC_WORD_COUNT: usize = 12;

/// Entropy behind a 12-word mnemonic (128 bits)
const ENTROPY_BYTES: usize = 16;

/// Length of a BIP-39 seed
pub const SEED_LEN: usize = 64;

/// Generate a fresh 12-word mnemonic with no repeated word.
///
/// Draws are repeated until a duplicate-free phrase comes up, at most
/// `max_attempts` times.
pub fn generate_mnemonic(max_attempts: u32) -> Result<Vec<String>> {
    generate_mnemonic_with(&mut OsRng, max_attempts)
}

/// Generate a duplicate-free mnemonic from the given entropy source
pub fn generate_mnemonic_with<R: RngCore + CryptoRng>(rng: &mut R, max_attempts: u32) -> Result<Vec<String>> {
    for attempt in 1..=max_attempts {
        let mut entropy = Zeroizing::new([0u8; ENTROPY_BYTES]);
        rng.fill_bytes(&mut entropy[..]);

        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..])
            .map_err(|e| Error::Mnemonic(e.to_string()))?;
        let phrase = Zeroizing::new(mnemonic.to_string());
        let words: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();

        if first_repeat(&words).is_none() {
            return Ok(words);
        }
        warn!(attempt, "generated mnemonic repeats a word, drawing again");
    }

    Err(Error::Mnemonic(format!(
        "no duplicate-free mnemonic after {} attempts",
        max_attempts
    )))
}

/// Check word count, repeats, dictionary membership and checksum, in that order
pub fn validate_words<S: AsRef<str>>(words: &[S]) -> Result<()> {
    parse_words(words).map(|_| ())
}

/// Validate `words` and compute their BIP-39 seed (empty passphrase)
pub fn mnemonic_to_seed<S: AsRef<str>>(words: &[S]) -> Result<Zeroizing<[u8; SEED_LEN]>> {
    let mnemonic = parse_words(words)?;
    Ok(Zeroizing::new(mnemonic.to_seed_normalized("")))
}

fn parse_words<S: AsRef<str>>(words: &[S]) -> Result<Mnemonic> {
    if words.len() != MNEMONIC_WORD_COUNT {
        return Err(Error::InvalidMnemonicLength {
            expected: MNEMONIC_WORD_COUNT,
            actual: words.len(),
        });
    }

    if let Some(index) = first_repeat(words) {
        return Err(Error::DuplicateWords { index });
    }

    if let Some(index) = words
        .iter()
        .position(|word| Language::English.find_word(word.as_ref()).is_none())
    {
        return Err(Error::UnknownWord { index });
    }

    let phrase = Zeroizing::new(
        words
            .iter()
            .map(|word| word.as_ref())
            .collect::<Vec<&str>>()
            .join(" "),
    );
    Mnemonic::parse_in_normalized(Language::English, &phrase).map_err(|e| match e {
        bip39::Error::InvalidChecksum => Error::ChecksumMismatch,
        other => Error::Mnemonic(other.to_string()),
    })
}

/// Index of the first word that already appeared earlier in the list
fn first_repeat<S: AsRef<str>>(words: &[S]) -> Option<usize> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(words.len());
    words.iter().position(|word| !seen.insert(word.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VALID: [&str; 12] = [
        "jelly", "better", "achieve", "collect", "unaware", "mountain",
        "thought", "cargo", "oxygen", "act", "hood", "bridge",
    ];

    #[test]
    fn test_generate_mnemonic() {
        let words = generate_mnemonic(64).unwrap();
        assert_eq!(words.len(), MNEMONIC_WORD_COUNT);
        assert!(first_repeat(&words).is_none());
        validate_words(&words).unwrap();
    }

    #[test]
    fn test_generate_mnemonic_many() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let words = generate_mnemonic_with(&mut rng, 64).unwrap();
            validate_words(&words).unwrap();
        }
    }

    #[test]
    fn test_generate_zero_attempts() {
        assert!(matches!(generate_mnemonic(0), Err(Error::Mnemonic(_))));
    }

    #[test]
    fn test_validate_words() {
        validate_words(&VALID).unwrap();
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            validate_words(&VALID[..11]),
            Err(Error::InvalidMnemonicLength { expected: 12, actual: 11 })
        );
        let mut long = VALID.to_vec();
        long.push("zoo");
        assert_eq!(
            validate_words(&long),
            Err(Error::InvalidMnemonicLength { expected: 12, actual: 13 })
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            validate_words(&empty),
            Err(Error::InvalidMnemonicLength { expected: 12, actual: 0 })
        );
    }

    #[test]
    fn test_duplicate_words() {
        // Valid BIP-39, but repeats "abandon"
        let words = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let words: Vec<&str> = words.split(' ').collect();
        assert_eq!(validate_words(&words), Err(Error::DuplicateWords { index: 1 }));
    }

    #[test]
    fn test_duplicate_checked_before_unknown() {
        let mut words = VALID;
        words[0] = "notaword";
        words[5] = "notaword";
        assert_eq!(validate_words(&words), Err(Error::DuplicateWords { index: 5 }));
    }

    #[test]
    fn test_unknown_word() {
        let mut words = VALID;
        words[3] = "solana";
        assert_eq!(validate_words(&words), Err(Error::UnknownWord { index: 3 }));
    }

    #[test]
    fn test_words_are_matched_exactly() {
        let mut words = VALID;
        words[0] = "Jelly";
        assert_eq!(validate_words(&words), Err(Error::UnknownWord { index: 0 }));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut words = VALID;
        words[11] = "bread";
        assert_eq!(validate_words(&words), Err(Error::ChecksumMismatch));
    }

    #[test]
    fn test_mnemonic_to_seed() {
        let seed = mnemonic_to_seed(&VALID).unwrap();
        assert_eq!(
            hex::encode(&seed[..]),
            "c7b8fbb38c1abe38dfc0fea9797804558dfac244cd7737ae3a1b619991e0ad52\
             0155d982f906629639dc39e440520f98f820bea4f886a63a45923a63441f25ef"
        );
    }
}
