//! BIP-39 mnemonic generation and validation.
//!
//! A mnemonic phrase encodes freshly drawn entropy plus a checksum as a
//! sequence of English words. Only the two standard wallet sizes are
//! supported: 12 words (128 bits of entropy) and 24 words (256 bits).

use bip39::Language;
use bip39::Mnemonic;
use rand::Rng;

use crate::error::WalletError;

/// the supported mnemonic phrase lengths
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhraseSize {
    /// 12 words, encoding 128 bits of entropy
    N12,
    /// 24 words, encoding 256 bits of entropy
    N24,
}

impl PhraseSize {
    /// number of entropy bytes encoded by a phrase of this size,
    /// excluding the checksum
    pub fn entropy_bytes(self) -> usize {
        match self {
            PhraseSize::N12 => 16,
            PhraseSize::N24 => 32,
        }
    }

    /// number of words in a phrase of this size
    pub fn word_count(self) -> usize {
        match self {
            PhraseSize::N12 => 12,
            PhraseSize::N24 => 24,
        }
    }
}

/// Generate a fresh mnemonic phrase of the requested size.
///
/// Entropy is drawn from the operating system CSPRNG. The checksum and
/// word mapping follow BIP-39, so regenerating from the same entropy
/// always yields the same phrase. Entropy-source exhaustion aborts the
/// process; there is no safe fallback for weak randomness.
pub fn generate_mnemonic(size: PhraseSize) -> String {
    let mut entropy = vec![0u8; size.entropy_bytes()];
    rand::rng().fill(&mut entropy[..]);

    let mnemonic = Mnemonic::from_entropy(&entropy, Language::English)
        .expect("entropy length matches the requested phrase size");
    mnemonic.phrase().to_string()
}

/// Parse and checksum-validate a phrase.
pub(crate) fn parse_phrase(phrase: &str) -> Result<Mnemonic, WalletError> {
    Mnemonic::from_phrase(phrase, Language::English)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

/// Validate a phrase without retaining it.
pub fn validate_phrase(phrase: &str) -> Result<(), WalletError> {
    parse_phrase(phrase).map(|_| ())
}
