//! crate-wide error taxonomy.
//!
//! Every failure a caller can observe is a distinct variant so that a
//! binding layer can map them to precise signals. Nothing is swallowed
//! internally; the one deliberate exception is a wrong password on
//! decrypt, which is modeled as `Ok(None)` by
//! [`Keypair::decrypt_with_password`](crate::keypair::Keypair::decrypt_with_password)
//! because a bad password guess is an expected outcome, not corruption.

/// represents a failure in one of the key-management operations
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid keypair data: {0}")]
    InvalidKeyData(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureData(String),

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("invalid transfer amount: {0}")]
    InvalidAmount(String),

    #[error("key derivation failed: {0}")]
    KdfFailure(String),

    #[error("encryption failed: {0}")]
    EncryptionFailure(String),
}
