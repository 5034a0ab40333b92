//! derived, checksummed textual identifiers for public keys.
//!
//! An address is the SHA3-256 digest of an Ed25519 public key,
//! truncated to 20 bytes and rendered as bech32m for human use. The
//! digest direction is one-way: decoding an encoded address recovers an
//! equal `Address` value, never the public key bytes that produced it.

use bech32::FromBase32;
use bech32::ToBase32;
use bech32::Variant;
use serde::Deserialize;
use serde::Serialize;
use sha3::Digest;
use sha3::Sha3_256;

use crate::error::WalletError;
use crate::keypair::Keypair;
use crate::keypair::PublicKey;

/// human-readable prefix of every encoded address
pub const ADDRESS_HRP: &str = "gov";

const ADDRESS_PAYLOAD_LEN: usize = 20;

/// a derived identifier for a public key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_PAYLOAD_LEN]);

impl Address {
    /// Derive the address of a keypair's public key.
    pub fn from_keypair(keypair: &Keypair) -> Self {
        Self::from_public_key(&keypair.public_key())
    }

    /// Derive an address from a public key.
    ///
    /// Deterministic: equal public keys always map to equal addresses.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = Sha3_256::digest(public_key.as_bytes());
        let mut payload = [0u8; ADDRESS_PAYLOAD_LEN];
        payload.copy_from_slice(&digest[..ADDRESS_PAYLOAD_LEN]);
        Self(payload)
    }

    /// The canonical bech32m encoding.
    pub fn encoded(&self) -> String {
        // the hrp is a static valid string, so encoding cannot fail
        bech32::encode(ADDRESS_HRP, self.0.to_base32(), Variant::Bech32m)
            .expect("bech32 encoding with a fixed hrp should always succeed")
    }

    /// Parse and validate a canonical encoding.
    pub fn decode(encoded: &str) -> Result<Self, WalletError> {
        let (hrp, data, variant) = bech32::decode(encoded)
            .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;

        if variant != Variant::Bech32m {
            return Err(WalletError::InvalidAddress(
                "expected bech32m variant".to_string(),
            ));
        }
        if hrp != ADDRESS_HRP {
            return Err(WalletError::InvalidAddress(format!(
                "unexpected prefix '{hrp}'"
            )));
        }

        let payload = Vec::<u8>::from_base32(&data)
            .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;
        let payload: [u8; ADDRESS_PAYLOAD_LEN] = payload.try_into().map_err(|p: Vec<u8>| {
            WalletError::InvalidAddress(format!(
                "payload must be {ADDRESS_PAYLOAD_LEN} bytes, got {}",
                p.len()
            ))
        })?;
        Ok(Self(payload))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_PAYLOAD_LEN] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encoded())
    }
}
