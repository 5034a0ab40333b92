//! Ed25519 signing and verification.
//!
//! Signing covers the exact byte sequence it is given; nothing is
//! hashed, truncated, or normalized first beyond what Ed25519 itself
//! specifies. Verification failure is an explicit, reportable outcome
//! ([`WalletError::InvalidSignature`]), never a silent pass.

use ed25519_dalek::Signer;
use ed25519_dalek::Verifier;
use ed25519_dalek::VerifyingKey;
use serde::Deserialize;
use serde::Serialize;

use crate::error::WalletError;
use crate::keypair::Keypair;
use crate::keypair::PublicKey;

/// Ed25519 signature with a canonical fixed-length byte encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature([u8; Signature::LEN]);

// serde implements the array traits only up to N = 32, so go through
// the canonical 64-byte encoding by hand
impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <Vec<u8>>::deserialize(deserializer)?;
        Signature::deserialize(&bytes).map_err(serde::de::Error::custom)
    }
}

impl Signature {
    /// fixed byte length of the canonical encoding (R ‖ s)
    pub const LEN: usize = 64;

    /// The canonical 64-byte encoding.
    pub fn serialize(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Parse the canonical encoding; fails with
    /// [`WalletError::InvalidSignatureData`] on wrong length.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, WalletError> {
        let arr: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
            WalletError::InvalidSignatureData(format!(
                "expected {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

/// Sign `data` with the keypair's private key.
pub fn sign(keypair: &Keypair, data: &[u8]) -> Signature {
    Signature(keypair.signing_key().sign(data).to_bytes())
}

/// Verify `signature_bytes` over `data` against `public_key`.
///
/// Succeeds with `Ok(())` iff the signature is valid for exactly this
/// (public key, data) pair. Malformed signature bytes are reported as
/// [`WalletError::InvalidSignatureData`]; a well-formed but wrong
/// signature as [`WalletError::InvalidSignature`]; an off-curve public
/// key as [`WalletError::InvalidKeyData`].
pub fn verify_signature(
    public_key: &PublicKey,
    data: &[u8],
    signature_bytes: &[u8],
) -> Result<(), WalletError> {
    let signature = Signature::deserialize(signature_bytes)?;
    let verifying_key = VerifyingKey::from_bytes(public_key.as_bytes())
        .map_err(|e| WalletError::InvalidKeyData(format!("not a valid public key: {e}")))?;

    let dalek_signature = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key
        .verify(data, &dalek_signature)
        .map_err(|_| WalletError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::mnemonic::generate_mnemonic;
    use crate::mnemonic::PhraseSize;

    fn test_keypair() -> Keypair {
        Keypair::from_mnemonic(&generate_mnemonic(PhraseSize::N12), 1).unwrap()
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let keypair = test_keypair();
        let data = b"the vote is recorded";
        let signature = sign(&keypair, data);
        verify_signature(&keypair.public_key(), data, &signature.serialize()).unwrap();
    }

    #[test]
    fn other_public_key_fails_verification() {
        let keypair = test_keypair();
        let other = test_keypair();
        let data = b"the vote is recorded";
        let signature = sign(&keypair, data);
        assert!(matches!(
            verify_signature(&other.public_key(), data, &signature.serialize()),
            Err(WalletError::InvalidSignature)
        ));
    }

    #[test]
    fn wrong_length_is_invalid_signature_data() {
        let keypair = test_keypair();
        assert!(matches!(
            verify_signature(&keypair.public_key(), b"msg", &[0u8; 63]),
            Err(WalletError::InvalidSignatureData(_))
        ));
    }

    #[test]
    fn serialization_roundtrip() {
        let signature = sign(&test_keypair(), b"payload");
        let restored = Signature::deserialize(&signature.serialize()).unwrap();
        assert_eq!(signature, restored);
    }

    proptest! {
        // keep the case count modest; every case signs and verifies
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn verify_accepts_only_unmodified_input(
            seed in any::<[u8; 32]>(),
            data in proptest::collection::vec(any::<u8>(), 1..128),
            flip_byte in any::<prop::sample::Index>(),
        ) {
            let keypair = Keypair::from_seed(&seed);
            let signature = sign(&keypair, &data);
            verify_signature(&keypair.public_key(), &data, &signature.serialize()).unwrap();

            // flipping any single byte of the message must fail
            let mut tampered_data = data.clone();
            let i = flip_byte.index(tampered_data.len());
            tampered_data[i] ^= 0x01;
            prop_assert!(
                verify_signature(&keypair.public_key(), &tampered_data, &signature.serialize())
                    .is_err()
            );

            // flipping any single byte of the signature must fail
            let mut tampered_sig = signature.serialize();
            let j = flip_byte.index(tampered_sig.len());
            tampered_sig[j] ^= 0x01;
            prop_assert!(
                verify_signature(&keypair.public_key(), &data, &tampered_sig).is_err()
            );
        }
    }
}
