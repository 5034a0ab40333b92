//! deterministic Ed25519 keypair derivation and the keypair container.
//!
//! The container owns the private key material and exposes it only
//! through defined operations: a strongly-typed serialized form for
//! crossing process boundaries, and password-based authenticated
//! encryption for at-rest storage. Where the bytes end up is the
//! caller's concern.
//!
//! ### Key derivation
//!
//! `from_mnemonic` turns a checksum-valid BIP-39 phrase into an Ed25519
//! seed with Argon2id. The phrase bytes act as the password (the BIP-39
//! passphrase is empty by convention), the salt is a fixed
//! domain-separation constant, and the caller-supplied `iterations`
//! value is the Argon2 time cost. Identical `(phrase, iterations)`
//! inputs always yield identical key material; that determinism is what
//! makes wallet recovery from a phrase possible.

use aead::Aead;
use aead::Key;
use aead::KeyInit;
use aes_gcm::Aes256Gcm;
use aes_gcm::Nonce;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use ed25519_dalek::SigningKey;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;
use zeroize::Zeroizing;

use crate::error::WalletError;
use crate::mnemonic;

/// version byte carried by [`KeypairData`]
pub const KEYPAIR_DATA_VERSION: u8 = 1;

/// version byte prefixing the encrypted-keypair layout
const ENCRYPTED_KEYPAIR_VERSION: u8 = 1;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// domain separator for phrase-to-seed derivation. Changing it changes
/// every derived key, so it is part of the durable format surface.
const SEED_DERIVATION_SALT: &[u8] = b"wallet-core/seed-derivation/v1";

// Argon2id cost parameters shared by seed derivation and password
// encryption. Memory cost is the OWASP baseline (19 MiB); the time cost
// for seed derivation comes from the caller.
const KDF_M_COST_KIB: u32 = 19_456;
const KDF_P_COST: u32 = 1;
const PASSWORD_KDF_T_COST: u32 = 2;

/// Ed25519 public key, the non-secret half of a [`Keypair`].
///
/// Safe to copy and pass freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// fixed byte length of an Ed25519 public key
    pub const LEN: usize = 32;

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// strongly-typed serialized form of a [`Keypair`].
///
/// This is the representation that crosses process or runtime
/// boundaries. All fields are fixed-width; byte order is not a concern
/// since both keys are opaque byte strings. The version byte gates
/// future layout changes.
///
/// The secret field is zeroed when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeypairData {
    version: u8,
    secret: [u8; 32],
    public: [u8; 32],
}

impl KeypairData {
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn public(&self) -> PublicKey {
        PublicKey(self.public)
    }
}

impl std::fmt::Debug for KeypairData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeypairData")
            .field("version", &self.version)
            .field("secret", &"<redacted>")
            .field("public", &hex_prefix(&self.public))
            .finish()
    }
}

/// Ed25519 signing keypair.
///
/// Immutable after construction. The private scalar is zeroed on drop
/// (via `ed25519-dalek`). Every transfer of the key material across a
/// trust boundary is an explicit [`serialize`](Self::serialize) /
/// [`deserialize`](Self::deserialize) or
/// [`encrypt_with_password`](Self::encrypt_with_password) /
/// [`decrypt_with_password`](Self::decrypt_with_password) step; the
/// container is never implicitly copied.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public", &hex_prefix(self.public_key().as_bytes()))
            .finish_non_exhaustive()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.signing_key.to_bytes() == other.signing_key.to_bytes()
    }
}

impl Eq for Keypair {}

impl Keypair {
    /// Derive a keypair from a mnemonic phrase and a work factor.
    ///
    /// `iterations` is the Argon2 time cost; higher values raise
    /// brute-force cost and derivation latency linearly. A value of 0
    /// is clamped to 1. Derivation is CPU-bound and may be slow for
    /// large values, so interactive callers should run it off their
    /// responsiveness path.
    pub fn from_mnemonic(phrase: &str, iterations: u32) -> Result<Self, WalletError> {
        let mnemonic = mnemonic::parse_phrase(phrase)?;
        debug!(iterations, "deriving keypair from mnemonic");

        // normalize through the parsed phrase so that inputs differing
        // only in incidental whitespace derive the same key
        let seed = derive_key_material(
            mnemonic.phrase().as_bytes(),
            SEED_DERIVATION_SALT,
            iterations.max(1),
        )?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Reconstruct a keypair directly from a 32-byte seed.
    #[cfg(test)]
    pub(crate) fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// the non-secret half of this keypair
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Export the keypair for crossing a process boundary.
    pub fn serialize(&self) -> KeypairData {
        KeypairData {
            version: KEYPAIR_DATA_VERSION,
            secret: self.signing_key.to_bytes(),
            public: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Reconstruct a keypair from its serialized form.
    ///
    /// Fails with [`WalletError::InvalidKeyData`] on an unknown version
    /// or when the public key does not match the secret, which catches
    /// both corruption and mixed-up field order in a binding layer.
    pub fn deserialize(data: &KeypairData) -> Result<Self, WalletError> {
        if data.version != KEYPAIR_DATA_VERSION {
            return Err(WalletError::InvalidKeyData(format!(
                "unsupported keypair data version {}",
                data.version
            )));
        }
        let signing_key = SigningKey::from_bytes(&data.secret);
        if signing_key.verifying_key().to_bytes() != data.public {
            return Err(WalletError::InvalidKeyData(
                "public key does not match secret key".to_string(),
            ));
        }
        Ok(Self { signing_key })
    }

    /// Encrypt the serialized keypair under a password.
    ///
    /// A fresh random salt and nonce are generated per call and never
    /// reused. Output layout, all offsets fixed:
    ///
    /// ```text
    /// version(1) ‖ salt(16) ‖ nonce(12) ‖ AES-256-GCM ciphertext+tag
    /// ```
    ///
    /// The symmetric key is Argon2id(password, salt) with fixed cost
    /// parameters. Encryption is a pure transformation; the live
    /// keypair is not altered.
    pub fn encrypt_with_password(&self, password: &str) -> Result<Vec<u8>, WalletError> {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce_bytes = [0u8; NONCE_LEN];
        let mut rng = rand::rng();
        rng.fill(&mut salt);
        rng.fill(&mut nonce_bytes);

        let key = derive_key_material(password.as_bytes(), &salt, PASSWORD_KDF_T_COST)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));
        let nonce = Nonce::from_slice(&nonce_bytes);

        let plaintext = Zeroizing::new(
            bincode::serialize(&self.serialize())
                .expect("keypair data serialization should always succeed"),
        );
        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_slice())
            .map_err(|_| WalletError::EncryptionFailure("AES-GCM encryption failed".to_string()))?;

        debug!("encrypted keypair under fresh salt and nonce");
        let mut out = Vec::with_capacity(1 + SALT_LEN + NONCE_LEN + ciphertext.len());
        out.push(ENCRYPTED_KEYPAIR_VERSION);
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt an encrypted keypair blob.
    ///
    /// Returns `Ok(None)` when authentication fails, i.e. the password
    /// is wrong or the ciphertext body was tampered with. That is an
    /// expected, recoverable outcome and deliberately not an error.
    /// Structurally malformed input (truncated, unknown version, or an
    /// authenticated payload that does not decode) is reported as
    /// [`WalletError::InvalidKeyData`] so callers can distinguish a bad
    /// guess from corruption.
    pub fn decrypt_with_password(
        bytes: &[u8],
        password: &str,
    ) -> Result<Option<Self>, WalletError> {
        const HEADER_LEN: usize = 1 + SALT_LEN + NONCE_LEN;
        if bytes.len() < HEADER_LEN + TAG_LEN {
            return Err(WalletError::InvalidKeyData(
                "encrypted keypair data is truncated".to_string(),
            ));
        }
        let (version, rest) = bytes.split_at(1);
        if version[0] != ENCRYPTED_KEYPAIR_VERSION {
            return Err(WalletError::InvalidKeyData(format!(
                "unsupported encrypted keypair version {}",
                version[0]
            )));
        }
        let (salt, rest) = rest.split_at(SALT_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

        let key = derive_key_material(password.as_bytes(), salt, PASSWORD_KDF_T_COST)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = match cipher.decrypt(nonce, ciphertext) {
            Ok(ptxt) => Zeroizing::new(ptxt),
            // authentication failure: wrong password or tampered body
            Err(_) => {
                debug!("keypair decryption failed authentication");
                return Ok(None);
            }
        };

        // the tag verified, so a payload that fails to decode means the
        // blob was produced incorrectly, not that the password is wrong
        let data: KeypairData = bincode::deserialize(&plaintext).map_err(|e| {
            WalletError::InvalidKeyData(format!("authenticated payload does not decode: {e}"))
        })?;
        Self::deserialize(&data).map(Some)
    }
}

/// Argon2id with the crate's fixed memory and parallelism costs.
fn derive_key_material(
    password: &[u8],
    salt: &[u8],
    t_cost: u32,
) -> Result<Zeroizing<[u8; 32]>, WalletError> {
    let params = Params::new(KDF_M_COST_KIB, t_cost, KDF_P_COST, Some(32))
        .map_err(|e| WalletError::KdfFailure(format!("invalid Argon2 parameters: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password, salt, &mut *key)
        .map_err(|e| WalletError::KdfFailure(format!("Argon2id derivation failed: {e}")))?;
    Ok(key)
}

fn hex_prefix(bytes: &[u8]) -> String {
    let mut s: String = bytes.iter().take(4).map(|b| format!("{b:02x}")).collect();
    s.push_str("...");
    s
}
