//! construction of a minimal signed transfer transaction.
//!
//! The builder validates its inputs, serializes the transfer body with
//! the crate's canonical codec (bincode: little-endian, fixed-width
//! integers), signs the encoded body, and bundles body and signature
//! into an immutable [`Tx`]. Submitting the payload to an execution
//! layer is the caller's concern.

use num_bigint::BigInt;
use num_bigint::Sign;
use num_traits::ToPrimitive;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tracing::debug;

use crate::address::Address;
use crate::error::WalletError;
use crate::keypair::Keypair;
use crate::keypair::PublicKey;
use crate::signature;
use crate::signature::Signature;

/// the unsigned transfer body, serialized canonically before signing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct TransferBody {
    source: Address,
    source_public_key: PublicKey,
    target: Address,
    token: String,
    amount: u128,
    tx_code: Vec<u8>,
}

/// an opaque signed-transfer payload, immutable once built
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    body: Vec<u8>,
    signature: Signature,
    public_key: PublicKey,
}

impl Tx {
    /// the canonically encoded transfer body that was signed
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// the public key the signature verifies against
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Check the bundled signature against the bundled body and key.
    pub fn verify(&self) -> Result<(), WalletError> {
        signature::verify_signature(&self.public_key, &self.body, &self.signature.serialize())
    }
}

/// Build a signed transfer of `amount` units of `token` to the address
/// encoded in `target`.
///
/// `amount` is an arbitrary-precision integer at this boundary; it must
/// be non-negative and representable in 128 bits, otherwise the builder
/// fails with [`WalletError::InvalidAmount`] and produces no `Tx`. A
/// malformed `target` propagates [`WalletError::InvalidAddress`] from
/// [`Address::decode`].
pub fn make_transfer(
    keypair: &Keypair,
    target: &str,
    token: &str,
    amount: &BigInt,
    tx_code: Vec<u8>,
) -> Result<Tx, WalletError> {
    let target = Address::decode(target)?;

    if amount.sign() == Sign::Minus {
        return Err(WalletError::InvalidAmount(format!(
            "amount must be non-negative, got {amount}"
        )));
    }
    let amount: u128 = amount.to_u128().ok_or_else(|| {
        WalletError::InvalidAmount(format!("amount {amount} exceeds 128 bits"))
    })?;

    let body = TransferBody {
        source: Address::from_keypair(keypair),
        source_public_key: keypair.public_key(),
        target,
        token: token.to_string(),
        amount,
        tx_code,
    };
    let body_bytes =
        bincode::serialize(&body).expect("transfer body serialization should always succeed");

    let signature = signature::sign(keypair, &body_bytes);
    debug!(token, amount, "built signed transfer");

    Ok(Tx {
        body: body_bytes,
        signature,
        public_key: keypair.public_key(),
    })
}
