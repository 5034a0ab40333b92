//! Key-management core for a governance wallet.
//!
//! This crate owns the safety-critical slice of the wallet: mnemonic
//! generation, deterministic key derivation, keypair serialization and
//! password-based encryption, address derivation, Ed25519 signing, and
//! construction of signed transfer payloads. UI, RPC, and persistence
//! live elsewhere and talk to this core through the types re-exported
//! below.
//!
//! All operations are synchronous and free of shared mutable state.
//! Key derivation and password encryption are CPU-bound and may be slow
//! under high work factors; interactive callers should run them off
//! their responsiveness path. The crate emits `tracing` events at
//! operation boundaries and never logs secret material.
//!
//! ```
//! use num_bigint::BigInt;
//! use wallet_core::{generate_mnemonic, make_transfer, Address, Keypair, PhraseSize};
//!
//! # fn main() -> Result<(), wallet_core::WalletError> {
//! let phrase = generate_mnemonic(PhraseSize::N12);
//! let keypair = Keypair::from_mnemonic(&phrase, 1)?;
//! let target = Address::from_keypair(&keypair).encoded();
//! let tx = make_transfer(&keypair, &target, "GOV", &BigInt::from(10u32), vec![])?;
//! tx.verify()?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod error;
pub mod handle;
pub mod keypair;
pub mod mnemonic;
pub mod signature;
pub mod transfer;

pub use address::Address;
pub use address::ADDRESS_HRP;
pub use error::WalletError;
pub use handle::HandleTable;
pub use handle::KeypairHandle;
pub use keypair::Keypair;
pub use keypair::KeypairData;
pub use keypair::PublicKey;
pub use mnemonic::generate_mnemonic;
pub use mnemonic::validate_phrase;
pub use mnemonic::PhraseSize;
pub use signature::sign;
pub use signature::verify_signature;
pub use signature::Signature;
pub use transfer::make_transfer;
pub use transfer::Tx;
