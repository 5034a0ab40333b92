//! opaque keypair handles for cross-boundary use.
//!
//! A binding layer that cannot hold a [`Keypair`] directly (a foreign
//! runtime, an FFI caller) holds a [`KeypairHandle`] instead. The
//! [`HandleTable`] owns the actual key material; handles are plain ids
//! with no key bytes behind them. Releasing a handle invalidates it,
//! and any later use is rejected with
//! [`WalletError::InvalidKeyData`] rather than undefined behavior.
//!
//! The table is caller-owned state, not a global; callers that share
//! one across threads wrap it in their own synchronization.

use std::collections::HashMap;

use crate::error::WalletError;
use crate::keypair::Keypair;

/// opaque reference to a keypair owned by a [`HandleTable`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeypairHandle(u64);

/// owns keypairs on behalf of callers that can only hold opaque ids
pub struct HandleTable {
    next_id: u64,
    entries: HashMap<u64, Keypair>,
}

impl std::fmt::Debug for HandleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleTable")
            .field("live_handles", &self.entries.len())
            .finish()
    }
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleTable {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: HashMap::new(),
        }
    }

    /// Take ownership of a keypair and hand out an opaque reference.
    ///
    /// Ids are never reused within one table, so a released handle can
    /// not alias a later insertion.
    pub fn insert(&mut self, keypair: Keypair) -> KeypairHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, keypair);
        KeypairHandle(id)
    }

    /// Look up a live handle.
    pub fn get(&self, handle: KeypairHandle) -> Result<&Keypair, WalletError> {
        self.entries.get(&handle.0).ok_or_else(|| {
            WalletError::InvalidKeyData(format!("keypair handle {} is not live", handle.0))
        })
    }

    /// Release a handle, dropping the key material exactly once.
    ///
    /// A second release of the same handle is an
    /// [`WalletError::InvalidKeyData`] error, not a no-op, so callers
    /// with broken release discipline hear about it.
    pub fn release(&mut self, handle: KeypairHandle) -> Result<(), WalletError> {
        self.entries.remove(&handle.0).map(|_| ()).ok_or_else(|| {
            WalletError::InvalidKeyData(format!(
                "keypair handle {} was already released",
                handle.0
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
