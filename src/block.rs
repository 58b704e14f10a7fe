//! Block records stored in the chain.

use serde::{Deserialize, Serialize};

use crate::hasher::{BlockHash, Hasher};

/// Sentinel `previous_hash` carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: BlockHash = 0;

/// One ledger record: a transaction payload and the two digests linking it.
///
/// Fields are private so a block cannot be altered once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    previous_hash: BlockHash,
    block_hash: BlockHash,
    transaction: String,
}

impl Block {
    /// Builds a block from precomputed parts.
    pub fn new(
        previous_hash: BlockHash,
        block_hash: BlockHash,
        transaction: impl Into<String>,
    ) -> Self {
        Self {
            previous_hash,
            block_hash,
            transaction: transaction.into(),
        }
    }

    /// Builds a block whose hash is `hasher` applied to `hash_input`.
    ///
    /// `hash_input` is the transaction itself for a standalone block, or the
    /// concatenated transaction history for a running-total chain.
    pub fn seal<H: Hasher>(
        hasher: &H,
        previous_hash: BlockHash,
        hash_input: &[u8],
        transaction: impl Into<String>,
    ) -> Self {
        Self::new(previous_hash, hasher.digest(hash_input), transaction)
    }

    /// Builds a genesis block hashed over its own transaction.
    pub fn genesis<H: Hasher>(hasher: &H, transaction: impl Into<String>) -> Self {
        let transaction = transaction.into();
        Self::seal(
            hasher,
            GENESIS_PREVIOUS_HASH,
            transaction.as_bytes(),
            transaction.clone(),
        )
    }

    /// Digest of the predecessor, or [`GENESIS_PREVIOUS_HASH`].
    pub fn previous_hash(&self) -> BlockHash {
        self.previous_hash
    }

    /// Digest computed when the block was sealed.
    pub fn block_hash(&self) -> BlockHash {
        self.block_hash
    }

    /// Recorded vote payload.
    pub fn transaction(&self) -> &str {
        &self.transaction
    }

    /// `true` when the block carries the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}
