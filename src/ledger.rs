//! Running-total ledger built on top of [`Chain`].
//!
//! Every recorded transaction is appended to an accumulated history and the
//! whole history is hashed, so each block digest commits to every vote cast
//! so far.  The new block points at the previous digest, or at the genesis
//! sentinel when the ledger is empty.

use crate::block::{Block, GENESIS_PREVIOUS_HASH};
use crate::chain::{BlockId, Chain};
use crate::error::ChainError;
use crate::hasher::{BlockHash, Hasher, StringHash};
use crate::report::BlockSummary;

/// Hash-linked vote ledger parameterised by its digest strategy.
#[derive(Debug, Clone, Default)]
pub struct Ledger<H = StringHash> {
    hasher: H,
    chain: Chain,
    history: Vec<u8>,
    last_hash: Option<BlockHash>,
}

impl<H: Hasher> Ledger<H> {
    /// Creates an empty ledger hashing with `hasher`.
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            chain: Chain::new(),
            history: Vec::new(),
            last_hash: None,
        }
    }

    /// Seals `transaction` into a new block and prepends it.
    ///
    /// On failure the ledger is left exactly as it was.
    pub fn record(&mut self, transaction: &str) -> Result<BlockId, ChainError> {
        let previous = self.last_hash.unwrap_or(GENESIS_PREVIOUS_HASH);
        let rollback = self.history.len();
        self.history.try_reserve(transaction.len())?;
        self.history.extend_from_slice(transaction.as_bytes());
        let block = Block::seal(&self.hasher, previous, &self.history, transaction);
        let hash = block.block_hash();
        match self.chain.prepend(block) {
            Ok(id) => {
                self.last_hash = Some(hash);
                Ok(id)
            }
            Err(err) => {
                self.history.truncate(rollback);
                Err(err)
            }
        }
    }

    /// Digest strategy in use.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Underlying chain.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Consumes the ledger and returns its chain.
    pub fn into_chain(self) -> Chain {
        self.chain
    }

    /// Digest of the most recent block.
    pub fn last_hash(&self) -> Option<BlockHash> {
        self.last_hash
    }

    /// Concatenation of every recorded transaction.
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Number of recorded blocks.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// `true` before the genesis block is recorded.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Oldest-first summaries; see [`Chain::render`].
    pub fn render(&self) -> Vec<BlockSummary> {
        self.chain.render()
    }

    /// Drops every block and forgets the history; the next record is genesis.
    pub fn clear(&mut self) {
        self.chain.clear();
        self.history.clear();
        self.last_hash = None;
    }
}
