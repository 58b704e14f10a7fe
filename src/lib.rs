#![deny(missing_docs)]

//! The design philosophy underlying `vote_chain` is pedagogical: every module
//! isolates one idea behind tamper-evident chaining so it can be studied alone.
//! # vote_chain
//!
//! **vote_chain** records simulated votes in a minimal append-only ledger.
//! Each vote becomes a [`Block`] carrying its payload, its own digest and the
//! digest of its predecessor, so altering any earlier vote would change every
//! digest after it.
//!
//! ## Features
//!
//! * **Pluggable digests**: the [`hasher`](hasher/index.html) module defines
//!   the [`Hasher`] trait with a weak default [`StringHash`] and truncated
//!   BLAKE2b, SHA-256 and SHA3-256 alternatives.
//! * **Prepend-oriented chain**: [`Chain`] is a singly linked list stored in a
//!   slot arena.  It supports prepending, in-place reversal, insertion after a
//!   given block, removal after the head and clearing.
//! * **Running-total ledger**: [`Ledger`] hashes the whole transaction history
//!   into every new block and links it to the previous digest.
//! * **Reports**: [`Chain::render`] yields oldest-first [`BlockSummary`]
//!   values that the [`report`](report/index.html) module prints as indented
//!   text or JSON.
//!
//! The ledger never re-verifies its own links; it only demonstrates how the
//! links are formed.
//!
//! ## Usage
//!
//! ```rust
//! use vote_chain::{digest, Ledger, StringHash};
//!
//! let mut ledger = Ledger::new(StringHash);
//! for vote in ["A", "B", "C"] {
//!     ledger.record(vote).unwrap();
//! }
//!
//! let summaries = ledger.render();
//! assert_eq!(summaries[0].transaction, "A");
//! assert_eq!(summaries[0].previous_hash, 0);
//! assert_eq!(summaries[2].block_hash, digest(b"ABC"));
//! assert_eq!(summaries[2].previous_hash, summaries[1].block_hash);
//! ```

mod block;
pub mod chain;
mod config;
mod error;
pub mod hasher;
mod ledger;
pub mod report;
pub mod simulation;
mod votes;

pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use chain::{BlockId, Chain};
pub use config::{SimulationConfig, DEFAULT_VOTES};
pub use error::{ChainError, ConfigError};
pub use hasher::{
    digest, Blake2bHash, BlockHash, HashAlgorithm, Hasher, Sha256Hash, Sha3Hash, StringHash,
};
pub use ledger::Ledger;
pub use report::{BlockSummary, DigestFormat, ReportFormat};
pub use simulation::{run, simulate, SimulationOutcome};
pub use votes::{Party, VoteSampler};
