//! Error types surfaced by the chain and the simulation configuration.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::chain::BlockId;

/// Errors raised by structural operations on a [`Chain`](crate::Chain).
///
/// A failed operation never leaves the chain partially modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("block {0} is not part of this chain")]
    /// The handle was never issued by this chain or its block was released.
    UnknownBlock(BlockId),
    #[error("head has no successor to remove (chain holds {len} block(s))")]
    /// Removal after the head was requested on a chain with fewer than two blocks.
    NoSuccessor {
        /// Number of blocks held when the removal was attempted.
        len: usize,
    },
    #[error("out of memory while growing the chain: {0}")]
    /// Storage for a new link could not be reserved.
    OutOfMemory(String),
}

impl From<TryReserveError> for ChainError {
    fn from(err: TryReserveError) -> Self {
        ChainError::OutOfMemory(err.to_string())
    }
}

/// Errors raised while assembling a [`SimulationConfig`](crate::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("flag {0} expects a value")]
    /// A flag was given without its value.
    MissingValue(String),
    #[error("invalid value for {flag}: {value}")]
    /// A flag value could not be parsed.
    InvalidValue {
        /// Flag that received the value.
        flag: String,
        /// Offending input.
        value: String,
    },
    #[error("unknown flag {0}")]
    /// The argument is not recognised.
    UnknownFlag(String),
    #[error("io error: {0}")]
    /// Reading the configuration file failed.
    Io(String),
    #[error("decode error: {0}")]
    /// The configuration file is not valid JSON for this schema.
    Decode(String),
}
