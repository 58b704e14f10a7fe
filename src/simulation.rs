//! Election driver: samples votes and records each one in a ledger.

use crate::block::Block;
use crate::config::SimulationConfig;
use crate::error::ChainError;
use crate::hasher::{HashAlgorithm, Hasher};
use crate::ledger::Ledger;
use crate::votes::VoteSampler;

/// Result of a configured run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Seed the vote sampler was started from.
    pub seed: u64,
    /// Ledger holding every recorded vote.
    pub ledger: Ledger<HashAlgorithm>,
}

/// Records the first `count` payloads from `votes` into a fresh ledger.
///
/// `observe` is called after each block is recorded with its zero-based
/// position and the block itself.  Fewer than `count` blocks are recorded
/// when `votes` runs dry.
pub fn simulate<H, V, F>(
    hasher: H,
    votes: V,
    count: usize,
    mut observe: F,
) -> Result<Ledger<H>, ChainError>
where
    H: Hasher,
    V: IntoIterator,
    V::Item: AsRef<str>,
    F: FnMut(usize, &Block),
{
    let mut ledger = Ledger::new(hasher);
    for (position, vote) in votes.into_iter().take(count).enumerate() {
        let id = ledger.record(vote.as_ref())?;
        if let Some(block) = ledger.chain().get(id) {
            observe(position, block);
        }
    }
    Ok(ledger)
}

/// Runs the election described by `config`, calling `observe` after each
/// recorded block as [`simulate`] does.
pub fn run<F>(config: &SimulationConfig, observe: F) -> Result<SimulationOutcome, ChainError>
where
    F: FnMut(usize, &Block),
{
    let seed = config.resolved_seed();
    let ledger = simulate(
        config.algorithm,
        VoteSampler::from_seed(seed),
        config.votes,
        observe,
    )?;
    Ok(SimulationOutcome { seed, ledger })
}
