//! Simulated vote source.
//!
//! Votes are drawn uniformly from a fixed three-party enumeration using a
//! seedable generator, so a run can be replayed from its seed.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Parties a simulated voter can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    /// `GOOD PARTY`.
    GoodParty,
    /// `MEDIOCRE PARTY`.
    MediocreParty,
    /// `EVIL PARTY`.
    EvilParty,
}

impl Party {
    /// Every party, in ballot order.
    pub const ALL: [Party; 3] = [Party::GoodParty, Party::MediocreParty, Party::EvilParty];

    /// Label recorded as the block transaction.
    pub fn label(&self) -> &'static str {
        match self {
            Party::GoodParty => "GOOD PARTY",
            Party::MediocreParty => "MEDIOCRE PARTY",
            Party::EvilParty => "EVIL PARTY",
        }
    }
}

impl AsRef<str> for Party {
    fn as_ref(&self) -> &str {
        self.label()
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Endless stream of uniformly sampled votes.
#[derive(Debug, Clone)]
pub struct VoteSampler {
    rng: StdRng,
}

impl VoteSampler {
    /// Sampler whose sequence is fully determined by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws the next vote.
    pub fn sample(&mut self) -> Party {
        Party::ALL[self.rng.gen_range(0..Party::ALL.len())]
    }
}

impl Iterator for VoteSampler {
    type Item = Party;

    fn next(&mut self) -> Option<Party> {
        Some(self.sample())
    }
}
