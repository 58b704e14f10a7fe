//! The design philosophy underlying `vote_chain` is pedagogical: every module
//! isolates one idea behind tamper-evident chaining so it can be studied alone.
//! Digest strategies used to link blocks.
//!
//! A digest here is a linking fingerprint, not a security primitive.  The
//! default [`StringHash`] is a classic multiplicative string hash with no
//! collision resistance at all.  Stronger digests implement the same
//! [`Hasher`] trait and can be swapped in without touching the chain.

use std::fmt;
use std::str::FromStr;

use blake2::digest::{consts::U32, Digest};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::Sha3_256;

type Blake2b256 = blake2::Blake2b<U32>;

/// Fixed-width digest stored in every block.
pub type BlockHash = u64;

const STRING_HASH_SEED: BlockHash = 5381;

/// Maps an arbitrary byte sequence to a [`BlockHash`].
///
/// Implementations must be deterministic and total: equal inputs give equal
/// digests and every input, including the empty one, has a digest.
pub trait Hasher {
    /// Computes the digest of `bytes`.
    fn digest(&self, bytes: &[u8]) -> BlockHash;
}

impl<H: Hasher + ?Sized> Hasher for &H {
    fn digest(&self, bytes: &[u8]) -> BlockHash {
        (**self).digest(bytes)
    }
}

/// Multiplicative string hash (`h = h * 33 + byte`, seeded with 5381).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringHash;

impl Hasher for StringHash {
    fn digest(&self, bytes: &[u8]) -> BlockHash {
        bytes.iter().fold(STRING_HASH_SEED, |h, &b| {
            h.wrapping_shl(5).wrapping_add(h).wrapping_add(b as u64)
        })
    }
}

/// BLAKE2b-256 truncated to its leading eight bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake2bHash;

impl Hasher for Blake2bHash {
    fn digest(&self, bytes: &[u8]) -> BlockHash {
        let mut hasher = Blake2b256::new();
        hasher.update(bytes);
        leading_word(&hasher.finalize())
    }
}

/// SHA-256 truncated to its leading eight bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hash;

impl Hasher for Sha256Hash {
    fn digest(&self, bytes: &[u8]) -> BlockHash {
        leading_word(&Sha256::digest(bytes))
    }
}

/// SHA3-256 truncated to its leading eight bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha3Hash;

impl Hasher for Sha3Hash {
    fn digest(&self, bytes: &[u8]) -> BlockHash {
        leading_word(&Sha3_256::digest(bytes))
    }
}

fn leading_word(out: &[u8]) -> BlockHash {
    let mut word = [0u8; 8];
    word.copy_from_slice(&out[..8]);
    u64::from_be_bytes(word)
}

/// Runtime-selectable digest strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// [`StringHash`].
    #[default]
    String,
    /// [`Blake2bHash`].
    Blake2b,
    /// [`Sha256Hash`].
    Sha256,
    /// [`Sha3Hash`].
    Sha3,
}

impl HashAlgorithm {
    /// Every supported algorithm, in declaration order.
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::String,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha3,
    ];

    /// Name accepted by [`FromStr`] and written by serde.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::String => "string",
            HashAlgorithm::Blake2b => "blake2b",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha3 => "sha3",
        }
    }
}

impl Hasher for HashAlgorithm {
    fn digest(&self, bytes: &[u8]) -> BlockHash {
        match self {
            HashAlgorithm::String => StringHash.digest(bytes),
            HashAlgorithm::Blake2b => Blake2bHash.digest(bytes),
            HashAlgorithm::Sha256 => Sha256Hash.digest(bytes),
            HashAlgorithm::Sha3 => Sha3Hash.digest(bytes),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown hash algorithm `{s}`"))
    }
}

/// Digest of `bytes` under the default [`StringHash`].
pub fn digest(bytes: &[u8]) -> BlockHash {
    StringHash.digest(bytes)
}
