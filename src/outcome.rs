//! Binary outcome sources for the wager engine
//!
//! The shipped [`HashOutcome`] source is deliberately cheap: it hashes
//! engine-local state and the wager parameters, so the caller cannot choose
//! the outcome, but any party who can observe engine state before a wager
//! commits can predict it. It is NOT cryptographically fair and must not be
//! backed by real value without an external verifiable-randomness oracle;
//! inject a different [`OutcomeSource`] for that.

use crate::id::{AccountId, AssetId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

/// One side of a coin flip; doubles as the drawn outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guess {
    Heads,
    Tails,
}

impl Guess {
    /// Canonical bit encoding: heads = 0, tails = 1
    pub fn bit(self) -> u8 {
        match self {
            Guess::Heads => 0,
            Guess::Tails => 1,
        }
    }

    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            Guess::Heads
        } else {
            Guess::Tails
        }
    }
}

/// Source of binary outcomes, injected into the wager engine
pub trait OutcomeSource {
    /// Draw one outcome for a wager
    ///
    /// Implementations must not let the caller bias the result through the
    /// parameters alone; the parameters are mixed in so concurrent wagers
    /// from different callers draw independently.
    fn draw(&self, caller: &AccountId, asset: &AssetId, amount: u128, sequence: u64) -> Guess;
}

/// Hash-based outcome source seeded at construction
///
/// Predictable by anyone who knows the seed and the draw count; see the
/// module docs for why this is acceptable only where fairness is not load
/// bearing.
#[derive(Debug)]
pub struct HashOutcome {
    seed: [u8; 32],
    draws: AtomicU64,
}

impl HashOutcome {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed,
            draws: AtomicU64::new(0),
        }
    }
}

impl OutcomeSource for HashOutcome {
    fn draw(&self, caller: &AccountId, asset: &AssetId, amount: u128, sequence: u64) -> Guess {
        let draw = self.draws.fetch_add(1, Ordering::SeqCst);

        let mut hasher = Sha256::new();
        hasher.update(b"PERMIT_SETTLE_Flip");
        hasher.update(self.seed);
        hasher.update(draw.to_le_bytes());
        hasher.update(caller.bytes());
        hasher.update(asset.bytes());
        hasher.update(amount.to_le_bytes());
        hasher.update(sequence.to_le_bytes());
        let digest: [u8; 32] = hasher.finalize().into();

        Guess::from_bit(digest[0])
    }
}

/// Outcome source that always returns the configured side, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub Guess);

impl OutcomeSource for FixedOutcome {
    fn draw(&self, _caller: &AccountId, _asset: &AssetId, _amount: u128, _sequence: u64) -> Guess {
        self.0
    }
}
