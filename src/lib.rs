//! Signature-authorized token settlement engine
//!
//! A registered set of fungible assets can be exchanged 1:1 between parties
//! or staked on a binary coin flip, authorized by off-chain-signed,
//! replay-protected permits instead of a prior approval step. Balances live
//! in an external [`AssetLedger`]; the engine only requests transfers
//! through it.

pub mod clock;
pub mod engine;
pub mod error;
pub mod id;
pub mod ledger;
pub mod outcome;
pub mod permit;
pub mod registry;

// Re-export the main types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{FlipEvent, SettlementEngine};
pub use error::SettlementError;
pub use id::{AccountId, AssetId};
pub use ledger::{AssetLedger, InMemoryLedger};
pub use outcome::{FixedOutcome, Guess, HashOutcome, OutcomeSource};
pub use permit::{Permit, PermitDomain, SequenceCounters};
pub use registry::{TokenEntry, TokenRegistry};
