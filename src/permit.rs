//! Off-chain signed transfer authorizations
//!
//! A permit is a one-time, deadline-bounded grant letting a spender pull a
//! bounded amount from the owner's balance, replacing a prior on-chain
//! approval step. Replay protection comes from a per-owner sequence counter:
//! a permit is only valid while its sequence number equals the owner's
//! current counter, and the counter is advanced exactly once per consumed
//! permit. The counter advance is the caller's responsibility and must
//! happen only after the authorized pull has succeeded, so a failed pull
//! never burns the permit.

use crate::error::SettlementError;
use crate::id::AccountId;
use ed25519_dalek::{Signature, Signer, SigningKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Domain tag prefixed to every permit signing hash
const PERMIT_DOMAIN_TAG: &[u8] = b"PERMIT_SETTLE_Permit";

/// Identifies one deployment instance of the settlement engine
///
/// The domain is mixed into every signing hash, so a permit signed for one
/// instance can never be replayed against another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitDomain {
    /// Human-readable name of the deployment
    pub name: String,
    /// Version of the signing scheme
    pub version: String,
    /// Chain or network the deployment lives on
    pub chain_id: u64,
    /// The engine account this domain belongs to
    pub instance: AccountId,
}

impl PermitDomain {
    pub fn new(name: &str, version: &str, chain_id: u64, instance: AccountId) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            chain_id,
            instance,
        }
    }
}

/// A signed, single-use transfer grant
///
/// Binds a specific `(owner, spender, value, sequence, deadline)` tuple; the
/// signature is an ed25519 signature by `owner` over the domain-separated
/// hash of those fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permit {
    /// The account granting the pull
    pub owner: AccountId,
    /// The account allowed to pull
    pub spender: AccountId,
    /// Exact amount the spender may pull
    pub value: u128,
    /// The owner's sequence counter value this permit was issued against
    pub sequence: u64,
    /// Unix timestamp after which the permit is permanently unusable
    pub deadline: u64,
    /// Ed25519 signature over the signing hash
    pub signature: Signature,
}

/// Compute the domain-separated signing hash for a permit's fields
pub fn signing_hash(
    domain: &PermitDomain,
    owner: &AccountId,
    spender: &AccountId,
    value: u128,
    sequence: u64,
    deadline: u64,
) -> Result<[u8; 32], SettlementError> {
    let mut hasher = Sha256::new();
    hasher.update(PERMIT_DOMAIN_TAG);
    hasher.update(bincode::serialize(domain)?);
    hasher.update(bincode::serialize(&(owner, spender, value, sequence, deadline))?);
    Ok(hasher.finalize().into())
}

impl Permit {
    /// Sign a new permit with the owner's key
    ///
    /// `sequence` must be the owner's current counter value at consumption
    /// time; use [`SequenceCounters::current`] on the consuming side to
    /// obtain it.
    pub fn sign(
        domain: &PermitDomain,
        owner_key: &SigningKey,
        spender: AccountId,
        value: u128,
        sequence: u64,
        deadline: u64,
    ) -> Result<Self, SettlementError> {
        let owner = AccountId::from_verifying_key(&owner_key.verifying_key());
        let hash = signing_hash(domain, &owner, &spender, value, sequence, deadline)?;
        let signature = owner_key.sign(&hash);

        Ok(Self {
            owner,
            spender,
            value,
            sequence,
            deadline,
            signature,
        })
    }

    /// Validate this permit against the operation it is consumed for
    ///
    /// Checks short-circuit in order:
    /// 1. deadline not passed, else `ExpiredAuthorization`
    /// 2. sequence matches the owner's counter, else `SequenceMismatch`
    /// 3. the permit covers exactly the expected `(owner, spender, value)`
    ///    scope and its signature verifies against the owner's key, else
    ///    `InvalidSignature`
    ///
    /// Validation does not advance the counter; the consuming engine does
    /// that once the authorized pull has succeeded.
    pub fn validate(
        &self,
        domain: &PermitDomain,
        owner: &AccountId,
        spender: &AccountId,
        value: u128,
        counters: &SequenceCounters,
        now: u64,
    ) -> Result<(), SettlementError> {
        if self.deadline < now {
            return Err(SettlementError::ExpiredAuthorization {
                deadline: self.deadline,
                now,
            });
        }

        let expected = counters.current(owner);
        if self.sequence != expected {
            return Err(SettlementError::SequenceMismatch {
                expected,
                got: self.sequence,
            });
        }

        // A permit carrying a different scope was signed for some other
        // operation, which is indistinguishable from a forged signature here
        if self.owner != *owner || self.spender != *spender || self.value != value {
            return Err(SettlementError::InvalidSignature);
        }

        let key = self
            .owner
            .verifying_key()
            .ok_or(SettlementError::InvalidSignature)?;
        let hash = signing_hash(
            domain,
            &self.owner,
            &self.spender,
            self.value,
            self.sequence,
            self.deadline,
        )?;
        key.verify_strict(&hash, &self.signature)
            .map_err(|_| SettlementError::InvalidSignature)
    }
}

/// Per-owner monotonic counters preventing permit replay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceCounters {
    counters: HashMap<AccountId, u64>,
}

impl SequenceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The counter value the owner's next permit must carry
    pub fn current(&self, owner: &AccountId) -> u64 {
        self.counters.get(owner).copied().unwrap_or_default()
    }

    /// Advance the owner's counter after a permit has been consumed
    pub fn advance(&mut self, owner: &AccountId) {
        *self.counters.entry(*owner).or_default() += 1;
    }
}
