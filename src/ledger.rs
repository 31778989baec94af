//! Asset ledger interface and an in-memory implementation
//!
//! The settlement engine never stores balances itself; every balance it
//! reports is read live from the ledger, so engine bookkeeping can never
//! drift from the source of truth.

use crate::error::SettlementError;
use crate::id::{AccountId, AssetId};
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

/// Interface to the external asset ledger holding real balances
///
/// Transfers are atomic: a failed transfer leaves both balances untouched.
pub trait AssetLedger {
    /// Balance of `holder` in `asset`
    fn balance_of(&self, asset: &AssetId, holder: &AccountId) -> u128;

    /// Total minted supply of `asset`
    fn total_supply(&self, asset: &AssetId) -> u128;

    /// Create `amount` new units of `asset` for `to`
    ///
    /// # Returns
    /// Ok(()) if successful, Err if the credit would overflow
    fn mint(&self, asset: &AssetId, to: &AccountId, amount: u128) -> Result<(), SettlementError>;

    /// Move `amount` of `asset` from `from` to `to`
    ///
    /// # Returns
    /// * `Ok(())` - Both balances updated
    /// * `Err(InsufficientFunds)` - `from` does not hold `amount`; no state changed
    fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), SettlementError>;
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<(AssetId, AccountId), u128>,
    supplies: HashMap<AssetId, u128>,
}

/// In-memory implementation of the asset ledger for testing and simulation
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
        }
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance_of(&self, asset: &AssetId, holder: &AccountId) -> u128 {
        let state = self.state.lock().unwrap();
        state
            .balances
            .get(&(*asset, *holder))
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self, asset: &AssetId) -> u128 {
        let state = self.state.lock().unwrap();
        state.supplies.get(asset).copied().unwrap_or_default()
    }

    fn mint(&self, asset: &AssetId, to: &AccountId, amount: u128) -> Result<(), SettlementError> {
        let mut state = self.state.lock().unwrap();

        let balance = state.balances.get(&(*asset, *to)).copied().unwrap_or(0);
        let supply = state.supplies.get(asset).copied().unwrap_or(0);

        let new_balance = balance
            .checked_add(amount)
            .ok_or(SettlementError::BalanceOverflow(*asset))?;
        let new_supply = supply
            .checked_add(amount)
            .ok_or(SettlementError::BalanceOverflow(*asset))?;

        state.balances.insert((*asset, *to), new_balance);
        state.supplies.insert(*asset, new_supply);

        debug!("minted {} of {} to {}", amount, asset, to);
        Ok(())
    }

    fn transfer(
        &self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), SettlementError> {
        let mut state = self.state.lock().unwrap();

        let from_balance = state.balances.get(&(*asset, *from)).copied().unwrap_or(0);
        if from_balance < amount {
            return Err(SettlementError::InsufficientFunds {
                asset: *asset,
                required: amount,
                available: from_balance,
            });
        }

        // Self-transfer still validates the balance but moves nothing
        if from == to {
            return Ok(());
        }

        let to_balance = state.balances.get(&(*asset, *to)).copied().unwrap_or(0);
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or(SettlementError::BalanceOverflow(*asset))?;

        // Both sides computed; commit together under the lock
        state.balances.insert((*asset, *from), from_balance - amount);
        state.balances.insert((*asset, *to), new_to_balance);

        debug!("transferred {} of {} from {} to {}", amount, asset, from, to);
        Ok(())
    }
}
