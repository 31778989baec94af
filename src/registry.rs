use crate::id::AssetId;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry entry for a single asset
///
/// `supported` is set the first time the asset is registered and never
/// reverts; `active` toggles with explicit admin action. Invariant:
/// `active` implies `supported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    /// The asset this entry describes
    pub asset: AssetId,
    /// True once the asset has ever been registered
    pub supported: bool,
    /// True while the asset is eligible for operations
    pub active: bool,
}

/// Ordered registry of known assets
///
/// Entries are created once, never removed, and keep their insertion order,
/// so enumeration is stable across deactivation and reactivation.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    entries: Vec<TokenEntry>,
    index: HashMap<AssetId, usize>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset, or reactivate it if already known
    ///
    /// Idempotent: repeated calls never duplicate the entry and never error.
    pub fn add_token(&mut self, asset: AssetId) {
        match self.position(&asset) {
            Some(pos) => {
                if !self.entries[pos].active {
                    self.entries[pos].active = true;
                    info!("reactivated token {}", asset);
                }
            }
            None => {
                self.index.insert(asset, self.entries.len());
                self.entries.push(TokenEntry {
                    asset,
                    supported: true,
                    active: true,
                });
                info!("registered token {}", asset);
            }
        }
    }

    /// Deactivate an asset without removing it from the enumeration
    ///
    /// Unknown assets are a silent no-op.
    pub fn remove_token(&mut self, asset: AssetId) {
        if let Some(pos) = self.position(&asset) {
            if self.entries[pos].active {
                self.entries[pos].active = false;
                info!("deactivated token {}", asset);
            }
        }
    }

    /// True if the asset has ever been registered
    pub fn is_supported(&self, asset: &AssetId) -> bool {
        self.position(asset)
            .map(|pos| self.entries[pos].supported)
            .unwrap_or(false)
    }

    /// True if the asset is currently eligible for operations
    pub fn is_active(&self, asset: &AssetId) -> bool {
        self.position(asset)
            .map(|pos| self.entries[pos].active)
            .unwrap_or(false)
    }

    /// All ever-registered assets in insertion order, regardless of state
    pub fn all_tokens(&self) -> Vec<AssetId> {
        self.entries.iter().map(|e| e.asset).collect()
    }

    /// All supported assets in insertion order
    ///
    /// Currently equivalent to [`all_tokens`](Self::all_tokens) since
    /// `supported` never clears; kept distinct so the two queries can
    /// diverge later without an interface change.
    pub fn all_supported(&self) -> Vec<AssetId> {
        self.entries
            .iter()
            .filter(|e| e.supported)
            .map(|e| e.asset)
            .collect()
    }

    /// Registry entries in insertion order
    pub fn entries(&self) -> &[TokenEntry] {
        &self.entries
    }

    fn position(&self, asset: &AssetId) -> Option<usize> {
        self.index.get(asset).copied()
    }
}
