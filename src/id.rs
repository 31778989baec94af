use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::Deref;

// AccountId identifies a party that can hold balances and sign permits.
// It is the 32-byte ed25519 public key of the party, so a permit signed by
// an account can be verified directly against its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format as a hex string with a prefix of the first 6 bytes
        let prefix = hex::encode(&self.0[0..6]);
        write!(f, "acct:{}", prefix)
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        AccountId([0; 32])
    }
}

impl Deref for AccountId {
    type Target = [u8; 32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AccountId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }

    /// Get a reference to the internal bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// The account id of an ed25519 verifying key
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        AccountId(key.to_bytes())
    }

    /// Parse the account id back into its ed25519 verifying key.
    ///
    /// Fails for ids whose bytes are not a valid curve point, which includes
    /// every id produced by [`AssetId::derive`].
    pub fn verifying_key(&self) -> Option<VerifyingKey> {
        VerifyingKey::from_bytes(&self.0).ok()
    }
}

// AssetId is the opaque identifier of a registered fungible asset.
// Derived ids are guaranteed off-curve, so an asset id can never collide
// with an account's public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId([u8; 32]);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = hex::encode(&self.0[0..6]);
        write!(f, "asset:{}", prefix)
    }
}

impl Ord for AssetId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for AssetId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for AssetId {
    fn default() -> Self {
        AssetId([0; 32])
    }
}

impl Deref for AssetId {
    type Target = [u8; 32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AssetId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        AssetId(bytes)
    }

    /// Get a reference to the internal bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn create_asset_id(seeds: &[&[u8]], bump: u8) -> [u8; 32] {
        let mut hasher = Sha256::new();

        // Domain separator
        hasher.update(b"PERMIT_SETTLE_Asset");

        // Add all seeds
        for seed in seeds {
            hasher.update(seed);
        }

        // Add bump
        hasher.update([bump]);

        hasher.finalize().into()
    }

    /// Verify that a 32-byte array is not a valid point on the ed25519 curve
    ///
    /// Returns true if the bytes do not represent a valid curve point.
    /// Returns false if the bytes do represent a valid curve point.
    pub fn is_off_curve(bytes: &[u8; 32]) -> bool {
        let Ok(compressed_edwards_y) = CompressedEdwardsY::from_slice(bytes.as_ref()) else {
            return true; // Cannot even parse as a point format, so it's off-curve
        };
        compressed_edwards_y.decompress().is_none() // If we can't decompress it, it's off-curve
    }

    /// Try to derive an off-curve AssetId for the given seeds
    pub fn try_derive(seeds: &[&[u8]]) -> Option<(AssetId, u8)> {
        for bump in 0..255 {
            let id = AssetId::create_asset_id(seeds, bump);
            if AssetId::is_off_curve(&id) {
                return Some((AssetId(id), bump));
            }
        }
        None
    }

    /// Derive an off-curve AssetId for the given seeds
    pub fn derive(seeds: &[&[u8]]) -> (AssetId, u8) {
        AssetId::try_derive(seeds).expect("Failed to derive a valid AssetId")
    }
}
