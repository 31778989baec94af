use crate::id::AssetId;
use thiserror::Error;

/// Represents all possible errors that can occur during settlement operations
#[derive(Error, Debug)]
pub enum SettlementError {
    /// The permit's deadline has already passed
    #[error("authorization expired: deadline {deadline}, current time {now}")]
    ExpiredAuthorization { deadline: u64, now: u64 },

    /// The permit's sequence number does not match the owner's counter,
    /// which covers both replay and out-of-order submission
    #[error("sequence mismatch: owner counter is {expected}, permit carries {got}")]
    SequenceMismatch { expected: u64, got: u64 },

    /// The signature does not verify against the owner's key for the
    /// requested operation scope
    #[error("invalid permit signature")]
    InvalidSignature,

    /// The asset has never been registered
    #[error("unsupported token {0}")]
    UnsupportedToken(AssetId),

    /// The asset is registered but currently deactivated
    #[error("inactive token {0}")]
    InactiveToken(AssetId),

    /// The engine's reserve cannot cover the required payout
    #[error("insufficient reserve of {asset}: required {required}, available {available}")]
    InsufficientReserve {
        asset: AssetId,
        required: u128,
        available: u128,
    },

    /// A ledger account does not hold enough of the asset to transfer
    #[error("insufficient funds of {asset}: required {required}, available {available}")]
    InsufficientFunds {
        asset: AssetId,
        required: u128,
        available: u128,
    },

    /// A registry mutation was attempted by a caller other than the admin
    #[error("caller is not the registry admin")]
    Unauthorized,

    /// Crediting a balance would overflow its representation
    #[error("balance overflow for {0}")]
    BalanceOverflow(AssetId),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Anyhow error wrapper for error context
    #[error(transparent)]
    Context(#[from] anyhow::Error),
}

impl From<bincode::Error> for SettlementError {
    fn from(err: bincode::Error) -> Self {
        SettlementError::Serialization(err.to_string())
    }
}
