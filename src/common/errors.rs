use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum WindowError {
    #[error("Items per page must be a positive integer")]
    ZeroPageSize,

    #[error("Pull {0} must be a positive finite number")]
    InvalidPullSetting(&'static str),
}

/// Local validation failures. Nothing is sent to the remote store when one
/// of these is returned.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Weights must sum to exactly 100 (currently {total})")]
    WeightsSum { total: u32 },

    #[error("Test {0:?} has no variants")]
    EmptyTest(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Variant store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum TrafficError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Remote update failed: {0}")]
    Remote(#[from] StoreError),

    #[error("Variant {0} does not belong to this test")]
    UnknownVariant(Uuid),

    #[error("Automatic winner selection must be paused before editing weights")]
    Locked,
}

impl TrafficError {
    /// Remote failures are reported as transient notifications; everything
    /// else is shown inline next to the form.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}
