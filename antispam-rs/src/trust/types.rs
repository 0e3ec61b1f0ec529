use serde::{Deserialize, Serialize};

/// Sender identity as delivered by the message source
pub type UserId = i64;

/// When a promotion becomes visible in memory relative to the file write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistPolicy {
    /// Trust only after the append reached the disk
    #[default]
    Strict,
    /// Trust first, then write; a failed write is still reported
    Lenient,
}

/// Outcome of a successful promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Promoted,
    AlreadyTrusted,
}
