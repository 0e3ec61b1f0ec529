//! Trust store
//!
//! Tracks which senders skip classification and how many clean messages
//! each untrusted sender has sent.

pub mod list;
pub mod store;
pub mod types;

pub use store::TrustStore;
pub use types::{PersistPolicy, Promotion, UserId};
