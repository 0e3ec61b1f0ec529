//! Message filter
//!
//! Wires the classifier and the trust store into a per-message decision,
//! plus the source and action seams a chat platform adapter plugs into.

pub mod action;
pub mod pipeline;
pub mod source;
pub mod types;

pub use action::{LogAction, SpamAction};
pub use pipeline::MessageFilter;
pub use source::{LineSource, MessageSource};
pub use types::{InboundMessage, RunStats, SkipReason, Verdict};
