use serde::{Deserialize, Serialize};

use crate::trust::UserId;

/// One message handed over by the message source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender identity
    pub user_id: UserId,
    /// Text payload, absent for service events
    pub text: Option<String>,
    /// Photo, video or document attached
    #[serde(default)]
    pub has_media: bool,
    /// Delivery sequence from the source, not used for decisions
    #[serde(default)]
    pub sequence: u64,
}

impl InboundMessage {
    pub fn text(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: Some(text.into()),
            has_media: false,
            sequence: 0,
        }
    }
}

/// Why a message was not classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    NoText,
    Media,
    TooShort,
}

/// Decision for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Sender is trusted, not classified
    Trusted,
    /// Not classified
    Skipped(SkipReason),
    /// Classified as spam
    Spam,
    /// Classified as legitimate
    Clean {
        /// Clean messages counted for the sender so far
        count: u64,
        /// Sender was promoted by this message
        promoted: bool,
    },
}

/// Totals for one run over a message source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub processed: u64,
    pub trusted: u64,
    pub skipped: u64,
    pub spam: u64,
    pub clean: u64,
    pub promoted: u64,
    pub failed: u64,
}

impl RunStats {
    pub fn record(&mut self, verdict: &Verdict) {
        self.processed += 1;
        match verdict {
            Verdict::Trusted => self.trusted += 1,
            Verdict::Skipped(_) => self.skipped += 1,
            Verdict::Spam => self.spam += 1,
            Verdict::Clean { promoted, .. } => {
                self.clean += 1;
                if *promoted {
                    self.promoted += 1;
                }
            }
        }
    }
}
