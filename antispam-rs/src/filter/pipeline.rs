//! Per-message decision pipeline
//!
//! Trusted senders are let through without classification. Everyone else
//! is classified; clean messages count toward promotion to trusted.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::action::SpamAction;
use super::source::MessageSource;
use super::types::{InboundMessage, RunStats, SkipReason, Verdict};
use crate::classifier::NaiveBayes;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::trust::{Promotion, TrustStore};

/// Spam filter combining the classifier with the trust store
#[derive(Debug, Clone)]
pub struct MessageFilter {
    classifier: Arc<NaiveBayes>,
    trust: Arc<TrustStore>,
    min_message_length: usize,
    promote_after: u64,
}

impl MessageFilter {
    pub fn new(classifier: Arc<NaiveBayes>, trust: Arc<TrustStore>, config: &FilterConfig) -> Self {
        Self {
            classifier,
            trust,
            min_message_length: config.min_message_length,
            promote_after: u64::from(config.promote_after),
        }
    }

    pub fn classifier(&self) -> &NaiveBayes {
        &self.classifier
    }

    pub fn trust(&self) -> &TrustStore {
        &self.trust
    }

    /// Decide what to do with one message
    pub async fn check(&self, message: &InboundMessage) -> Verdict {
        let user_id = message.user_id;

        let Some(text) = message.text.as_deref() else {
            return Verdict::Skipped(SkipReason::NoText);
        };

        if self.trust.is_trusted(user_id).await {
            debug!(user_id, "Sender is trusted");
            return Verdict::Trusted;
        }

        if message.has_media {
            return Verdict::Skipped(SkipReason::Media);
        }

        if text.len() < self.min_message_length {
            return Verdict::Skipped(SkipReason::TooShort);
        }

        if self.classifier.predict(text) {
            info!(user_id, sequence = message.sequence, "Message classified as spam");
            return Verdict::Spam;
        }

        let count = self.trust.record_clean_message(user_id).await;
        debug!(user_id, count, "Clean message recorded");

        let mut promoted = false;
        if count >= self.promote_after {
            match self.trust.promote(user_id).await {
                Ok(Promotion::Promoted) => promoted = true,
                Ok(Promotion::AlreadyTrusted) => {}
                Err(e) => error!(user_id, "Failed to add sender to trust list: {}", e),
            }
        }

        Verdict::Clean { count, promoted }
    }

    /// Check a message and run `action` if it is spam
    pub async fn handle(&self, message: &InboundMessage, action: &dyn SpamAction) -> Verdict {
        let verdict = self.check(message).await;

        if verdict == Verdict::Spam {
            if let Err(e) = action.on_spam(message).await {
                error!(user_id = message.user_id, "Spam action failed: {}", e);
            }
        }

        verdict
    }

    /// Process every message from `source`, one task per message
    pub async fn run<S>(&self, source: &mut S, action: Arc<dyn SpamAction>) -> Result<RunStats>
    where
        S: MessageSource + ?Sized,
    {
        let mut stats = RunStats::default();
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    collect(joined, &mut stats);
                }
                next = source.next_message() => {
                    let Some(message) = next? else { break };
                    let filter = self.clone();
                    let action = Arc::clone(&action);
                    tasks.spawn(async move { filter.handle(&message, action.as_ref()).await });
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            collect(joined, &mut stats);
        }

        info!(
            processed = stats.processed,
            spam = stats.spam,
            promoted = stats.promoted,
            "Message source exhausted"
        );
        Ok(stats)
    }
}

fn collect(joined: std::result::Result<Verdict, tokio::task::JoinError>, stats: &mut RunStats) {
    match joined {
        Ok(verdict) => stats.record(&verdict),
        Err(e) => {
            stats.failed += 1;
            error!("Message task failed: {}", e);
        }
    }
}
