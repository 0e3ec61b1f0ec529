//! What happens to a message once it is classified as spam

use tracing::{debug, warn};

use super::types::InboundMessage;
use crate::error::Result;

/// Reaction to a spam verdict, e.g. deleting the message on the platform
#[async_trait::async_trait]
pub trait SpamAction: Send + Sync {
    async fn on_spam(&self, message: &InboundMessage) -> Result<()>;
}

/// Logs spam hits and does nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAction;

#[async_trait::async_trait]
impl SpamAction for LogAction {
    async fn on_spam(&self, message: &InboundMessage) -> Result<()> {
        warn!(
            user_id = message.user_id,
            sequence = message.sequence,
            "Spam message detected"
        );
        debug!(text = ?message.text, "Spam message content");
        Ok(())
    }
}
