use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::list;
use super::types::{PersistPolicy, Promotion, UserId};
use crate::error::{AntispamError, Result};

#[derive(Debug, Default)]
struct TrustState {
    trusted: HashSet<UserId>,
    message_counts: HashMap<UserId, u64>,
}

/// Trusted senders and their clean-message counters.
///
/// Every read-modify-write happens under one lock, including the file
/// append on promotion.
#[derive(Debug)]
pub struct TrustStore {
    path: PathBuf,
    policy: PersistPolicy,
    state: Mutex<TrustState>,
}

impl TrustStore {
    /// Create an empty store backed by `path`
    pub fn new(path: impl Into<PathBuf>, policy: PersistPolicy) -> Self {
        Self::with_trusted(path, policy, std::iter::empty::<UserId>())
    }

    /// Create a store seeded with already-trusted identities
    pub fn with_trusted(
        path: impl Into<PathBuf>,
        policy: PersistPolicy,
        trusted: impl IntoIterator<Item = UserId>,
    ) -> Self {
        TrustStore {
            path: path.into(),
            policy,
            state: Mutex::new(TrustState {
                trusted: trusted.into_iter().collect(),
                message_counts: HashMap::new(),
            }),
        }
    }

    /// Seed the store from the trust list at `path`
    pub async fn load(path: impl Into<PathBuf>, policy: PersistPolicy) -> Result<Self> {
        let path = path.into();
        let trusted = list::read(&path).await?;
        info!(path = %path.display(), count = trusted.len(), "Trust list loaded");
        Ok(Self::with_trusted(path, policy, trusted))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> PersistPolicy {
        self.policy
    }

    /// Check if a sender is exempt from classification
    pub async fn is_trusted(&self, id: UserId) -> bool {
        let state = self.state.lock().await;
        state.trusted.contains(&id)
    }

    /// Count one more clean message from `id` and return the new total
    pub async fn record_clean_message(&self, id: UserId) -> u64 {
        let mut state = self.state.lock().await;
        let count = state.message_counts.entry(id).or_insert(0);
        *count += 1;
        *count
    }

    /// Mark `id` as trusted and append it to the trust list.
    ///
    /// Already-trusted identities are left alone, so the list never gets a
    /// second line for the same id from this process.
    pub async fn promote(&self, id: UserId) -> Result<Promotion> {
        let mut state = self.state.lock().await;

        if state.trusted.contains(&id) {
            return Ok(Promotion::AlreadyTrusted);
        }

        if self.policy == PersistPolicy::Lenient {
            state.trusted.insert(id);
        }

        if let Err(source) = list::append(&self.path, id).await {
            warn!(
                user_id = id,
                policy = ?self.policy,
                error = %source,
                "Failed to persist trusted sender"
            );
            return Err(AntispamError::Persistence {
                path: self.path.clone(),
                source,
            });
        }

        state.trusted.insert(id);
        info!(user_id = id, "Sender promoted to trusted");
        Ok(Promotion::Promoted)
    }

    /// Number of trusted identities held in memory
    pub async fn trusted_count(&self) -> usize {
        self.state.lock().await.trusted.len()
    }

    /// Clean messages counted so far for `id`
    pub async fn message_count(&self, id: UserId) -> u64 {
        let state = self.state.lock().await;
        state.message_counts.get(&id).copied().unwrap_or(0)
    }
}
