//! antispam-rs: Naive Bayes spam filter for chat messages
//!
//! Classifies short messages as spam or legitimate and remembers which
//! senders have earned trust, so their messages skip classification.
//!
//! # Example
//!
//! ```no_run
//! use antispam_rs::classifier::{Corpus, NaiveBayes, Tokenizer};
//! use antispam_rs::config::Config;
//! use antispam_rs::filter::{InboundMessage, MessageFilter};
//! use antispam_rs::trust::TrustStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!
//!     let corpus = Corpus::load(&config.data.spam_corpus, &config.data.ham_corpus)?;
//!     let mut bayes = NaiveBayes::new(Tokenizer::load(&config.data.exclusions)?);
//!     bayes.train(&corpus.messages, &corpus.labels)?;
//!
//!     let trust = TrustStore::load(&config.data.trust_list, config.filter.persist_policy).await?;
//!     let filter = MessageFilter::new(Arc::new(bayes), Arc::new(trust), &config.filter);
//!
//!     let verdict = filter.check(&InboundMessage::text(42, "hello there")).await;
//!     println!("{:?}", verdict);
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`classifier`]: tokenizer, training corpus and Naive Bayes model
//! - [`trust`]: trusted senders and clean-message counters
//! - [`filter`]: per-message pipeline, message sources and spam actions
//! - [`config`]: configuration management
//! - [`error`]: error types and handling

pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod trust;

// Re-export commonly used types
pub use config::Config;
pub use error::{AntispamError, Result};
