//! Spam classifier
//!
//! Naive Bayes over normalized word tokens. The model is trained once at
//! startup from a spam corpus and a ham corpus and is read-only afterwards,
//! so it can be shared between workers behind an `Arc` without locking.

pub mod corpus;
pub mod naive_bayes;
pub mod tokenizer;

pub use corpus::Corpus;
pub use naive_bayes::{Class, NaiveBayes, Score, TrainingSummary};
pub use tokenizer::{parse_exclusions, Tokenizer};
