//! Multinomial Naive Bayes over word tokens
//!
//! Trained once from a labeled corpus, then used read-only. All
//! probabilities are combined in natural-log space so long messages do not
//! underflow.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::tokenizer::Tokenizer;
use crate::error::{AntispamError, Result};

/// Message class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Spam,
    Ham,
}

/// Log-probabilities of a message under each class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub spam: f64,
    pub ham: f64,
}

impl Score {
    /// Spam only when strictly more likely; ties go to ham
    pub fn is_spam(&self) -> bool {
        self.spam > self.ham
    }
}

/// What a training run consumed
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TrainingSummary {
    pub spam_messages: usize,
    pub ham_messages: usize,
    pub spam_words: u64,
    pub ham_words: u64,
    pub unique_words: usize,
}

/// Naive Bayes spam classifier
#[derive(Debug, Clone, Default)]
pub struct NaiveBayes {
    tokenizer: Tokenizer,
    spam_count: u64,
    ham_count: u64,
    spam_words: HashMap<String, f64>,
    ham_words: HashMap<String, f64>,
    unique_words: usize,
}

impl NaiveBayes {
    /// Create an untrained classifier using the given tokenizer
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            ..Self::default()
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Train on parallel `messages` / `labels` (true = spam).
    ///
    /// Replaces any previous model. Every per-class word frequency is
    /// Laplace smoothed: `(count + 1) / (class_total + unique_words)`.
    pub fn train<S: AsRef<str>>(
        &mut self,
        messages: &[S],
        labels: &[bool],
    ) -> Result<TrainingSummary> {
        if messages.len() != labels.len() {
            return Err(AntispamError::Training(format!(
                "{} messages but {} labels",
                messages.len(),
                labels.len()
            )));
        }

        let mut spam_raw: HashMap<String, u64> = HashMap::new();
        let mut ham_raw: HashMap<String, u64> = HashMap::new();
        let mut unique: HashSet<String> = HashSet::new();
        let mut summary = TrainingSummary::default();

        for (message, &is_spam) in messages.iter().zip(labels) {
            let tokens = self.tokenizer.normalize(message.as_ref());

            if is_spam {
                summary.spam_messages += 1;
                summary.spam_words += tokens.len() as u64;
            } else {
                summary.ham_messages += 1;
                summary.ham_words += tokens.len() as u64;
            }

            for token in tokens {
                let raw = if is_spam { &mut spam_raw } else { &mut ham_raw };
                *raw.entry(token.clone()).or_insert(0) += 1;
                unique.insert(token);
            }
        }

        summary.unique_words = unique.len();
        self.spam_count = summary.spam_words;
        self.ham_count = summary.ham_words;
        self.unique_words = summary.unique_words;
        self.spam_words = smooth(spam_raw, self.spam_count, self.unique_words);
        self.ham_words = smooth(ham_raw, self.ham_count, self.unique_words);

        debug!(
            spam_words = self.spam_count,
            ham_words = self.ham_count,
            unique_words = self.unique_words,
            "Classifier trained"
        );

        Ok(summary)
    }

    /// Score a message, or `None` when there is nothing to weigh: the
    /// message has no tokens left after normalization, or the model saw no
    /// words during training.
    pub fn score(&self, text: &str) -> Option<Score> {
        let tokens = self.tokenizer.normalize(text);
        if tokens.is_empty() {
            return None;
        }

        let total = self.spam_count + self.ham_count;
        if total == 0 {
            return None;
        }

        let mut score = Score {
            spam: (self.spam_count as f64 / total as f64).ln(),
            ham: (self.ham_count as f64 / total as f64).ln(),
        };

        for token in &tokens {
            score.spam += self.token_probability(Class::Spam, token).ln();
            score.ham += self.token_probability(Class::Ham, token).ln();
        }

        Some(score)
    }

    /// True when the message is classified as spam
    pub fn predict(&self, text: &str) -> bool {
        self.score(text).map_or(false, |score| score.is_spam())
    }

    /// Smoothed probability learned for `token`, if it was seen in `class`
    pub fn word_probability(&self, class: Class, token: &str) -> Option<f64> {
        self.table(class).get(token).copied()
    }

    /// Number of distinct tokens seen during training
    pub fn vocabulary_size(&self) -> usize {
        self.unique_words
    }

    /// Word occurrences per class as (spam, ham)
    pub fn class_totals(&self) -> (u64, u64) {
        (self.spam_count, self.ham_count)
    }

    fn table(&self, class: Class) -> &HashMap<String, f64> {
        match class {
            Class::Spam => &self.spam_words,
            Class::Ham => &self.ham_words,
        }
    }

    fn token_probability(&self, class: Class, token: &str) -> f64 {
        if let Some(probability) = self.word_probability(class, token) {
            return probability;
        }

        // Same value an unseen word would have received during smoothing
        let class_total = match class {
            Class::Spam => self.spam_count,
            Class::Ham => self.ham_count,
        };
        1.0 / (class_total as f64 + self.unique_words as f64)
    }
}

fn smooth(raw: HashMap<String, u64>, class_total: u64, unique_words: usize) -> HashMap<String, f64> {
    let denominator = class_total as f64 + unique_words as f64;
    raw.into_iter()
        .map(|(word, count)| (word, (count as f64 + 1.0) / denominator))
        .collect()
}
