//! Labeled training data read from line-delimited files

use std::path::Path;

use crate::error::{AntispamError, Result};

/// Parallel messages and labels, spam examples first
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub messages: Vec<String>,
    pub labels: Vec<bool>,
}

impl Corpus {
    /// Load one spam file and one ham file, one message per line
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(spam_path: P, ham_path: Q) -> Result<Self> {
        let spam = read_lines(spam_path.as_ref())?;
        let ham = read_lines(ham_path.as_ref())?;
        Ok(Self::from_examples(spam, ham))
    }

    pub fn from_examples<I, J>(spam: I, ham: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        let mut corpus = Self::default();
        for message in spam {
            corpus.push(message, true);
        }
        for message in ham {
            corpus.push(message, false);
        }
        corpus
    }

    pub fn push(&mut self, message: String, is_spam: bool) {
        self.messages.push(message);
        self.labels.push(is_spam);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn spam_len(&self) -> usize {
        self.labels.iter().filter(|&&is_spam| is_spam).count()
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| AntispamError::Corpus {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
