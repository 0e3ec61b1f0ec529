//! Text normalization shared by training and prediction

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;

/// Lowercases, strips punctuation and drops excluded words
#[derive(Debug, Clone)]
pub struct Tokenizer {
    excluded: HashSet<String>,
    punctuation: Regex,
}

impl Tokenizer {
    /// Create a tokenizer with the given stop-words
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: excluded
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
            // Unicode general category P, so guillemets and dashes go too
            punctuation: Regex::new(r"\p{P}+").expect("punctuation pattern is valid"),
        }
    }

    /// Build a tokenizer from a comma/whitespace separated exclusion blob
    pub fn from_exclusion_list(blob: &str) -> Self {
        Self::new(parse_exclusions(blob))
    }

    /// Read the exclusion list file and build a tokenizer from it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let blob = std::fs::read_to_string(path)?;
        Ok(Self::from_exclusion_list(&blob))
    }

    /// Split text into normalized tokens, in input order
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = self.punctuation.replace_all(&lowered, "");

        stripped
            .split_whitespace()
            .filter(|word| !self.excluded.contains(*word))
            .map(str::to_string)
            .collect()
    }

    /// True when `token` (already lowercased) is a stop-word.
    pub fn is_excluded(&self, token: &str) -> bool {
        self.excluded.contains(token)
    }

    /// Number of distinct stop-words.
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

/// Tokens of an exclusion blob, split on commas and whitespace
pub fn parse_exclusions(blob: &str) -> Vec<String> {
    blob.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.normalize("Hello, World! How's it going?"),
            vec!["hello", "world", "hows", "it", "going"]
        );
    }

    #[test]
    fn test_normalize_unicode_punctuation() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.normalize("«Привет» — МИР…"),
            vec!["привет", "мир"]
        );
    }

    #[test]
    fn test_normalize_keeps_symbols() {
        // Currency and math symbols are not punctuation
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.normalize("win $100 + more"), vec!["win", "$100", "+", "more"]);
    }

    #[test]
    fn test_normalize_drops_excluded() {
        let tokenizer = Tokenizer::new(["the", "a"]);
        assert_eq!(
            tokenizer.normalize("The cat sat on a mat"),
            vec!["cat", "sat", "on", "mat"]
        );
    }

    #[test]
    fn test_normalize_only_excluded_is_empty() {
        let tokenizer = Tokenizer::new(["the"]);
        assert!(tokenizer.normalize("the the the").is_empty());
        assert!(tokenizer.normalize("").is_empty());
        assert!(tokenizer.normalize("  ...!!  ").is_empty());
    }

    #[test]
    fn test_parse_exclusions() {
        let words = parse_exclusions("и, в,не\n на\t,, что ");
        assert_eq!(words, vec!["и", "в", "не", "на", "что"]);
    }

    #[test]
    fn test_exclusions_are_lowercased() {
        let tokenizer = Tokenizer::from_exclusion_list("The, AND");
        assert!(tokenizer.is_excluded("the"));
        assert!(tokenizer.is_excluded("and"));
        assert_eq!(tokenizer.excluded_count(), 2);
        assert!(tokenizer.normalize("the AND").is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Tokenizer::load("/nonexistent/exclude.txt").is_err());
    }
}
