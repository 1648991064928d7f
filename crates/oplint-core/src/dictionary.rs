//! # Accepted-Word Dictionary
//!
//! The spelling dictionary is a plain membership set: an embedded en-US base
//! word list, extended once at startup with the configured `ignoredWords`.
//! Lookups are case-insensitive. The set only ever grows, and all additions
//! happen before the first check runs.

use std::collections::HashSet;

/// Embedded en-US base word list, one word per line.
const BASE_WORDS: &str = include_str!("en_base.txt");

/// The run's set of accepted words.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build a dictionary containing only the embedded base word list.
    pub fn base() -> Self {
        let mut dictionary = Dictionary {
            words: HashSet::new(),
        };
        dictionary.add_words(BASE_WORDS.lines());
        dictionary
    }

    /// Build an empty dictionary. Useful for tests that want full control
    /// over the accepted vocabulary.
    pub fn empty() -> Self {
        Dictionary {
            words: HashSet::new(),
        }
    }

    /// Add words to the dictionary. Empty entries are skipped; lookups are
    /// case-insensitive, so words are stored lowercased.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.words.insert(word.to_lowercase());
            }
        }
    }

    /// Whether a word is accepted, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of distinct words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
