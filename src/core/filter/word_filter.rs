// Profanity filter - leet normalization followed by substring matching.
//
// Pure logic, no storage. The moderation gate owns one of these.

use super::filter_models::{LeetTable, DEFAULT_BANNED_WORDS};

/// Normalizes text and checks it against a banned word list.
#[derive(Debug, Clone)]
pub struct WordFilter {
    /// (substitute, base) pairs, longest substitute first.
    substitutions: Vec<(String, String)>,
    /// Banned words, already normalized.
    banned_words: Vec<String>,
}

impl WordFilter {
    /// Build a filter from a substitution table and a banned word list.
    ///
    /// Substitutes are ordered by descending character length. Equal lengths
    /// keep table order, so the first base listed for a shared substitute wins.
    /// Banned words go through the same normalization so entries containing
    /// substitutable characters (`badword1`) still match. Entries that
    /// normalize to blank are dropped since they would match every input.
    ///
    /// Note this is wider than comparing the raw list: `badword1` becomes
    /// `badwordi`, so "badwordi" and "badw0rd!" are caught too, where a raw
    /// comparison could never match an entry containing a digit.
    pub fn new<I, W>(table: &LeetTable, banned_words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut substitutions: Vec<(String, String)> = table
            .entries
            .iter()
            .flat_map(|entry| {
                entry
                    .substitutes
                    .iter()
                    .filter(|s| !s.is_empty())
                    .map(move |s| (s.to_lowercase(), entry.base.to_string()))
            })
            .collect();

        // sort_by is stable, ties stay in table order
        substitutions.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        let mut filter = Self {
            substitutions,
            banned_words: Vec::new(),
        };

        filter.banned_words = banned_words
            .into_iter()
            .map(|word| filter.normalize(word.as_ref()).trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();

        filter
    }

    /// Canonical form of `text`: lowercase, leet substitutes replaced by their
    /// base letter, anything outside `[a-z0-9]` and whitespace turned into a
    /// single space.
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = text.to_lowercase();

        for (substitute, base) in &self.substitutions {
            if normalized.contains(substitute.as_str()) {
                normalized = normalized.replace(substitute.as_str(), base);
            }
        }

        normalized
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }

    /// True if the normalized text contains any banned word anywhere,
    /// including inside longer words.
    pub fn contains_banned_word(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let normalized = self.normalize(text);
        self.banned_words
            .iter()
            .any(|word| normalized.contains(word.as_str()))
    }

    #[allow(dead_code)]
    pub fn banned_words(&self) -> &[String] {
        &self.banned_words
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new(&LeetTable::default(), DEFAULT_BANNED_WORDS)
    }
}
