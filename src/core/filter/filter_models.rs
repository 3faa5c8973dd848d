// Filter domain data - the leet substitution table and banned word list.
//
// Both are plain data. The filter builds its lookup order from them once at
// startup, so swapping in a table loaded from disk changes nothing else.

use serde_json::{Map, Value};

/// Default leet substitutions, keyed by the letter they stand in for.
///
/// Order matters when two bases share a substitute (`1` is both `i` and `l`):
/// the earlier base wins.
pub const DEFAULT_LEET_TABLE: &[(char, &[&str])] = &[
    ('a', &["4", "@", "ä", "á", "à", "â", "ª"]),
    ('b', &["8", "ß", "13"]),
    ('c', &["(", "{", "[", "<", "¢"]),
    ('e', &["3", "€", "£", "ë", "ê", "è", "é"]),
    ('g', &["9", "6"]),
    ('h', &["#"]),
    ('i', &["1", "!", "|", "í", "ì", "ï", "î"]),
    ('l', &["1", "|", "£"]),
    ('o', &["0", "°", "ø", "ö", "ó", "ò", "ô"]),
    ('s', &["$", "5", "§"]),
    ('t', &["7", "+"]),
    ('u', &["ü", "ú", "ù", "û", "v"]),
    ('z', &["2", "ž"]),
];

/// Words that get a submitter banned.
pub const DEFAULT_BANNED_WORDS: &[&str] = &["shit", "damn", "badword1", "badword2"];

/// One row of the substitution table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeetEntry {
    pub base: char,
    pub substitutes: Vec<String>,
}

/// The full substitution table, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeetTable {
    pub entries: Vec<LeetEntry>,
}

impl LeetTable {
    /// Build a table from a `{ "a": ["4", "@"], ... }` JSON document.
    ///
    /// Keys must be single characters. Rows keep the order they appear in
    /// the document, which decides shared substitutes.
    pub fn from_json(raw: &str) -> Result<Self, LeetTableError> {
        // Map keeps insertion order with serde_json's preserve_order feature
        let map: Map<String, Value> = serde_json::from_str(raw)?;

        let mut entries = Vec::with_capacity(map.len());
        for (key, substitutes) in map {
            let mut chars = key.chars();
            let base = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(LeetTableError::InvalidBase(key)),
            };
            let substitutes: Vec<String> = serde_json::from_value(substitutes)?;
            entries.push(LeetEntry { base, substitutes });
        }

        Ok(Self { entries })
    }
}

impl Default for LeetTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_LEET_TABLE
                .iter()
                .map(|(base, subs)| LeetEntry {
                    base: *base,
                    substitutes: subs.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeetTableError {
    #[error("Leet table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Leet table key must be a single character, got {0:?}")]
    InvalidBase(String),
}
