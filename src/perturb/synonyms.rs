use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Words never picked for synonym replacement
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
    "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of",
    "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "s", "t", "can", "will", "just", "don", "should", "now",
];

/// Bundled English synonym sets, one JSON object of `word → synonyms`
const BUILTIN_JSON: &str = include_str!("synonyms_en.json");

/// Word → synonyms lookup used by synonym replacement and random insertion
#[derive(Debug, Clone, Default)]
pub struct SynonymDict {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymDict {
    /// Build from `(word, synonyms)` entries; a word equal to its key is dropped
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let mut dict = Self::default();
        for (word, synonyms) in entries {
            let word = word.into().to_lowercase();
            let synonyms: Vec<String> = synonyms
                .into_iter()
                .map(|s| s.into().to_lowercase())
                .filter(|s| *s != word && !s.is_empty())
                .collect();
            if synonyms.is_empty() {
                continue;
            }
            match dict.entries.get_mut(&word) {
                Some(existing) => {
                    for s in synonyms {
                        if !existing.contains(&s) {
                            existing.push(s);
                        }
                    }
                }
                None => {
                    dict.entries.insert(word, synonyms);
                }
            }
        }
        dict
    }

    /// English dictionary bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_JSON)
    }

    /// Parse a JSON object of the form `{"word": ["synonym", ...]}`
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let parsed: HashMap<String, Vec<String>> = serde_json::from_str(raw)?;
        Ok(Self::from_entries(parsed))
    }

    /// Load a JSON object of the form `{"word": ["synonym", ...]}`
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let dict = Self::from_json_str(&raw)?;
        tracing::info!(
            "📖 Loaded {} synonym entries from {}",
            dict.len(),
            path.as_ref().display()
        );
        Ok(dict)
    }

    pub fn synonyms(&self, word: &str) -> &[String] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_stopword(word: &str) -> bool {
        STOPWORDS.contains(&word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
