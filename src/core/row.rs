use serde::{Deserialize, Serialize};

/// One sentence of the paraphrase corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Paraphrase set the sentence belongs to
    #[serde(rename = "paraphrase_set_id")]
    pub group_id: i64,

    /// Sentence id inside the corpus (source order only, never a key)
    #[serde(rename = "sentence_id")]
    pub member_id: i64,

    /// Lower-cased sentence text
    #[serde(rename = "paraphrase")]
    pub text: String,
}

impl Row {
    pub fn new(group_id: i64, member_id: i64, text: impl Into<String>) -> Self {
        Self {
            group_id,
            member_id,
            text: text.into(),
        }
    }
}

/// Mutually paraphrastic sentences sharing a group id, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub texts: Vec<String>,
}

impl Group {
    pub fn new(id: i64, texts: Vec<String>) -> Self {
        Self { id, texts }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Number of ordered pairs this group yields: n·(n−1)
    pub fn pair_count(&self) -> usize {
        let n = self.texts.len();
        n * n.saturating_sub(1)
    }
}
