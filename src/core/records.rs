use serde::{Deserialize, Serialize};

/// Ordered pair of distinct members of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub group_id: i64,
    pub anchor: String,
    pub partner: String,
}

impl Pair {
    pub fn new(group_id: i64, anchor: impl Into<String>, partner: impl Into<String>) -> Self {
        Self {
            group_id,
            anchor: anchor.into(),
            partner: partner.into(),
        }
    }
}

/// Pair plus its two alternative partner candidates
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPair {
    pub pair: Pair,

    /// Text sampled from a different group
    pub negative: String,

    /// Retained perturbation of the anchor
    pub fake: String,
}

impl EnrichedPair {
    pub fn new(pair: Pair, negative: impl Into<String>, fake: impl Into<String>) -> Self {
        Self {
            pair,
            negative: negative.into(),
            fake: fake.into(),
        }
    }
}

/// Row of the persisted "actor" dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub id: i64,
    #[serde(rename = "setA")]
    pub set_a: String,
    #[serde(rename = "setB")]
    pub set_b: String,
}

impl From<&Pair> for ActorRecord {
    fn from(pair: &Pair) -> Self {
        Self {
            id: pair.group_id,
            set_a: pair.anchor.clone(),
            set_b: pair.partner.clone(),
        }
    }
}

/// Terminal record of the "critic" dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    #[serde(rename = "setA")]
    pub set_a: String,
    #[serde(rename = "setB")]
    pub set_b: String,
    pub labels: f64,
}

impl LabeledExample {
    pub fn new(set_a: impl Into<String>, set_b: impl Into<String>, labels: f64) -> Self {
        Self {
            set_a: set_a.into(),
            set_b: set_b.into(),
            labels,
        }
    }
}
