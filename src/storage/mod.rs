pub mod jsonl;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{ActorRecord, LabeledExample, SplitData};
use crate::error::Result;

pub use jsonl::JsonlStore;

/// Dataset holding enumerated pairs before labeling
pub const ACTOR_DATASET: &str = "actor_data";

/// Dataset holding the final labeled pairs
pub const CRITIC_DATASET: &str = "critic_data";

/// Trait for persisting the intermediate and final datasets
///
/// A save must be all-or-nothing: either every split is visible afterwards
/// or the previous state is left untouched.
pub trait DatasetStore: Send + Sync {
    fn save_actor(&self, data: &SplitData<ActorRecord>) -> Result<()>;

    fn save_critic(&self, data: &SplitData<LabeledExample>) -> Result<()>;

    fn load_actor(&self) -> Result<SplitData<ActorRecord>>;

    fn load_critic(&self) -> Result<SplitData<LabeledExample>>;
}

/// Metadata written next to every dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub dataset: String,
    pub created_at: DateTime<Utc>,
    pub version: String,
    /// Record count per split name
    pub splits: BTreeMap<String, usize>,
}
