//! # Paraphrase Pairs
//!
//! Builds a labeled sentence-pair corpus for paraphrase-similarity training
//! from grouped paraphrase sentences:
//! - Train/validation split by group id
//! - Ordered within-group pair enumeration
//! - Cross-group negative sampling without replacement
//! - EDA-style synthetic negatives
//! - Randomized labeling mixing Jaccard-derived scores with fixed penalties
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use paraphrase_pairs::{Pipeline, PipelineConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let pipeline = Pipeline::new(PipelineConfig::default())?;
//!     let report = pipeline.run()?;
//!
//!     println!("train pairs: {}", report.train.pairs);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod grouping;
pub mod labeling;
pub mod loader;
pub mod pairs;
pub mod parallel;
pub mod perturb;
pub mod pipeline;
pub mod sampling;
pub mod similarity;
pub mod storage;

// Re-export primary types
pub use config::PipelineConfig;
pub use crate::core::{
    ActorRecord, EnrichedPair, Group, LabelStats, LabeledExample, Pair, PipelineReport, Row,
    Split, SplitData, SplitReport,
};
pub use error::{PipelineError, Result};
pub use labeling::{LabelAssigner, LabelKind, LabelPolicy};
pub use perturb::{EdaConfig, EdaPerturber, Perturber};
pub use pipeline::Pipeline;
pub use similarity::{jaccard_similarity, JaccardScorer, SimilarityScorer};
pub use storage::{DatasetStore, JsonlStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
