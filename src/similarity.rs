use std::collections::HashSet;

use crate::error::{PipelineError, Result};

/// Trait for lexical similarity implementations
pub trait SimilarityScorer: Send + Sync {
    /// Similarity in [0, 1]
    fn score(&self, x: &str, y: &str) -> Result<f64>;

    /// Get scorer name for logging
    fn name(&self) -> &str;
}

/// Jaccard index over whitespace tokens (duplicates collapsed)
pub struct JaccardScorer;

impl JaccardScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JaccardScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer for JaccardScorer {
    fn score(&self, x: &str, y: &str) -> Result<f64> {
        jaccard_similarity(x, y)
    }

    fn name(&self) -> &str {
        "jaccard"
    }
}

/// |tokens(x) ∩ tokens(y)| / |tokens(x) ∪ tokens(y)|
///
/// Two inputs with no tokens at all have an empty union; that case is
/// reported as [`PipelineError::DegenerateInput`] instead of a score.
pub fn jaccard_similarity(x: &str, y: &str) -> Result<f64> {
    let set_x: HashSet<&str> = x.split_whitespace().collect();
    let set_y: HashSet<&str> = y.split_whitespace().collect();

    let union = set_x.union(&set_y).count();
    if union == 0 {
        return Err(PipelineError::degenerate(x, y));
    }

    let intersection = set_x.intersection(&set_y).count();
    Ok(intersection as f64 / union as f64)
}
