use serde::{Deserialize, Serialize};

use crate::core::Split;
use crate::labeling::LabelKind;

/// How many records landed in each label class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStats {
    pub hard_negative: usize,
    pub synthetic_negative: usize,
    pub positive: usize,
    /// Positives whose partner lost its last character
    pub truncated: usize,
}

impl LabelStats {
    pub fn record(&mut self, kind: LabelKind) {
        match kind {
            LabelKind::HardNegative => self.hard_negative += 1,
            LabelKind::SyntheticNegative => self.synthetic_negative += 1,
            LabelKind::Positive { truncated } => {
                self.positive += 1;
                if truncated {
                    self.truncated += 1;
                }
            }
        }
    }

    pub fn total(&self) -> usize {
        self.hard_negative + self.synthetic_negative + self.positive
    }
}

impl FromIterator<LabelKind> for LabelStats {
    fn from_iter<I: IntoIterator<Item = LabelKind>>(iter: I) -> Self {
        let mut stats = Self::default();
        for kind in iter {
            stats.record(kind);
        }
        stats
    }
}

/// Per-split counters of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitReport {
    pub split: Split,
    pub rows: usize,
    pub groups: usize,
    pub pairs: usize,
    pub labels: LabelStats,
}

impl SplitReport {
    pub fn new(split: Split) -> Self {
        Self {
            split,
            rows: 0,
            groups: 0,
            pairs: 0,
            labels: LabelStats::default(),
        }
    }
}

/// Summary returned by a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub train: SplitReport,
    pub valid: SplitReport,

    /// Wall time of the run in milliseconds
    pub latency_ms: f64,
}

impl PipelineReport {
    pub fn split(&self, split: Split) -> &SplitReport {
        match split {
            Split::Train => &self.train,
            Split::Valid => &self.valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_stats_collect() {
        let stats: LabelStats = vec![
            LabelKind::HardNegative,
            LabelKind::SyntheticNegative,
            LabelKind::SyntheticNegative,
            LabelKind::Positive { truncated: true },
            LabelKind::Positive { truncated: false },
        ]
        .into_iter()
        .collect();

        assert_eq!(stats.hard_negative, 1);
        assert_eq!(stats.synthetic_negative, 2);
        assert_eq!(stats.positive, 2);
        assert_eq!(stats.truncated, 1);
        assert_eq!(stats.total(), 5);
    }
}
