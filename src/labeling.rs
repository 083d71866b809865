//! Label assignment.
//!
//! Each enriched pair collapses into one labeled example. A first draw picks
//! the negative or positive branch; a second draw picks between the sampled
//! negative and the perturbed anchor (negative branch), or decides whether the
//! partner loses its last character (positive branch). Positive labels are
//! `positive_ceiling - similarity(anchor, partner)`, computed after truncation.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{EnrichedPair, LabeledExample};
use crate::error::{PipelineError, Result};
use crate::similarity::{JaccardScorer, SimilarityScorer};

/// Probabilities and fixed label values of the assignment policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelPolicy {
    /// Chance of taking the negative branch
    pub negative_rate: f64,

    /// Within the negative branch, chance of using the sampled negative
    pub hard_negative_rate: f64,

    /// Within the positive branch, chance of dropping the partner's last char
    pub truncation_rate: f64,

    pub hard_negative_label: f64,
    pub synthetic_negative_label: f64,
    pub positive_ceiling: f64,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            negative_rate: 0.5,
            hard_negative_rate: 0.3,
            truncation_rate: 0.3,
            hard_negative_label: -1.5,
            synthetic_negative_label: -0.55,
            positive_ceiling: 1.5,
        }
    }
}

impl LabelPolicy {
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("negative_rate", self.negative_rate),
            ("hard_negative_rate", self.hard_negative_rate),
            ("truncation_rate", self.truncation_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(PipelineError::Config(format!(
                    "labels.{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}

/// Which partner source survived into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    HardNegative,
    SyntheticNegative,
    Positive { truncated: bool },
}

/// Turns enriched pairs into labeled examples
#[derive(Clone)]
pub struct LabelAssigner {
    policy: LabelPolicy,
    scorer: Arc<dyn SimilarityScorer>,
}

impl LabelAssigner {
    pub fn new(policy: LabelPolicy) -> Self {
        Self::with_scorer(policy, Arc::new(JaccardScorer::new()))
    }

    pub fn with_scorer(policy: LabelPolicy, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { policy, scorer }
    }

    /// Label one record with fresh draws from `rng`
    pub fn assign<R: Rng + ?Sized>(
        &self,
        record: &EnrichedPair,
        rng: &mut R,
    ) -> Result<(LabeledExample, LabelKind)> {
        let anchor = &record.pair.anchor;

        if rng.gen::<f64>() < self.policy.negative_rate {
            let (partner, label, kind) = if rng.gen::<f64>() < self.policy.hard_negative_rate {
                (
                    record.negative.clone(),
                    self.policy.hard_negative_label,
                    LabelKind::HardNegative,
                )
            } else {
                (
                    record.fake.clone(),
                    self.policy.synthetic_negative_label,
                    LabelKind::SyntheticNegative,
                )
            };
            return Ok((LabeledExample::new(anchor.as_str(), partner, label), kind));
        }

        let mut partner = record.pair.partner.clone();
        let truncated = rng.gen::<f64>() < self.policy.truncation_rate;
        if truncated {
            partner.pop();
        }

        let similarity = self
            .scorer
            .score(anchor, &partner)
            .map_err(|e| e.in_group(record.pair.group_id))?;
        let label = self.policy.positive_ceiling - similarity;

        Ok((
            LabeledExample::new(anchor.as_str(), partner, label),
            LabelKind::Positive { truncated },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pair;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// u64 whose `gen::<f64>()` is close to `f`
    fn frac(f: f64) -> u64 {
        (f * u64::MAX as f64) as u64
    }

    fn record() -> EnrichedPair {
        EnrichedPair::new(
            Pair::new(1, "the cat sat", "the cat ran"),
            "dogs bark loudly",
            "cat the sat",
        )
    }

    #[test]
    fn test_hard_negative_branch() {
        let assigner = LabelAssigner::new(LabelPolicy::default());
        let mut rng = StepRng::new(0, 0);

        let (example, kind) = assigner.assign(&record(), &mut rng).unwrap();

        assert_eq!(kind, LabelKind::HardNegative);
        assert_eq!(example, LabeledExample::new("the cat sat", "dogs bark loudly", -1.5));
    }

    #[test]
    fn test_synthetic_negative_branch() {
        let assigner = LabelAssigner::new(LabelPolicy::default());
        let mut rng = StepRng::new(frac(0.4), 0);

        let (example, kind) = assigner.assign(&record(), &mut rng).unwrap();

        assert_eq!(kind, LabelKind::SyntheticNegative);
        assert_eq!(example, LabeledExample::new("the cat sat", "cat the sat", -0.55));
    }

    #[test]
    fn test_positive_branch_without_truncation() {
        let assigner = LabelAssigner::new(LabelPolicy::default());
        let mut rng = StepRng::new(frac(0.9), 0);

        let (example, kind) = assigner.assign(&record(), &mut rng).unwrap();

        assert_eq!(kind, LabelKind::Positive { truncated: false });
        assert_eq!(example.set_b, "the cat ran");
        assert_eq!(example.labels, 1.0);
    }

    #[test]
    fn test_positive_branch_with_truncation() {
        let assigner = LabelAssigner::new(LabelPolicy::default());
        // u ≈ 0.7, then w ≈ 0.2 after wrapping
        let mut rng = StepRng::new(frac(0.7), frac(0.5));

        let (example, kind) = assigner.assign(&record(), &mut rng).unwrap();

        assert_eq!(kind, LabelKind::Positive { truncated: true });
        assert_eq!(example.set_b, "the cat ra");
        // {the, cat} of {the, cat, sat, ra}
        assert_eq!(example.labels, 1.0);
    }

    #[test]
    fn test_truncation_is_char_aware() {
        let assigner = LabelAssigner::new(LabelPolicy::default());
        let mut rng = StepRng::new(frac(0.7), frac(0.5));
        let rec = EnrichedPair::new(Pair::new(1, "café", "café"), "x", "y");

        let (example, _) = assigner.assign(&rec, &mut rng).unwrap();

        assert_eq!(example.set_b, "caf");
    }

    #[test]
    fn test_positive_degenerate_input_propagates() {
        let assigner = LabelAssigner::new(LabelPolicy::default());
        let mut rng = StepRng::new(frac(0.9), 0);
        let rec = EnrichedPair::new(Pair::new(1, "", " "), "x", "y");

        assert!(matches!(
            assigner.assign(&rec, &mut rng),
            Err(PipelineError::DegenerateInput {
                group_id: Some(1),
                record: None,
                ..
            })
        ));
    }

    #[test]
    fn test_labels_stay_in_range() {
        let assigner = LabelAssigner::new(LabelPolicy::default());
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen_hard = 0;
        let mut seen_fake = 0;
        let mut seen_pos = 0;

        for _ in 0..2000 {
            let (example, kind) = assigner.assign(&record(), &mut rng).unwrap();
            match kind {
                LabelKind::HardNegative => {
                    seen_hard += 1;
                    assert_eq!(example.labels, -1.5);
                }
                LabelKind::SyntheticNegative => {
                    seen_fake += 1;
                    assert_eq!(example.labels, -0.55);
                }
                LabelKind::Positive { .. } => {
                    seen_pos += 1;
                    assert!(example.labels >= 0.5 && example.labels <= 1.5);
                }
            }
        }

        // Expected shares: 0.15, 0.35, 0.5
        assert!((200..400).contains(&seen_hard), "hard = {}", seen_hard);
        assert!((550..850).contains(&seen_fake), "fake = {}", seen_fake);
        assert!((850..1150).contains(&seen_pos), "pos = {}", seen_pos);
    }

    #[test]
    fn test_policy_validation() {
        let mut policy = LabelPolicy::default();
        assert!(policy.validate().is_ok());

        policy.truncation_rate = 1.2;
        assert!(matches!(policy.validate(), Err(PipelineError::Config(_))));
    }
}
