pub mod eda;
pub mod synonyms;

use rand::RngCore;

pub use eda::{EdaConfig, EdaPerturber};
pub use synonyms::SynonymDict;

/// Trait for sentence perturbation implementations
///
/// Produces structurally plausible but altered variants of a sentence. The
/// pipeline keeps only the first variant of each sentence as its "fake".
pub trait Perturber: Send + Sync {
    /// Up to `num_variants` altered variants of `sentence`
    fn perturb(&self, sentence: &str, num_variants: usize, rng: &mut dyn RngCore) -> Vec<String>;

    /// Get perturber name for logging
    fn name(&self) -> &str;

    /// First produced variant, or the sentence itself when none was produced
    fn perturb_one(&self, sentence: &str, num_variants: usize, rng: &mut dyn RngCore) -> String {
        self.perturb(sentence, num_variants, rng)
            .into_iter()
            .next()
            .unwrap_or_else(|| sentence.to_string())
    }

    /// One output per input sentence
    fn perturb_batch(
        &self,
        sentences: &[String],
        num_variants: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        sentences
            .iter()
            .map(|s| self.perturb_one(s, num_variants, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Reverser;

    impl Perturber for Reverser {
        fn perturb(
            &self,
            sentence: &str,
            num_variants: usize,
            _rng: &mut dyn RngCore,
        ) -> Vec<String> {
            let reversed: String = sentence.chars().rev().collect();
            vec![reversed; num_variants]
        }

        fn name(&self) -> &str {
            "reverser"
        }
    }

    #[test]
    fn test_batch_is_one_in_one_out() {
        let mut rng = StdRng::seed_from_u64(1);
        let sentences = vec!["abc".to_string(), "de".to_string()];

        let out = Reverser.perturb_batch(&sentences, 20, &mut rng);

        assert_eq!(out, vec!["cba", "ed"]);
    }

    #[test]
    fn test_no_variants_falls_back_to_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Reverser.perturb_one("abc", 0, &mut rng), "abc");
    }
}
