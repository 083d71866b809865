//! Easy Data Augmentation perturber.
//!
//! Four word-level edits: synonym replacement, random insertion, random swap
//! and random deletion. Each enabled edit contributes `num_variants / 4 + 1`
//! candidates. Candidates equal to the cleaned original are dropped, the rest
//! are shuffled and cut to `num_variants`, and the cleaned original sentence
//! is appended last.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::perturb::{Perturber, SynonymDict};

/// Per-operation strengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdaConfig {
    /// Share of words replaced by a synonym
    pub alpha_sr: f64,
    /// Share of words inserted as synonyms of existing words
    pub alpha_ri: f64,
    /// Share of words swapped
    pub alpha_rs: f64,
    /// Per-word deletion probability
    pub p_rd: f64,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            alpha_sr: 0.1,
            alpha_ri: 0.1,
            alpha_rs: 0.1,
            p_rd: 0.1,
        }
    }
}

impl EdaConfig {
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("alpha_sr", self.alpha_sr),
            ("alpha_ri", self.alpha_ri),
            ("alpha_rs", self.alpha_rs),
            ("p_rd", self.p_rd),
        ];
        for (name, value) in values {
            if !(0.0..=1.0).contains(&value) {
                return Err(PipelineError::Config(format!(
                    "eda.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Perturber built on the four EDA operations
#[derive(Debug, Clone)]
pub struct EdaPerturber {
    config: EdaConfig,
    synonyms: SynonymDict,
}

impl EdaPerturber {
    /// Perturber over the bundled English synonym dictionary
    pub fn new(config: EdaConfig) -> Result<Self> {
        Ok(Self::with_synonyms(config, SynonymDict::builtin()?))
    }

    pub fn with_synonyms(config: EdaConfig, synonyms: SynonymDict) -> Self {
        Self { config, synonyms }
    }

    fn synonym_replacement(
        &self,
        words: &[String],
        n: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let mut result = words.to_vec();

        let mut candidates: Vec<&String> = Vec::new();
        for word in words {
            if !SynonymDict::is_stopword(word) && !candidates.contains(&word) {
                candidates.push(word);
            }
        }
        candidates.shuffle(rng);

        let mut replaced = 0;
        for word in candidates {
            if let Some(synonym) = self.synonyms.synonyms(word).choose(rng) {
                for slot in result.iter_mut().filter(|w| *w == word) {
                    *slot = synonym.clone();
                }
                replaced += 1;
            }
            if replaced >= n {
                break;
            }
        }

        // Multi-word synonyms become separate words
        split_words(&result.join(" "))
    }

    fn random_insertion(&self, words: &[String], n: usize, rng: &mut dyn RngCore) -> Vec<String> {
        let mut result = words.to_vec();
        for _ in 0..n {
            // Up to 10 picks to find a word that has synonyms
            for _ in 0..10 {
                let Some(word) = result.choose(rng) else {
                    break;
                };
                if let Some(synonym) = self.synonyms.synonyms(word).choose(rng).cloned() {
                    let position = rng.gen_range(0..=result.len());
                    result.insert(position, synonym);
                    break;
                }
            }
        }
        result
    }

    fn random_swap(words: &[String], n: usize, rng: &mut dyn RngCore) -> Vec<String> {
        let mut result = words.to_vec();
        if result.len() < 2 {
            return result;
        }
        for _ in 0..n {
            let first = rng.gen_range(0..result.len());
            // Up to 3 retries for a distinct second index
            for _ in 0..4 {
                let second = rng.gen_range(0..result.len());
                if second != first {
                    result.swap(first, second);
                    break;
                }
            }
        }
        result
    }

    fn random_deletion(words: &[String], p: f64, rng: &mut dyn RngCore) -> Vec<String> {
        if words.len() <= 1 {
            return words.to_vec();
        }
        let kept: Vec<String> = words
            .iter()
            .filter(|_| rng.gen::<f64>() > p)
            .cloned()
            .collect();
        if kept.is_empty() {
            let index = rng.gen_range(0..words.len());
            return vec![words[index].clone()];
        }
        kept
    }
}

impl Perturber for EdaPerturber {
    fn perturb(&self, sentence: &str, num_variants: usize, rng: &mut dyn RngCore) -> Vec<String> {
        let cleaned = clean_sentence(sentence);
        let words = split_words(&cleaned);
        if words.is_empty() {
            return vec![sentence.to_string()];
        }

        let per_technique = num_variants / 4 + 1;
        let strength = |alpha: f64| ((alpha * words.len() as f64) as usize).max(1);
        let mut variants: Vec<String> = Vec::with_capacity(per_technique * 4 + 1);

        if self.config.alpha_sr > 0.0 {
            let n = strength(self.config.alpha_sr);
            for _ in 0..per_technique {
                variants.push(self.synonym_replacement(&words, n, rng).join(" "));
            }
        }
        if self.config.alpha_ri > 0.0 {
            let n = strength(self.config.alpha_ri);
            for _ in 0..per_technique {
                variants.push(self.random_insertion(&words, n, rng).join(" "));
            }
        }
        if self.config.alpha_rs > 0.0 {
            let n = strength(self.config.alpha_rs);
            for _ in 0..per_technique {
                variants.push(Self::random_swap(&words, n, rng).join(" "));
            }
        }
        if self.config.p_rd > 0.0 {
            for _ in 0..per_technique {
                variants.push(Self::random_deletion(&words, self.config.p_rd, rng).join(" "));
            }
        }

        let mut variants: Vec<String> = variants
            .iter()
            .map(|v| clean_sentence(v))
            .filter(|v| !v.is_empty() && *v != cleaned)
            .collect();
        variants.shuffle(rng);
        variants.truncate(num_variants);
        variants.push(cleaned);
        variants
    }

    fn name(&self) -> &str {
        "eda"
    }
}

/// Lower-case, keep ASCII letters and spaces, collapse whitespace
fn clean_sentence(sentence: &str) -> String {
    let mut cleaned = String::with_capacity(sentence.len());
    for c in sentence.to_lowercase().chars() {
        match c {
            '\'' | '’' => {}
            'a'..='z' => cleaned.push(c),
            _ => cleaned.push(' '),
        }
    }
    split_words(&cleaned).join(" ")
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
