use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::labeling::LabelPolicy;
use crate::perturb::EdaConfig;

/// Pipeline configuration with defaults matching the reference corpus build.
///
/// # Examples
///
/// ```
/// use paraphrase_pairs::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.worker_count, 8);
/// assert_eq!(config.num_variants, 20);
///
/// let config = PipelineConfig::from_yaml_str("worker_count: 2\nseed: 1\n").unwrap();
/// assert_eq!(config.worker_count, 2);
/// assert_eq!(config.seed, Some(1));
/// assert_eq!(config.validation_modulus, 10); // default
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// JSON Lines corpus with paraphrase_set_id / sentence_id / paraphrase
    pub input: PathBuf,

    /// Directory receiving actor_data/ and critic_data/
    pub output_dir: PathBuf,

    /// Threads used by the mapping stages
    pub worker_count: usize,

    /// Master seed; None draws one from OS entropy
    pub seed: Option<u64>,

    /// Groups with `id mod validation_modulus == 0` go to validation
    pub validation_modulus: i64,

    /// Perturbations requested per anchor (only the first is kept)
    pub num_variants: usize,

    pub eda: EdaConfig,

    /// Optional JSON synonym dictionary replacing the built-in one
    pub synonyms: Option<PathBuf>,

    pub labels: LabelPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/tapaco_en.jsonl"),
            output_dir: PathBuf::from("data"),
            worker_count: 8,
            seed: None,
            validation_modulus: 10,
            num_variants: 20,
            eda: EdaConfig::default(),
            synonyms: None,
            labels: LabelPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&raw)?;
        tracing::info!("⚙️ Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(PipelineError::Config("worker_count must be at least 1".into()));
        }
        if self.validation_modulus <= 0 {
            return Err(PipelineError::Config(format!(
                "validation_modulus must be positive, got {}",
                self.validation_modulus
            )));
        }
        if self.num_variants == 0 {
            return Err(PipelineError::Config("num_variants must be at least 1".into()));
        }
        self.eda.validate()?;
        self.labels.validate()
    }
}

impl std::fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "input={}, output={}, workers={}, seed={}, modulus={}, variants={}",
            self.input.display(),
            self.output_dir.display(),
            self.worker_count,
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "entropy".to_string()),
            self.validation_modulus,
            self.num_variants
        )
    }
}
