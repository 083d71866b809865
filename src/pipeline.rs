use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::PipelineConfig;
use crate::core::{
    ActorRecord, EnrichedPair, LabelStats, LabeledExample, Pair, PipelineReport, Row, Split,
    SplitData, SplitReport,
};
use crate::error::{PipelineError, Result};
use crate::grouping::{extract_groups, split_rows};
use crate::labeling::LabelAssigner;
use crate::loader::load_rows;
use crate::pairs::enumerate_all;
use crate::parallel::parallel_map;
use crate::perturb::{EdaPerturber, Perturber, SynonymDict};
use crate::sampling::sample_negatives;
use crate::similarity::SimilarityScorer;
use crate::storage::{DatasetStore, JsonlStore};

/// Corpus build orchestrator
///
/// Runs split → group → pair enumeration, persists the actor dataset, then
/// samples negatives, perturbs anchors, labels every pair and persists the
/// critic dataset. Any error aborts the run before the pending artifact is
/// written.
pub struct Pipeline {
    config: PipelineConfig,
    perturber: Arc<dyn Perturber>,
    store: Arc<dyn DatasetStore>,
    assigner: LabelAssigner,
}

impl Pipeline {
    /// Create pipeline with EDA perturbation, Jaccard scoring and a JSON Lines store
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let synonyms = match &config.synonyms {
            Some(path) => SynonymDict::from_json_file(path)?,
            None => SynonymDict::builtin()?,
        };
        let perturber = Arc::new(EdaPerturber::with_synonyms(config.eda, synonyms));
        let store = Arc::new(JsonlStore::new(config.output_dir.clone()));
        let assigner = LabelAssigner::new(config.labels);

        Ok(Self {
            config,
            perturber,
            store,
            assigner,
        })
    }

    pub fn with_perturber(mut self, perturber: Arc<dyn Perturber>) -> Self {
        self.perturber = perturber;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn DatasetStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.assigner = LabelAssigner::with_scorer(self.config.labels, scorer);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured corpus and run every stage
    pub fn run(&self) -> Result<PipelineReport> {
        let rows = load_rows(&self.config.input)?;
        self.run_rows(rows)
    }

    /// Run every stage over already loaded rows
    pub fn run_rows(&self, rows: Vec<Row>) -> Result<PipelineReport> {
        let start = Instant::now();
        let mut rng = self.master_rng();

        tracing::info!("🚀 Building corpus from {} rows ({})", rows.len(), self.config);

        let rows = split_rows(rows, self.config.validation_modulus);
        let mut train_report = SplitReport::new(Split::Train);
        let mut valid_report = SplitReport::new(Split::Valid);

        let pairs = rows.try_map(|split, rows| {
            let report = match split {
                Split::Train => &mut train_report,
                Split::Valid => &mut valid_report,
            };
            let groups = extract_groups(&rows);
            let pairs = enumerate_all(&groups);

            report.rows = rows.len();
            report.groups = groups.len();
            report.pairs = pairs.len();
            tracing::info!(
                "📦 {}: {} rows, {} groups, {} pairs",
                split,
                report.rows,
                report.groups,
                report.pairs
            );
            Ok::<_, PipelineError>(pairs)
        })?;

        let actor = SplitData::new(
            pairs.train.iter().map(ActorRecord::from).collect(),
            pairs.valid.iter().map(ActorRecord::from).collect(),
        );
        self.store.save_actor(&actor)?;

        let (train_examples, train_stats) = self.label_split(Split::Train, &pairs.train, &mut rng)?;
        let (valid_examples, valid_stats) = self.label_split(Split::Valid, &pairs.valid, &mut rng)?;
        train_report.labels = train_stats;
        valid_report.labels = valid_stats;

        self.store
            .save_critic(&SplitData::new(train_examples, valid_examples))?;

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!("✅ Corpus built in {:.1}ms", latency_ms);

        Ok(PipelineReport {
            train: train_report,
            valid: valid_report,
            latency_ms,
        })
    }

    /// Negatives, perturbation and labeling for one split
    fn label_split(
        &self,
        split: Split,
        pairs: &[Pair],
        rng: &mut StdRng,
    ) -> Result<(Vec<LabeledExample>, LabelStats)> {
        let workers = self.config.worker_count;
        let num_variants = self.config.num_variants;

        let negatives = sample_negatives(pairs, rng)?;

        let fakes = parallel_map(pairs, workers, rng, |pair, record_rng| {
            Ok(self
                .perturber
                .perturb_one(&pair.anchor, num_variants, record_rng))
        })?;
        tracing::debug!(
            "{}: generated {} fakes with {}",
            split,
            fakes.len(),
            self.perturber.name()
        );

        let enriched: Vec<EnrichedPair> = pairs
            .iter()
            .zip(negatives)
            .zip(fakes)
            .map(|((pair, negative), fake)| EnrichedPair::new(pair.clone(), negative, fake))
            .collect();

        let labeled = parallel_map(&enriched, workers, rng, |record, record_rng| {
            self.assigner.assign(record, record_rng)
        })?;

        let stats: LabelStats = labeled.iter().map(|(_, kind)| *kind).collect();
        tracing::info!(
            "🏷️ {}: {} hard negatives, {} synthetic negatives, {} positives ({} truncated)",
            split,
            stats.hard_negative,
            stats.synthetic_negative,
            stats.positive,
            stats.truncated
        );

        let examples = labeled.into_iter().map(|(example, _)| example).collect();
        Ok((examples, stats))
    }

    fn master_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
