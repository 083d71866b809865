use std::path::PathBuf;

use clap::Parser;
use paraphrase_pairs::{Pipeline, PipelineConfig, Split};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "build-corpus")]
#[command(about = "Build the labeled paraphrase pair corpus", long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Corpus JSON Lines file (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads (overrides config)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Master random seed (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_yaml_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(workers) = cli.workers {
        config.worker_count = workers;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let pipeline = Pipeline::new(config)?;
    let report = pipeline.run()?;

    println!("📊 Corpus Summary:");
    for split in Split::ALL {
        let r = report.split(split);
        println!("   [{}]", split);
        println!("   Rows: {}", r.rows);
        println!("   Groups: {}", r.groups);
        println!("   Pairs: {}", r.pairs);
        println!("   Hard negatives: {}", r.labels.hard_negative);
        println!("   Synthetic negatives: {}", r.labels.synthetic_negative);
        println!("   Positives: {} ({} truncated)", r.labels.positive, r.labels.truncated);
    }
    println!("   Output: {}", pipeline.config().output_dir.display());
    println!("   Latency: {:.2}ms", report.latency_ms);

    Ok(())
}
