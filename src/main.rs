use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use incident_miner::pipeline::{persist_outputs, run_pipeline, PipelineParams};

/// Incident Miner - derives keywords, entity tags, failure-mode themes and
/// similarity groupings from extracted aviation-incident reports
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file of extracted reports
    input: PathBuf,

    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Minimum global token count below which a token is treated as noise
    #[arg(long, default_value_t = incident_miner::stopwords::DEFAULT_LOW_THRESHOLD)]
    low_threshold: usize,

    /// Document-count ratio above which a token is treated as boilerplate
    #[arg(long, default_value_t = incident_miner::stopwords::DEFAULT_HIGH_RATIO)]
    high_ratio: f64,

    /// Cosine threshold for cause grouping
    #[arg(long, default_value_t = incident_miner::cluster::DEFAULT_THRESHOLD)]
    similarity_threshold: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    info!("Starting incident_miner - input={}", args.input.display());

    // Friendlier error if missing
    if !args.input.exists() {
        anyhow::bail!(
            "Report file not found at {}\n\
             Pass the JSON file produced by the extraction step, e.g.:\n\
             incident_miner final_extracted_data.json --output-dir out\n",
            args.input.display()
        );
    }

    let params = PipelineParams {
        low_threshold: args.low_threshold,
        high_ratio: args.high_ratio,
        similarity_threshold: args.similarity_threshold,
    };
    debug!(
        "Pipeline parameters - low_threshold={}, high_ratio={}, similarity_threshold={}",
        params.low_threshold, params.high_ratio, params.similarity_threshold
    );

    let records = incident_miner::ingest::load_records(&args.input)?;
    let output = run_pipeline(&records, &params, None)?;
    persist_outputs(&args.output_dir, &output)?;

    info!(
        "Done - enriched={}, themes={}, pairs={}, groups={}, output_dir={}",
        output.enriched.len(),
        output.themes.len(),
        output.similarity_pairs.len(),
        output.cause_groups.len(),
        args.output_dir.display()
    );
    Ok(())
}
