use clap::Parser;
use rankx_core::rank_sharded;
use rankx_output::Emitter;
use rankx_source::LineSource;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Deterministic per-category top-K ranking over pagecounts-style dumps
#[derive(Parser, Debug)]
#[command(name = "rankx")]
#[command(about = "Compute the top-K items per category from a line-oriented dataset", long_about = None)]
struct Args {
    /// Input dataset (pagecounts format; .gz accepted)
    input: PathBuf,

    /// How many top entries to keep per category
    #[arg(short = 'k', long, default_value_t = 10)]
    top_k: usize,

    /// Destination path for the output artifact
    #[arg(short = 'D', long, default_value = "results/top_by_category.csv")]
    dest: PathBuf,

    /// Worker threads for sharded ranking (1 = sequential)
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting rankX v{}", env!("CARGO_PKG_VERSION"));
    info!("Input: {:?}", args.input);
    info!("Top-K: {}", args.top_k);
    info!("Destination: {:?}", args.dest);
    info!("Workers: {}", args.workers);

    // Fail fast on a bad destination before any record is read.
    let emitter = Emitter::new(&args.dest);
    emitter.preflight()?;

    let records = LineSource::open(&args.input)?;
    let table = rank_sharded(records, args.top_k, args.workers)?;
    info!(
        "Ranked {} entries across {} categories",
        table.entry_count(),
        table.len()
    );

    emitter.emit(&table)?;
    info!("Artifact written to {:?}", args.dest);

    Ok(())
}
