//! Symptom Counter - replay recorded landmarks and count symptom events

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use session::{feed_blocking, init_logging, AppConfig, FramePipeline, JsonLinesSource, Session};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "symptom-counter",
    version,
    about = "Count blink, mouth, chewing, tilt and nodding events in recorded landmarks"
)]
struct Cli {
    /// JSON-lines file with one landmark frame per line
    input: PathBuf,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also print the current ratio of every symptom
    #[arg(long)]
    presenting: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging);

    info!("=== Symptom Counter v{} ===", env!("CARGO_PKG_VERSION"));

    let file = File::open(&cli.input).with_context(|| format!("opening {}", cli.input.display()))?;
    let mut source = JsonLinesSource::new(BufReader::new(file));

    let session = Session::new(config.symptoms.clone())?;
    let (tx, pipeline) = FramePipeline::channel(config.pipeline.queue_capacity, session)?;
    let consumer = tokio::spawn(pipeline.run());
    let producer = tokio::task::spawn_blocking(move || feed_blocking(&mut source, &tx));

    let rejected = producer.await.context("frame reader panicked")?;
    let mut summary = consumer.await.context("frame pipeline panicked")?;
    summary.frames += rejected;
    summary.frames_rejected += rejected;

    for line in summary.snapshot.display_lines(cli.presenting) {
        println!("{line}");
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
