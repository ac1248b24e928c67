// src/main.rs
// ─────────────────────────────────────────────────────────────────────────────
// Long-form generation CLI (preview model)
//
//  ❯ cargo run -p longform -- --text "Hello." --voice emma
//  ❯ cargo run -p longform -- --text-file story.txt --split --candidates 3
// ─────────────────────────────────────────────────────────────────────────────

use anyhow::{Context, Result, bail};
use clap::Parser;
use futures::StreamExt;
use std::path::PathBuf;

use longform::{
    FsArtifactWriter, GenerationParameters, LongformConfig, Orchestrator, Phase, PreviewInvoker,
    Seed, setup,
};

/// CLI switches.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Text to speak.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the text from a file instead.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Voice, or several joined with `&`.
    #[arg(long, default_value = "random")]
    voice: String,

    /// Candidates generated per segment.
    #[arg(long, default_value_t = 1)]
    candidates: usize,

    /// Seed; -1 lets the model choose.
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    seed: i64,

    /// Generate every non-blank line as its own segment.
    #[arg(long)]
    split: bool,

    /// Model option as `key=value`; the value is parsed as JSON, else kept as
    /// a string. Repeatable.
    #[arg(long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's output directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn parse_option(raw: &str) -> Result<(String, serde_json::Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("option {raw:?} is not KEY=VALUE");
    };
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.trim().to_string(), value))
}

#[tokio::main]
async fn main() -> Result<()> {
    setup::init_tracing()?;
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LongformConfig::load(path)?,
        None => LongformConfig::default(),
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let text = match (args.text, args.text_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => bail!("pass --text or --text-file"),
    };

    let mut params = GenerationParameters::new(text, args.voice)
        .with_split_prompt(args.split)
        .with_seed(Seed::from(args.seed));
    for raw in &args.options {
        let (key, value) = parse_option(raw)?;
        params = params.with_option(key, value);
    }

    let orchestrator = Orchestrator::new(
        PreviewInvoker::new(config.sample_rate),
        FsArtifactWriter::new(config),
    );

    let mut updates = std::pin::pin!(orchestrator.run(params, args.candidates));
    while let Some(update) = updates.next().await {
        let update = update?;
        let phase = match update.phase {
            Phase::Segment { index, total } => format!("segment {}/{}", index + 1, total),
            Phase::Concatenated { segments } => format!("long ({segments} segments)"),
        };
        println!(
            "[{phase}] slot {} seed {} {:.2}s -> {}",
            update.slot,
            update.output.seed,
            update.output.audio.duration_ms() as f64 / 1000.0,
            update.output.bundle_name.display()
        );
    }
    Ok(())
}
