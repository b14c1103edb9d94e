//! CLI binary for tana-paste.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints or writes the chunks.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tana_paste::{
    convert, read_source, write_chunks, ConversionConfig, ConversionOutput, DepthStrategyKind,
    Source,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a file and print the outline
  tana-paste notes.md

  # Convert the clipboard (macOS)
  pbpaste | tana-paste | pbcopy

  # Write numbered chunk files: out_1.txt, out_2.txt, ...
  tana-paste long-transcript.md -o out.txt

  # Smaller chunks for a slow importer
  tana-paste --chunk-size 40000 book.md -o book.txt

  # Lift bold labels and speaker lines directly under their section header
  tana-paste --depth-strategy sections meeting.md

  # JSON output with statistics
  tana-paste --json notes.md > output.json

ENVIRONMENT VARIABLES:
  TANA_PASTE_OUTPUT          Default for --output
  TANA_PASTE_CHUNK_SIZE      Default for --chunk-size
  TANA_PASTE_DEPTH_STRATEGY  Default for --depth-strategy
  RUST_LOG                   Log filter (overrides --verbose / --quiet)
"#;

/// Convert markdown to Tana Paste format.
#[derive(Parser, Debug)]
#[command(
    name = "tana-paste",
    version,
    about = "Convert markdown, AI transcripts and voice memos to Tana Paste format",
    long_about = "Convert markdown-like text (notes, AI-assistant transcripts, voice-memo \
exports) into Tana Paste outlines. Headings and indentation become nested bullets, metadata \
lines become fields, and dates become Tana date references. Long documents are split into \
chunks that each paste on their own.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input markdown file, or `-` for stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Write numbered chunk files derived from this base name instead of stdout.
    #[arg(short, long, env = "TANA_PASTE_OUTPUT")]
    output: Option<PathBuf>,

    /// Maximum characters per chunk, marker line included.
    #[arg(long, env = "TANA_PASTE_CHUNK_SIZE", default_value_t = tana_paste::config::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Depth strategy: baseline or sections.
    #[arg(long, env = "TANA_PASTE_DEPTH_STRATEGY", value_enum, default_value = "baseline")]
    depth_strategy: DepthArg,

    /// Keep `Transcript:` lines whole instead of splitting at timestamps.
    #[arg(long)]
    no_timestamp_split: bool,

    /// Output structured JSON (ConversionOutput) instead of paste text.
    #[arg(long, conflicts_with = "output")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum DepthArg {
    Baseline,
    Sections,
}

impl From<DepthArg> for DepthStrategyKind {
    fn from(v: DepthArg) -> Self {
        match v {
            DepthArg::Baseline => DepthStrategyKind::Baseline,
            DepthArg::Sections => DepthStrategyKind::SectionPromotion,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Logs go to stderr so stdout carries only paste output.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Read input and convert ───────────────────────────────────────────
    let config = build_config(&cli)?;
    let source = Source::parse(&cli.input);
    let text = read_source(&source)
        .with_context(|| format!("Failed to read {}", source.display_path().display()))?;

    let output = convert(&text, &config);

    // ── Emit ─────────────────────────────────────────────────────────────
    if let Some(ref base) = cli.output {
        let paths = write_chunks(&output, base).context("Failed to write chunk files")?;
        if !cli.quiet {
            for (i, path) in paths.iter().enumerate() {
                eprintln!(
                    "{} Created chunk {} in {}",
                    green("✔"),
                    i + 1,
                    bold(&path.display().to_string())
                );
            }
        }
    } else if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        print_chunks(&output).context("Failed to write to stdout")?;
    }

    if !cli.quiet && !cli.json {
        let s = &output.stats;
        eprintln!(
            "{}",
            dim(&format!(
                "{} nodes, {} fields, {} dates, {} chunk(s) in {}ms",
                s.nodes, s.fields, s.dates, s.chunks, s.duration_ms
            ))
        );
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    ConversionConfig::builder()
        .max_chunk_size(cli.chunk_size)
        .depth_strategy(cli.depth_strategy.clone().into())
        .split_transcript_timestamps(!cli.no_timestamp_split)
        .build()
        .context("Invalid configuration")
}

/// A single chunk prints as-is so it can be piped straight to the
/// clipboard; several chunks get numbered separators.
fn print_chunks(output: &ConversionOutput) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let [only] = output.chunks.as_slice() {
        return writeln!(handle, "{}", only.text());
    }

    let total = output.chunks.len();
    for chunk in &output.chunks {
        writeln!(handle, "=== Chunk {}/{} ===", chunk.index, total)?;
        writeln!(handle, "{}", chunk.text())?;
        writeln!(handle)?;
    }
    Ok(())
}
