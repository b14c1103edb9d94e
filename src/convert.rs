//! Conversion entry points.
//!
//! [`convert`] is a pure function of the input text and the config: it
//! builds all per-document state, runs every pipeline stage once and
//! returns. The file-based helpers wrap it with the I/O a caller would
//! otherwise write by hand, and are the only functions that can fail.

use crate::config::ConversionConfig;
use crate::error::TanaPasteError;
use crate::output::{chunk_file_path, ConversionOutput, ConversionStats};
use crate::pipeline::{chunk, classify, depth, hierarchy, input, prepare, render, transcript};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert markdown-like text into Tana Paste chunks.
///
/// Never fails: text that matches no rule passes through unchanged.
/// Always returns at least one chunk, and every chunk opens with
/// [`chunk::DOCUMENT_MARKER`].
pub fn convert(input_text: &str, config: &ConversionConfig) -> ConversionOutput {
    let total_start = Instant::now();

    // ── Step 1: Prepare and classify ─────────────────────────────────────
    let raw = prepare::prepare_lines(input_text, config.split_transcript_timestamps);
    info!("Starting conversion: {} lines", raw.len());

    let is_transcript = transcript::is_transcript(&raw, config.transcript_min_lines);
    if is_transcript {
        debug!("Detected voice-memo transcript");
    }
    let mut lines = classify::classify_lines(&raw);

    // ── Step 2: Hierarchy and depths ─────────────────────────────────────
    hierarchy::build_hierarchy(&mut lines);
    let strategy = config.strategy();
    debug!("Resolving depths with '{}' strategy", strategy.name());
    let depths = depth::resolve_depths(&lines, strategy.as_ref(), is_transcript);

    // ── Step 3: Render and chunk ─────────────────────────────────────────
    let rendered = render::render(&lines, &depths, is_transcript);
    let chunks = chunk::chunk_units(&rendered.units, config.max_chunk_size);

    let stats = ConversionStats {
        input_lines: raw.len(),
        nodes: rendered.units.len(),
        headers: rendered.headers,
        code_blocks: rendered.code_blocks,
        fields: rendered.fields,
        dates: rendered.dates,
        transcript: is_transcript,
        chunks: chunks.len(),
        duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} nodes in {} chunk(s), {}ms",
        stats.nodes, stats.chunks, stats.duration_ms
    );

    ConversionOutput { chunks, stats }
}

/// Read `path` and convert it.
pub fn convert_file(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, TanaPasteError> {
    let text = input::read_file(path.as_ref())?;
    Ok(convert(&text, config))
}

/// Convert `input_text` and write one numbered file per chunk next to
/// `base` (`notes.txt` → `notes_1.txt`, `notes_2.txt`, ...).
///
/// Returns the written paths in chunk order.
pub fn convert_to_files(
    input_text: &str,
    base: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<Vec<PathBuf>, TanaPasteError> {
    let output = convert(input_text, config);
    write_chunks(&output, base)
}

/// Write each chunk of `output` to its numbered file.
///
/// Uses atomic write (temp file in the target directory, then persist) so
/// a failed run never leaves a half-written chunk behind.
pub fn write_chunks(
    output: &ConversionOutput,
    base: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, TanaPasteError> {
    let base = base.as_ref();
    let dir = match base.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| TanaPasteError::OutputWriteFailed {
        path: dir.clone(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(output.chunks.len());
    for chunk in &output.chunks {
        let path = chunk_file_path(base, chunk.index);
        let write_failed = |source| TanaPasteError::OutputWriteFailed {
            path: path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_failed)?;
        tmp.write_all(chunk.text().as_bytes()).map_err(write_failed)?;
        tmp.persist(&path).map_err(|e| write_failed(e.error))?;

        debug!("Wrote chunk {} to {}", chunk.index, path.display());
        written.push(path);
    }
    Ok(written)
}
