//! Conversion results: chunks ready to paste, plus statistics.

use crate::pipeline::chunk::DOCUMENT_MARKER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything a conversion produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// One or more paste-ready chunks, in document order.
    pub chunks: Vec<OutputChunk>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Every chunk's text, in order.
    pub fn texts(&self) -> Vec<String> {
        self.chunks.iter().map(OutputChunk::text).collect()
    }
}

/// One self-contained paste unit. `lines[0]` is always the document marker.
///
/// A line may contain embedded newlines: a code block renders as a single
/// bullet whose text spans several physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputChunk {
    /// 1-based position among the conversion's chunks.
    pub index: usize,
    pub lines: Vec<String>,
}

impl OutputChunk {
    /// An empty chunk holding only the marker.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lines: vec![DOCUMENT_MARKER.to_string()],
        }
    }

    /// Serialized chunk: lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Rendered lines after the marker.
    pub fn body(&self) -> &[String] {
        &self.lines[1..]
    }

    /// Serialized size in characters.
    pub fn char_len(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>() + self.lines.len() - 1
    }
}

/// Counters collected during a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Lines after input preparation.
    pub input_lines: usize,
    /// Bullets emitted (headers and code blocks included).
    pub nodes: usize,
    pub headers: usize,
    pub code_blocks: usize,
    /// Lines rewritten as `key::value`.
    pub fields: usize,
    /// Date tokens created.
    pub dates: usize,
    /// The input was detected as a voice-memo transcript.
    pub transcript: bool,
    pub chunks: usize,
    pub duration_ms: u64,
}

/// Numbered file path for chunk `index`: `notes.txt` → `notes_2.txt`.
pub fn chunk_file_path(base: &Path, index: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}_{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index}"),
    };
    base.with_file_name(name)
}
