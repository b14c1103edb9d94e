//! # tana-paste
//!
//! Convert markdown notes, AI-assistant transcripts and voice-memo exports
//! into Tana Paste outlines.
//!
//! ## Why this crate?
//!
//! Tana's paste importer expects an indented bullet outline that opens with
//! `%%tana%%`, with `key::value` fields and `[[date:...]]` references.
//! Pasting raw markdown loses the heading structure and leaves dates and
//! metadata as plain text. This crate rebuilds the document tree from
//! heading levels and indentation, rewrites each line's text, and splits the
//! result into chunks small enough for one paste each.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text
//!  │
//!  ├─ 1. Prepare    line endings, invisible chars, transcript timestamps
//!  ├─ 2. Classify   one Line per raw line (indent, header, fence, marker)
//!  ├─ 3. Hierarchy  parent pointers from headings + indentation
//!  ├─ 4. Depth      output level per line (pluggable strategy)
//!  ├─ 5. Transform  protect → fields → dates → inline → restore
//!  └─ 6. Output     indented bullets, split into marker-prefixed chunks
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tana_paste::{convert, ConversionConfig};
//!
//! let output = convert("# Plan\n- Status: Done", &ConversionConfig::default());
//! assert_eq!(output.chunks[0].text(), "%%tana%%\n- Plan\n  - Status::Done");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tana-paste` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! tana-paste = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DepthStrategyKind};
pub use convert::{convert, convert_file, convert_to_files, write_chunks};
pub use error::TanaPasteError;
pub use output::{chunk_file_path, ConversionOutput, ConversionStats, OutputChunk};
pub use pipeline::chunk::DOCUMENT_MARKER;
pub use pipeline::depth::{BaselineDepth, DepthContext, DepthStrategy, SectionPromotion};
pub use pipeline::input::{read_source, Source};
