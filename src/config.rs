//! Configuration types for markdown-to-Tana conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. A config only carries knobs; every
//! conversion builds its own per-document and per-line state from scratch.

use crate::error::TanaPasteError;
use crate::pipeline::chunk::DOCUMENT_MARKER;
use crate::pipeline::depth::{BaselineDepth, DepthStrategy, SectionPromotion};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default maximum size of one output chunk, in characters.
///
/// Tana's paste importer rejects very large clipboard payloads; 90 000
/// characters stays comfortably below that limit.
pub const DEFAULT_CHUNK_SIZE: usize = 90_000;

/// Smallest chunk size that can still hold the marker line plus one character.
pub const MIN_CHUNK_SIZE: usize = DOCUMENT_MARKER.len() + 2;

/// Configuration for a markdown-to-Tana conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use tana_paste::{ConversionConfig, DepthStrategyKind};
///
/// let config = ConversionConfig::builder()
///     .max_chunk_size(50_000)
///     .depth_strategy(DepthStrategyKind::SectionPromotion)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Maximum characters per output chunk, marker line included. Default: 90 000.
    ///
    /// A single node larger than this is still emitted whole in a chunk of
    /// its own; nodes are never truncated or split.
    pub max_chunk_size: usize,

    /// Built-in depth strategy. Default: [`DepthStrategyKind::Baseline`].
    pub depth_strategy: DepthStrategyKind,

    /// Caller-supplied depth strategy. Takes precedence over `depth_strategy`.
    pub custom_depth_strategy: Option<Arc<dyn DepthStrategy>>,

    /// Split `Transcript:` lines at `(MM:SS)` timestamps. Default: true.
    pub split_transcript_timestamps: bool,

    /// Speaker lines needed before a document is treated as a voice-memo
    /// transcript. Default: 3.
    pub transcript_min_lines: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_CHUNK_SIZE,
            depth_strategy: DepthStrategyKind::default(),
            custom_depth_strategy: None,
            split_transcript_timestamps: true,
            transcript_min_lines: 3,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("max_chunk_size", &self.max_chunk_size)
            .field("depth_strategy", &self.depth_strategy)
            .field(
                "custom_depth_strategy",
                &self
                    .custom_depth_strategy
                    .as_ref()
                    .map(|_| "<dyn DepthStrategy>"),
            )
            .field(
                "split_transcript_timestamps",
                &self.split_transcript_timestamps,
            )
            .field("transcript_min_lines", &self.transcript_min_lines)
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The depth strategy this config resolves to.
    pub fn strategy(&self) -> Arc<dyn DepthStrategy> {
        match self.custom_depth_strategy {
            Some(ref custom) => Arc::clone(custom),
            None => self.depth_strategy.instantiate(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn max_chunk_size(mut self, n: usize) -> Self {
        self.config.max_chunk_size = n;
        self
    }

    pub fn depth_strategy(mut self, kind: DepthStrategyKind) -> Self {
        self.config.depth_strategy = kind;
        self
    }

    pub fn custom_depth_strategy(mut self, strategy: Arc<dyn DepthStrategy>) -> Self {
        self.config.custom_depth_strategy = Some(strategy);
        self
    }

    pub fn split_transcript_timestamps(mut self, v: bool) -> Self {
        self.config.split_transcript_timestamps = v;
        self
    }

    pub fn transcript_min_lines(mut self, n: usize) -> Self {
        self.config.transcript_min_lines = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, TanaPasteError> {
        let c = &self.config;
        if c.max_chunk_size < MIN_CHUNK_SIZE {
            return Err(TanaPasteError::InvalidConfig(format!(
                "chunk size must be at least {MIN_CHUNK_SIZE}, got {}",
                c.max_chunk_size
            )));
        }
        if c.transcript_min_lines == 0 {
            return Err(TanaPasteError::InvalidConfig(
                "transcript detection needs at least 1 speaker line".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Built-in strategies for resolving output depth.
///
/// | Kind | Behaviour |
/// |------|-----------|
/// | `Baseline` | headers at `level - 1`, everything else one below its parent (default) |
/// | `SectionPromotion` | baseline, plus transcript lines and bold labels lifted to sit directly under their governing header |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepthStrategyKind {
    #[default]
    Baseline,
    SectionPromotion,
}

impl DepthStrategyKind {
    fn instantiate(self) -> Arc<dyn DepthStrategy> {
        match self {
            DepthStrategyKind::Baseline => Arc::new(BaselineDepth),
            DepthStrategyKind::SectionPromotion => Arc::new(SectionPromotion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chunk_size_is_ninety_thousand() {
        let config = ConversionConfig::default();
        assert_eq!(config.max_chunk_size, 90_000);
        assert_eq!(config.depth_strategy, DepthStrategyKind::Baseline);
        assert!(config.split_transcript_timestamps);
    }

    #[test]
    fn builder_rejects_tiny_chunk_size() {
        let err = ConversionConfig::builder()
            .max_chunk_size(3)
            .build()
            .unwrap_err();
        assert!(matches!(err, TanaPasteError::InvalidConfig(_)));
    }

    #[test]
    fn builder_accepts_minimum_chunk_size() {
        let config = ConversionConfig::builder()
            .max_chunk_size(MIN_CHUNK_SIZE)
            .build()
            .unwrap();
        assert_eq!(config.max_chunk_size, MIN_CHUNK_SIZE);
    }

    #[test]
    fn builder_rejects_zero_transcript_lines() {
        assert!(ConversionConfig::builder()
            .transcript_min_lines(0)
            .build()
            .is_err());
    }

    #[test]
    fn debug_hides_custom_strategy() {
        let config = ConversionConfig::builder()
            .custom_depth_strategy(Arc::new(BaselineDepth))
            .build()
            .unwrap();
        let dbg = format!("{config:?}");
        assert!(dbg.contains("<dyn DepthStrategy>"));
    }
}
