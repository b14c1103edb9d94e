//! Depth resolution: the output nesting level of every line.
//!
//! The baseline law is fixed:
//!
//! - the document root sits at depth 0
//! - a header sits at `level - 1`, whatever its parent's depth
//! - any other line sits one level below its parent
//! - fence content shares the depth of its opening fence
//!
//! Converters for different source tools disagree about how to lay out a
//! few special cases (bold labels under numbered sections, voice-memo
//! speaker lines). Those choices live in a [`DepthStrategy`] that sees the
//! baseline depth and may return a different one. Headers and fence
//! content are never handed to a strategy.

use crate::pipeline::classify::Line;
use crate::pipeline::hierarchy::governing_header;
use crate::pipeline::transcript;
use once_cell::sync::Lazy;
use regex::Regex;

/// What a [`DepthStrategy`] can see when placing one line.
pub struct DepthContext<'a> {
    /// Every classified line of the document, parents assigned.
    pub lines: &'a [Line],
    /// Depths already resolved; valid for every index below `index`.
    pub depths: &'a [usize],
    /// The line being placed.
    pub index: usize,
    /// Depth the baseline law assigns to this line.
    pub baseline: usize,
    /// The document was detected as a voice-memo transcript.
    pub transcript: bool,
}

impl DepthContext<'_> {
    pub fn line(&self) -> &Line {
        &self.lines[self.index]
    }

    /// Resolved depth of an earlier line.
    pub fn depth_of(&self, index: usize) -> usize {
        self.depths[index]
    }
}

/// Pluggable placement of non-header lines.
pub trait DepthStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Final depth for `ctx.line()`.
    fn depth(&self, ctx: &DepthContext<'_>) -> usize;
}

/// Keeps the baseline depth for every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineDepth;

impl DepthStrategy for BaselineDepth {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn depth(&self, ctx: &DepthContext<'_>) -> usize {
        ctx.baseline
    }
}

/// Lifts section content to sit directly under its governing header.
///
/// - speaker lines of a voice-memo transcript go one level below the
///   nearest header ancestor, however deeply the export nested them
/// - bold labels (`**Definition:** ...`) under a numbered section header
///   (`### 2. Scope`) go one level below that header
///
/// Every other line, and any line without a governing header, keeps its
/// baseline depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionPromotion;

static RE_NUMBERED_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s+\d+\.").unwrap());
static RE_BOLD_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\*[^*:]+:\*\*").unwrap());

impl DepthStrategy for SectionPromotion {
    fn name(&self) -> &'static str {
        "section-promotion"
    }

    fn depth(&self, ctx: &DepthContext<'_>) -> usize {
        let line = ctx.line();
        let Some(header) = governing_header(ctx.lines, ctx.index) else {
            return ctx.baseline;
        };

        if ctx.transcript && transcript::is_speaker_line(&line.content) {
            return ctx.depth_of(header) + 1;
        }

        let section = &ctx.lines[header];
        if RE_NUMBERED_SECTION.is_match(&section.content) && RE_BOLD_LABEL.is_match(&line.body) {
            return ctx.depth_of(header) + 1;
        }

        ctx.baseline
    }
}

/// Resolve the depth of every line. Skipped lines get depth 0.
pub fn resolve_depths(
    lines: &[Line],
    strategy: &dyn DepthStrategy,
    transcript: bool,
) -> Vec<usize> {
    let mut depths = vec![0; lines.len()];

    for i in 0..lines.len() {
        let line = &lines[i];
        if line.is_skipped() {
            continue;
        }

        let depth = match (line.block, line.heading_level()) {
            (Some(open), _) if open != i => depths[open],
            (None, Some(level)) => level - 1,
            _ => {
                let baseline = line.parent.map_or(0, |p| depths[p]) + 1;
                let ctx = DepthContext {
                    lines,
                    depths: &depths,
                    index: i,
                    baseline,
                    transcript,
                };
                strategy.depth(&ctx)
            }
        };
        depths[i] = depth;
    }

    depths
}
