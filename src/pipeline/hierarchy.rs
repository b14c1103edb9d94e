//! Hierarchy construction: give every line a parent.
//!
//! The tree is implicit. Each [`Line`] gets a `parent` index pointing at an
//! earlier line (or `None` for the document root), which keeps the result
//! acyclic by construction.
//!
//! Two pieces of state drive the walk, both reset per document:
//!
//! - a heading table: the most recent header seen at each level 1..=6
//! - an indentation stack: entry `k` is the parent for a line at
//!   indentation `k`
//!
//! ```text
//! # Title            parent: root          stack → [Title]
//! text               parent: Title         stack → [Title, text]
//!   nested           parent: text          stack → [Title, text, nested]
//! ## Part            parent: Title         stack → [Part]
//! ```

use crate::pipeline::classify::{Line, MAX_HEADING_LEVEL};
use tracing::debug;

/// Most recent header index per level, H1 at slot 0.
#[derive(Debug, Default)]
struct HeadingTable {
    levels: [Option<usize>; MAX_HEADING_LEVEL],
}

impl HeadingTable {
    /// Parent for a header at `level`: the latest header one level up.
    fn parent_for(&self, level: usize) -> Option<usize> {
        if level <= 1 {
            None
        } else {
            self.levels[level - 2]
        }
    }

    /// Record a header and forget every deeper one, so a later H3 attaches
    /// to this H2 rather than to an H3 from an earlier section.
    fn record(&mut self, level: usize, index: usize) {
        self.levels[level - 1] = Some(index);
        for slot in &mut self.levels[level..] {
            *slot = None;
        }
    }
}

/// Indentation stack; entry `k` parents lines at indentation `k`.
#[derive(Debug)]
struct IndentStack {
    entries: Vec<Option<usize>>,
}

impl IndentStack {
    fn rooted_at(anchor: Option<usize>) -> Self {
        Self {
            entries: vec![anchor],
        }
    }

    /// Pop down to at most `indent + 1` entries and return the parent for
    /// that indentation. A line indented past the tracked depth goes to the
    /// root.
    fn parent_at(&mut self, indent: usize) -> Option<usize> {
        self.entries.truncate(indent + 1);
        self.entries.get(indent).copied().flatten()
    }

    /// Deepest open element, without popping anything.
    fn innermost(&self) -> Option<usize> {
        self.entries.last().copied().flatten()
    }

    /// Track `index` as the element lines at `indent + 1` attach to.
    fn track(&mut self, indent: usize, parent: Option<usize>, index: usize) {
        while self.entries.len() < indent + 1 {
            self.entries.push(parent);
        }
        self.entries.push(Some(index));
    }
}

/// Assign `parent` (and `block` for fence regions) to every non-blank line.
/// Table separator rows outside a fence are left unparented.
pub fn build_hierarchy(lines: &mut [Line]) {
    let mut headings = HeadingTable::default();
    let mut stack = IndentStack::rooted_at(None);
    // (opening fence index, parent captured when it opened)
    let mut fence: Option<(usize, Option<usize>)> = None;

    for i in 0..lines.len() {
        if lines[i].content.is_empty() {
            continue;
        }

        if let Some((open, parent)) = fence {
            lines[i].parent = parent;
            lines[i].block = Some(open);
            if lines[i].is_fence {
                fence = None;
            }
            continue;
        }

        if lines[i].is_fence {
            let parent = stack.innermost();
            lines[i].parent = parent;
            lines[i].block = Some(i);
            fence = Some((i, parent));
            continue;
        }

        if lines[i].is_table_rule {
            continue;
        }

        if let Some(level) = lines[i].heading_level() {
            let parent = headings.parent_for(level);
            headings.record(level, i);
            lines[i].parent = parent;
            stack = IndentStack::rooted_at(Some(i));
            continue;
        }

        let indent = lines[i].indent;
        let parent = stack.parent_at(indent);
        lines[i].parent = parent;
        stack.track(indent, parent, i);
    }

    if let Some((open, _)) = fence {
        debug!("Fence opened at line {} is never closed", open + 1);
    }
}

/// Nearest header ancestor of line `index`, walking parent pointers.
pub fn governing_header(lines: &[Line], index: usize) -> Option<usize> {
    let mut current = lines.get(index)?.parent;
    while let Some(i) = current {
        if lines[i].is_structural_header() {
            return Some(i);
        }
        current = lines[i].parent;
    }
    None
}
