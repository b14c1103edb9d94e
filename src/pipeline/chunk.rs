//! Chunker: split rendered units into paste-sized chunks.
//!
//! Paste importers reject oversized clipboards, so long documents are cut
//! into chunks that each open with [`DOCUMENT_MARKER`]. Cuts only happen
//! between units; a unit (one bullet, or one whole code block) is never
//! split, and a unit larger than the limit gets a chunk of its own.

use crate::output::OutputChunk;
use tracing::{debug, warn};

/// First line of every chunk.
pub const DOCUMENT_MARKER: &str = "%%tana%%";

fn size_of(unit: &str) -> usize {
    unit.chars().count() + 1
}

/// Split `units` into chunks of at most `max_size` characters.
///
/// Sizes count characters, with one extra per line for its newline. A
/// document whose full serialization fits returns exactly one chunk. An
/// empty document returns one chunk holding only the marker.
pub fn chunk_units(units: &[String], max_size: usize) -> Vec<OutputChunk> {
    let header_size = size_of(DOCUMENT_MARKER);
    let total = DOCUMENT_MARKER.chars().count() + units.iter().map(|u| size_of(u)).sum::<usize>();

    let mut current = OutputChunk::new(1);
    if total <= max_size {
        current.lines.extend(units.iter().cloned());
        return vec![current];
    }

    let mut chunks = Vec::new();
    let mut current_size = header_size;

    for unit in units {
        let unit_size = size_of(unit);
        if current_size + unit_size > max_size && !current.body().is_empty() {
            let next = OutputChunk::new(current.index + 1);
            chunks.push(std::mem::replace(&mut current, next));
            current_size = header_size;
        }
        if header_size + unit_size > max_size {
            warn!(
                "Unit of {} chars exceeds chunk limit {}; emitting it whole in chunk {}",
                unit_size - 1,
                max_size,
                current.index
            );
        }
        current.lines.push(unit.clone());
        current_size += unit_size;
    }

    if !current.body().is_empty() {
        chunks.push(current);
    }

    debug!("Split {} units into {} chunks", units.len(), chunks.len());
    chunks
}
