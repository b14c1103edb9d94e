//! Output Linearizer: turn resolved lines into indented bullet units.
//!
//! Each unit is `"  " * depth + "- " + text`. A code block becomes a single
//! unit whose text is the block's interior lines joined with `\n`; the
//! chunker treats it as indivisible.

use crate::pipeline::classify::{is_table_row, Line};
use crate::pipeline::transcript;
use crate::pipeline::transform::{normalize_table_row, transform_line};
use tracing::debug;

/// Rendered units plus the counters gathered while producing them.
#[derive(Debug, Default)]
pub struct Rendered {
    pub units: Vec<String>,
    pub headers: usize,
    pub code_blocks: usize,
    pub fields: usize,
    pub dates: usize,
}

fn bullet(depth: usize, text: &str) -> String {
    format!("{}- {}", "  ".repeat(depth), text)
}

/// Interior of the code block opened at `open`, delimiters excluded.
fn code_block_text(lines: &[Line], open: usize) -> String {
    lines[open + 1..]
        .iter()
        .take_while(|l| l.block == Some(open) || l.is_skipped())
        .filter(|l| l.block == Some(open) && !l.is_fence)
        .map(|l| l.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Linearize `lines` in document order using the resolved `depths`.
pub fn render(lines: &[Line], depths: &[usize], transcript: bool) -> Rendered {
    let mut out = Rendered::default();

    for (i, line) in lines.iter().enumerate() {
        if line.is_skipped() {
            continue;
        }
        let depth = depths[i];

        match line.block {
            Some(open) if open == i => {
                let code = code_block_text(lines, open);
                if !code.is_empty() {
                    out.units.push(bullet(depth, &code));
                    out.code_blocks += 1;
                }
                continue;
            }
            Some(_) => continue,
            None => {}
        }

        if line.is_header {
            out.units.push(bullet(depth, line.heading_text()));
            out.headers += 1;
            continue;
        }

        let (body, marker) = if transcript {
            match transcript::reformat_speaker_line(&line.content) {
                Some(speaker) => (speaker, None),
                None => (line.body.clone(), line.marker),
            }
        } else if is_table_row(&line.content) {
            (normalize_table_row(&line.content), None)
        } else {
            (line.body.clone(), line.marker)
        };

        let transformed = transform_line(&body, marker);
        out.fields += usize::from(transformed.field);
        out.dates += transformed.dates;
        out.units.push(bullet(depth, &transformed.text));
    }

    debug!(
        "Rendered {} units ({} headers, {} code blocks, {} fields, {} dates)",
        out.units.len(),
        out.headers,
        out.code_blocks,
        out.fields,
        out.dates
    );
    out
}
