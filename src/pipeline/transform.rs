//! Content Transformer: rewrite the text of one line.
//!
//! ```text
//! body
//!  ├─ 1. Protect  references, images, links, raw URLs → placeholders
//!  ├─ 2. Fields   `Key: value` → `Key::value` when it is metadata
//!  ├─ 3. Dates    `March 3rd, 2024` → `[[date:2024-03-03]]`
//!  ├─ 4. Inline   italics, highlights (bold and brackets protected)
//!  └─ 5. Restore  every placeholder back to its literal
//! ```
//!
//! All five steps share one [`LiteralVault`] created for the line and
//! dropped when the line is done.

use crate::pipeline::classify::ListMarker;
use crate::pipeline::vault::{self, LiteralVault, VaultRules};
use crate::pipeline::{dates, fields, inline};
use once_cell::sync::Lazy;
use regex::Regex;

/// Step 1 rules. Images and links are stored already translated.
static PROTECTED_SPANS: Lazy<VaultRules> = Lazy::new(|| {
    VaultRules::new()
        .register_verbatim(Regex::new(r"\[\[.*?\]\]").unwrap())
        .register(inline::RE_IMAGE.clone(), inline::image_literal)
        .register(inline::RE_LINK.clone(), inline::link_literal)
        .register_verbatim(Regex::new(r"https?://[^\s)]+").unwrap())
});

/// Result of transforming one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedLine {
    pub text: String,
    /// The line was rewritten as a `key::value` field.
    pub field: bool,
    /// Date tokens created.
    pub dates: usize,
}

/// Run the full pipeline over a marker-stripped line body.
pub fn transform_line(body: &str, marker: Option<ListMarker>) -> TransformedLine {
    let mut vault = LiteralVault::new();

    let text = PROTECTED_SPANS.mask(body, &mut vault);
    let (text, field) = match fields::convert_field(&text, marker) {
        Some(converted) => (converted, true),
        None => (text, false),
    };
    let (text, dates) = dates::normalize_dates(&text);
    let text = inline::translate_inline(&text, &mut vault);
    let text = vault.restore(&text);

    debug_assert!(!vault::contains_placeholder(&text));
    TransformedLine { text, field, dates }
}

/// `| a | b |` → `a | b`.
pub fn normalize_table_row(row: &str) -> String {
    row.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
