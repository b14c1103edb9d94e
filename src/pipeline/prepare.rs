//! Input preparation: deterministic cleanup of the raw document text.
//!
//! Source text arrives from clipboards, AI chat exports and voice-memo
//! apps, each with its own quirks:
//!
//! - Windows-style `\r\n` line endings
//! - Byte-order marks and zero-width characters copied along with the text
//! - Video transcripts that pack a whole talk into one `Transcript:` line,
//!   with `(MM:SS)` timestamps marking where each segment starts
//!
//! Each rule is a pure `&str → String` pass so the order below is the only
//! coupling between them.

use crate::pipeline::vault;
use once_cell::sync::Lazy;
use regex::Regex;

/// Normalise the document and split it into raw lines.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF / CR → LF)
/// 2. Strip invisible Unicode and reserved placeholder characters
/// 3. Split `Transcript:` lines at timestamps (when `split_timestamps` is set)
pub fn prepare_lines(input: &str, split_timestamps: bool) -> Vec<String> {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);

    let mut lines = Vec::new();
    for line in s.split('\n') {
        if split_timestamps {
            lines.extend(split_transcript_timestamps(line));
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Remove invisible characters ──────────────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input
        .chars()
        .filter(|&c| {
            !matches!(
                c,
                '\u{200B}' | '\u{FEFF}' | '\u{00AD}' | '\u{200C}' | '\u{200D}' | '\u{2060}'
            ) && !vault::is_reserved_char(c)
        })
        .collect()
}

// ── Rule 3: Split transcript timestamps ──────────────────────────────────────
//
// YouTube-style exports put the whole transcript on one line:
//
//   Transcript: "(0:00) Welcome back (0:42) Today we look at ..."
//
// Each `(MM:SS)` or `(HH:MM:SS)` starts a new sibling line so the outline
// gets one node per segment. The first segment keeps whatever preceded the
// first timestamp, including the `Transcript:` label.

static RE_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\d{1,2}:\d{2}(?::\d{2})?)\)").unwrap());

static RE_OPENING_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"Transcript:\s*""#).unwrap());

fn split_transcript_timestamps(line: &str) -> Vec<String> {
    if !line.contains("Transcript:") || !RE_TIMESTAMP.is_match(line) {
        return vec![line.to_string()];
    }

    let cleaned = RE_OPENING_QUOTE.replace(line, "Transcript: ");
    let cleaned = cleaned.strip_suffix('"').unwrap_or(&cleaned);
    let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();

    let starts: Vec<usize> = RE_TIMESTAMP.find_iter(cleaned).map(|m| m.start()).collect();
    let mut segments = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(cleaned.len());
        if i == 0 {
            segments.push(cleaned[..end].trim_end().to_string());
        } else {
            segments.push(format!("{indent}{}", cleaned[start..end].trim()));
        }
    }
    segments
}

// ── Tests ────────────────────────────────────────────────────────────────────
