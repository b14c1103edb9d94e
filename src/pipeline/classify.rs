//! Line classification: one raw line in, one [`Line`] record out.
//!
//! Classification looks only at the line itself. Indentation comes from
//! leading whitespace alone (two spaces, or one tab, per unit), so a list
//! item and a prose line at the same indentation are treated alike by the
//! hierarchy builder.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum heading depth; deeper `#` runs are clamped to it.
pub const MAX_HEADING_LEVEL: usize = 6;

/// List marker that opened a line, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `*`, `+` or `•` followed by whitespace.
    Bullet,
    /// `12. `
    Numbered,
    /// `a. `
    Lettered,
}

/// A classified source line.
///
/// Everything except `parent` and `block` is fixed at classification;
/// those two are assigned once by [`crate::pipeline::hierarchy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The line exactly as it appeared after input preparation.
    pub raw: String,
    /// Indentation-stripped, right-trimmed text.
    pub content: String,
    /// `content` with its list marker removed.
    pub body: String,
    /// Indentation units: leading spaces / 2, tabs counting as two spaces.
    pub indent: usize,
    pub is_header: bool,
    pub is_fence: bool,
    pub marker: Option<ListMarker>,
    /// GFM table separator row (`| --- | --- |`); carries no content.
    pub is_table_rule: bool,
    /// Index of the parent line; `None` is the document root.
    pub parent: Option<usize>,
    /// Index of the opening fence when this line belongs to a fence region.
    pub block: Option<usize>,
}

impl Line {
    /// Blank lines and table rules outside a fence are skipped by every
    /// later stage.
    pub fn is_skipped(&self) -> bool {
        self.content.is_empty() || (self.is_table_rule && self.block.is_none())
    }

    /// Heading level (1..=6) for header lines.
    pub fn heading_level(&self) -> Option<usize> {
        if !self.is_header {
            return None;
        }
        let hashes = self.content.chars().take_while(|&c| c == '#').count();
        Some(hashes.clamp(1, MAX_HEADING_LEVEL))
    }

    /// Header text without its `#` run, or the content when it has no
    /// `# text` shape (a bare `#tag`).
    pub fn heading_text(&self) -> &str {
        match RE_HEADING.captures(&self.content) {
            Some(caps) => caps.get(2).map_or(self.content.as_str(), |m| m.as_str()),
            None => &self.content,
        }
    }

    /// True for a header line outside any fence region.
    pub fn is_structural_header(&self) -> bool {
        self.is_header && self.block.is_none()
    }
}

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+•]\s+").unwrap());
static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());
static RE_LETTERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]\.\s+").unwrap());

/// Classify one raw line.
pub fn classify_line(raw: &str) -> Line {
    let leading: &str = &raw[..raw.len() - raw.trim_start().len()];
    let width: usize = leading.chars().map(|c| if c == '\t' { 2 } else { 1 }).sum();
    let content = raw.trim().to_string();

    let (marker, body) = split_marker(&content);
    let body = body.to_string();

    Line {
        raw: raw.to_string(),
        indent: width / 2,
        is_header: content.starts_with('#'),
        is_fence: content.starts_with("```"),
        is_table_rule: is_table_row(&content) && is_separator_row(&content),
        marker,
        body,
        content,
        parent: None,
        block: None,
    }
}

/// Classify every line of a prepared document.
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Line> {
    lines.iter().map(|l| classify_line(l.as_ref())).collect()
}

fn split_marker(content: &str) -> (Option<ListMarker>, &str) {
    if content.starts_with('#') || content.starts_with("```") {
        return (None, content);
    }
    let patterns: [(&Regex, ListMarker); 3] = [
        (&*RE_BULLET, ListMarker::Bullet),
        (&*RE_NUMBERED, ListMarker::Numbered),
        (&*RE_LETTERED, ListMarker::Lettered),
    ];
    for (re, marker) in patterns {
        if let Some(m) = re.find(content) {
            return (Some(marker), &content[m.end()..]);
        }
    }
    (None, content)
}

/// A GFM table row: starts and ends with `|`.
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|') && trimmed.len() > 2
}

/// A separator row contains only `|`, `-`, `:` and whitespace.
pub fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') {
        return false;
    }
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| c == '|' || c == '-' || c == ':' || c == ' ')
}
