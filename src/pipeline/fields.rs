//! Field detection: decide whether `Key: value` is metadata or prose.
//!
//! Outline tools treat `key::value` as a structured field, so a wrong guess
//! in either direction is visible to the user. The policy is an ordered
//! list of [`FieldRule`]s; the first rule that returns a verdict decides,
//! and a line no rule claims stays prose.

use crate::pipeline::classify::ListMarker;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Outcome of a field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Field,
    Prose,
}

/// A `key: value` split of one line body.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub marker: Option<ListMarker>,
}

impl Candidate<'_> {
    fn bulleted(&self) -> bool {
        self.marker == Some(ListMarker::Bullet)
    }
}

/// One named heuristic. `check` returns `None` to defer to later rules.
pub struct FieldRule {
    pub name: &'static str,
    pub check: fn(&Candidate<'_>) -> Option<Verdict>,
}

/// Field rules in priority order.
pub static FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        name: "standalone-text",
        check: |c| {
            matches!(c.marker, None | Some(ListMarker::Lettered)).then_some(Verdict::Prose)
        },
    },
    FieldRule {
        name: "numbered-item",
        check: |c| (c.marker == Some(ListMarker::Numbered)).then_some(Verdict::Prose),
    },
    FieldRule {
        name: "instructional-key",
        check: |c| RE_INSTRUCTIONAL.is_match(c.key).then_some(Verdict::Prose),
    },
    FieldRule {
        name: "ui-element-key",
        check: |c| RE_UI_ELEMENT.is_match(c.key).then_some(Verdict::Prose),
    },
    FieldRule {
        name: "imperative-value",
        check: |c| RE_IMPERATIVE.is_match(c.value).then_some(Verdict::Prose),
    },
    FieldRule {
        name: "sentence-opener",
        check: |c| RE_SENTENCE_OPENER.is_match(c.value).then_some(Verdict::Prose),
    },
    FieldRule {
        name: "explicit-marker",
        check: explicit_marker,
    },
    FieldRule {
        name: "prose-punctuation",
        check: |c| {
            let punctuated = RE_PROSE_PUNCTUATION.is_match(c.value) || c.value.contains(" - ");
            (punctuated && !RE_FIELD_HINT.is_match(c.value)).then_some(Verdict::Prose)
        },
    },
    FieldRule {
        name: "metadata-key",
        check: |c| is_metadata_key(c.key).then_some(Verdict::Field),
    },
    FieldRule {
        name: "short-pair",
        check: short_pair,
    },
    FieldRule {
        name: "default",
        check: |_| Some(Verdict::Prose),
    },
];

const INSTRUCTIONAL: &[&str] = &[
    "step", "how to", "note", "example", "tip", "warning", "caution", "important", "remember",
    "click", "select", "choose", "press", "enter", "copy", "paste", "invoke", "generate", "hook",
    "connect", "create", "toggle", "shortcut", "using", "next", "first", "second", "third",
    "fourth", "fifth", "last", "final",
];

const UI_ELEMENTS: &[&str] = &[
    "window", "dialog", "menu", "button", "option", "panel", "screen", "tab", "toolbar",
    "sidebar", "modal", "keyboard", "mouse",
];

const METADATA_KEYS: &[&str] = &[
    "name", "title", "status", "priority", "assignee", "tag", "category", "owner", "due date",
    "start date", "created", "updated", "version", "id", "type", "format", "author", "publisher",
    "published", "isbn", "url", "link", "email", "phone", "address", "location", "property",
    "completion",
];

fn word_list(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}

static RE_INSTRUCTIONAL: Lazy<Regex> = Lazy::new(|| word_list(INSTRUCTIONAL));
static RE_UI_ELEMENT: Lazy<Regex> = Lazy::new(|| word_list(UI_ELEMENTS));
static RE_IMPERATIVE: Lazy<Regex> = Lazy::new(|| {
    word_list(&["press", "click", "select", "use", "open", "go to", "install", "save", "using"])
});
static RE_SENTENCE_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:the|a|an|this|that|these|those|to|in|on|at|by|with|from|for|about)\s")
        .unwrap()
});
static RE_PROSE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,()]").unwrap());
static RE_FIELD_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\([^)]*field[^)]*\)").unwrap());
static RE_SHORT_VALUE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[;,():"']"#).unwrap());

static RE_KEY_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:]+):\s+(.+)$").unwrap());
static RE_CHECKBOX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[[ xX]\]").unwrap());

fn explicit_marker(c: &Candidate<'_>) -> Option<Verdict> {
    if c.value.contains("(not a field)") {
        Some(Verdict::Prose)
    } else if c.value.contains("(field)") {
        Some(Verdict::Field)
    } else {
        None
    }
}

fn is_metadata_key(key: &str) -> bool {
    let key = key.to_lowercase();
    METADATA_KEYS.iter().any(|pattern| {
        key == *pattern
            || key.starts_with(&format!("{pattern} "))
            || key.ends_with(&format!(" {pattern}"))
    })
}

fn short_pair(c: &Candidate<'_>) -> Option<Verdict> {
    if !c.bulleted() || word_count(c.key) > 3 {
        return None;
    }
    let value_words = word_count(c.value);
    if value_words <= 3 && !RE_SHORT_VALUE_NOISE.is_match(c.value) {
        return Some(Verdict::Field);
    }
    let capitalised = c.key.chars().next().is_some_and(char::is_uppercase);
    (capitalised && value_words <= 5).then_some(Verdict::Field)
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Evaluate the rules against `candidate`, returning the deciding rule and
/// its verdict.
pub fn classify(candidate: &Candidate<'_>) -> (&'static str, Verdict) {
    FIELD_RULES
        .iter()
        .find_map(|rule| (rule.check)(candidate).map(|v| (rule.name, v)))
        .unwrap_or(("default", Verdict::Prose))
}

/// Rewrite `body` as `key::value` when it is classified as a field.
///
/// `body` is the marker-stripped line text; `marker` is the list marker that
/// preceded it. Lines that already carry `::`, table pipes or a checkbox are
/// never touched.
pub fn convert_field(body: &str, marker: Option<ListMarker>) -> Option<String> {
    if body.contains("::") || body.contains('|') || RE_CHECKBOX.is_match(body) {
        return None;
    }
    let caps = RE_KEY_VALUE.captures(body)?;
    let key = caps[1].trim();
    let value = caps[2].trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    let candidate = Candidate { key, value, marker };
    let (rule, verdict) = classify(&candidate);
    debug!("Field rule '{}' → {:?} for key '{}'", rule, verdict, key);

    (verdict == Verdict::Field).then(|| format!("{key}::{value}"))
}
