//! Voice-memo transcript support.
//!
//! Recording apps export each utterance as a quote line with a speaker link
//! carrying millisecond offsets:
//!
//! ```text
//! > [Ann](#startMs=0&endMs=4200): Shall we start?
//! ```
//!
//! Once a document holds enough of these lines it is treated as a
//! transcript, and every such line is rewritten to `Ann: Shall we start?`.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SPEAKER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^>\s*\[(.*?)\]\(#startMs=\d+&endMs=\d+\):\s*(.*?)$").unwrap()
});

/// True for an indentation-stripped speaker line.
pub fn is_speaker_line(content: &str) -> bool {
    RE_SPEAKER_LINE.is_match(content)
}

/// True when at least `min_lines` lines are speaker lines.
pub fn is_transcript<S: AsRef<str>>(lines: &[S], min_lines: usize) -> bool {
    lines
        .iter()
        .filter(|l| is_speaker_line(l.as_ref().trim()))
        .take(min_lines)
        .count()
        >= min_lines
}

/// `Speaker: text` for a speaker line, `None` otherwise.
pub fn reformat_speaker_line(content: &str) -> Option<String> {
    let caps = RE_SPEAKER_LINE.captures(content)?;
    let speaker = caps[1].trim();
    let text = caps[2].trim();
    Some(if text.is_empty() {
        format!("{speaker}:")
    } else {
        format!("{speaker}: {text}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "> [Ann](#startMs=0&endMs=4200): Shall we start?";

    #[test]
    fn speaker_lines_are_recognised() {
        assert!(is_speaker_line(LINE));
        assert!(!is_speaker_line("> plain quote"));
        assert!(!is_speaker_line("[Ann](#startMs=0&endMs=1): no quote"));
    }

    #[test]
    fn reformat_drops_link_and_offsets() {
        assert_eq!(
            reformat_speaker_line(LINE).as_deref(),
            Some("Ann: Shall we start?")
        );
        assert_eq!(reformat_speaker_line("plain"), None);
    }

    #[test]
    fn detection_needs_the_minimum_count() {
        let two = [LINE, "text", LINE];
        assert!(!is_transcript(&two, 3));
        assert!(is_transcript(&two, 2));

        let indented = ["  > [B](#startMs=1&endMs=2): x"; 3];
        assert!(is_transcript(&indented, 3));
    }
}
