//! Inline markup translation.
//!
//! | Markdown        | Outline                 |
//! |-----------------|-------------------------|
//! | `**bold**`      | `**bold**` (unchanged)  |
//! | `*italic*`      | `__italic__`            |
//! | `==marked==`    | `^^marked^^`            |
//! | `![alt](src)`   | `alt::!alt src`         |
//! | `![](src)`      | `!Image src`            |
//! | `[text](url)`   | `text url`              |
//! | `[aside]`       | `[aside]` (unchanged)   |
//!
//! Images and links are rewritten while they are being protected (see
//! [`crate::pipeline::transform`]), so their translated form is what comes
//! back out of the vault. This module handles the markup that is rewritten
//! in place.

use crate::pipeline::vault::{LiteralVault, VaultRules};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
pub static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static RE_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").unwrap());
static RE_HIGHLIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"==([^=]+)==").unwrap());

/// Spans the inline pass must not rewrite: references (including freshly
/// created date tokens), bold runs and plain bracketed text.
static INLINE_SPANS: Lazy<VaultRules> = Lazy::new(|| {
    VaultRules::new()
        .register_verbatim(Regex::new(r"\[\[.*?\]\]").unwrap())
        .register_verbatim(Regex::new(r"\*\*[^*]+\*\*").unwrap())
        .register_verbatim(Regex::new(r"\[[^\]]+\]").unwrap())
});

/// `![alt](src)` in outline form.
pub fn image_literal(caps: &Captures<'_>) -> String {
    let (alt, src) = (caps[1].trim(), caps[2].trim());
    if alt.is_empty() {
        format!("!Image {src}")
    } else {
        format!("{alt}::!{alt} {src}")
    }
}

/// `[text](url)` in outline form.
pub fn link_literal(caps: &Captures<'_>) -> String {
    format!("{} {}", caps[1].trim(), caps[2].trim())
}

/// Translate italics and highlights, protecting bold, references and
/// bracketed text into `vault`. The result may contain placeholders.
pub fn translate_inline(text: &str, vault: &mut LiteralVault) -> String {
    let masked = INLINE_SPANS.mask(text, vault);
    let italic = RE_ITALIC.replace_all(&masked, "__${1}__");
    RE_HIGHLIGHT.replace_all(&italic, "^^${1}^^").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(text: &str) -> String {
        let mut vault = LiteralVault::new();
        let out = translate_inline(text, &mut vault);
        vault.restore(&out)
    }

    #[test]
    fn italics_and_highlights() {
        assert_eq!(translate("an *important* ==note=="), "an __important__ ^^note^^");
    }

    #[test]
    fn bold_passes_through() {
        assert_eq!(translate("**Key** and *soft*"), "**Key** and __soft__");
    }

    #[test]
    fn arithmetic_asterisks_are_not_italics() {
        assert_eq!(translate("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn brackets_stay_literal() {
        assert_eq!(translate("[draft] *v2*"), "[draft] __v2__");
        assert_eq!(translate("see [[Project *X*]]"), "see [[Project *X*]]");
    }

    #[test]
    fn image_and_link_literals() {
        let caps = RE_IMAGE.captures("![Chart](c.png)").unwrap();
        assert_eq!(image_literal(&caps), "Chart::!Chart c.png");
        let caps = RE_IMAGE.captures("![](c.png)").unwrap();
        assert_eq!(image_literal(&caps), "!Image c.png");
        let caps = RE_LINK.captures("[Example](http://x.test)").unwrap();
        assert_eq!(link_literal(&caps), "Example http://x.test");
    }
}
