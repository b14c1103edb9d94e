//! Literal vault: keep substrings inert while other passes rewrite a line.
//!
//! A [`VaultRules`] set is an ordered list of `(pattern, handler)` pairs.
//! [`VaultRules::mask`] replaces every match with an opaque placeholder
//! token and stores the handler's output in a [`LiteralVault`]; later passes
//! cannot see inside the token, and [`LiteralVault::restore`] swaps every
//! token back for its stored literal.
//!
//! Tokens are built from Unicode private-use characters, which the input
//! preparation stage strips from source text, so a token can neither occur
//! naturally nor be matched by any date, field or markup pattern.
//!
//! A vault is a per-line value. Several rule sets may mask into the same
//! vault, sharing one placeholder namespace; the counter starts at zero for
//! every new vault.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const DIGIT_BASE: u32 = 0xE010;

static RE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{E000}([\u{E010}-\u{E01F}]+)\u{E001}").unwrap());

/// True for characters reserved for placeholder tokens.
pub fn is_reserved_char(c: char) -> bool {
    ('\u{E000}'..='\u{E01F}').contains(&c)
}

/// True when `text` still holds at least one placeholder token.
pub fn contains_placeholder(text: &str) -> bool {
    RE_PLACEHOLDER.is_match(text)
}

/// Per-line store of protected literals, indexed by placeholder id.
#[derive(Debug, Default)]
pub struct LiteralVault {
    entries: Vec<String>,
}

impl LiteralVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `literal` and return the placeholder token standing in for it.
    pub fn stash(&mut self, literal: String) -> String {
        let id = self.entries.len();
        self.entries.push(literal);
        encode_token(id)
    }

    /// Number of literals stored so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every placeholder in `text` with its stored literal.
    ///
    /// Literals may themselves contain placeholders from an earlier mask
    /// (a bold span around a URL), so substitution repeats until no known
    /// token is left. Each round resolves at least one nesting level, which
    /// bounds the loop by the number of stored entries.
    pub fn restore(&self, text: &str) -> String {
        let mut current = text.to_string();
        for _ in 0..=self.entries.len() {
            if !contains_placeholder(&current) {
                break;
            }
            current = RE_PLACEHOLDER
                .replace_all(&current, |caps: &Captures<'_>| {
                    decode_id(&caps[1])
                        .and_then(|id| self.entries.get(id))
                        .cloned()
                        .unwrap_or_default()
                })
                .into_owned();
        }
        current
    }
}

type Handler = Box<dyn Fn(&Captures<'_>) -> String + Send + Sync>;

/// Ordered `(pattern, handler)` rules applied by [`VaultRules::mask`].
pub struct VaultRules {
    rules: Vec<(Regex, Handler)>,
}

impl VaultRules {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule. Matches of `pattern` are stored as `handler(captures)`.
    pub fn register<F>(mut self, pattern: Regex, handler: F) -> Self
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        self.rules.push((pattern, Box::new(handler)));
        self
    }

    /// Add a rule that stores each match unchanged.
    pub fn register_verbatim(self, pattern: Regex) -> Self {
        self.register(pattern, |caps| caps[0].to_string())
    }

    /// Mask every rule's matches in registration order, storing into `vault`.
    ///
    /// Later rules run on the output of earlier ones, so they never see
    /// inside spans an earlier rule already protected.
    pub fn mask(&self, text: &str, vault: &mut LiteralVault) -> String {
        let mut current = text.to_string();
        for (pattern, handler) in &self.rules {
            current = pattern
                .replace_all(&current, |caps: &Captures<'_>| vault.stash(handler(caps)))
                .into_owned();
        }
        current
    }

    /// Mask into a fresh vault.
    pub fn mask_fresh(&self, text: &str) -> (String, LiteralVault) {
        let mut vault = LiteralVault::new();
        let masked = self.mask(text, &mut vault);
        (masked, vault)
    }
}

impl Default for VaultRules {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_token(id: usize) -> String {
    let mut token = String::new();
    token.push(OPEN);
    for digit in format!("{id:x}").chars() {
        let value = digit.to_digit(16).unwrap_or(0);
        token.push(char::from_u32(DIGIT_BASE + value).unwrap_or(OPEN));
    }
    token.push(CLOSE);
    token
}

fn decode_id(digits: &str) -> Option<usize> {
    digits.chars().try_fold(0usize, |acc, c| {
        let value = (c as u32).checked_sub(DIGIT_BASE)?;
        acc.checked_mul(16)?.checked_add(value as usize)
    })
}
