//! Placeholder table
//!
//! Finished markup fragments (code, lists, blockquotes) are parked in this
//! table while later passes rewrite the surrounding text. In the working
//! string each fragment is represented by an opaque token:
//!
//! ```text
//! \0CODEBLOCK0\0      \0INLINECODE3\0      \0PROTECTEDBLOCK1\0
//! ```
//!
//! The marker byte is stripped from input before conversion, so a token can
//! never collide with user text. Every token carries its own index, which
//! makes restoration independent of the order tokens appear in the string.

use log::trace;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Reserved marker that opens and closes every placeholder token.
pub const MARKER: char = '\u{0}';

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"\x00(CODEBLOCK|INLINECODE|PROTECTEDBLOCK)(\d+)\x00")
            .expect("Failed to compile placeholder token regex")
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Placeholder Categories
// ─────────────────────────────────────────────────────────────────────────────

/// Protection category. Each category owns its own sub-table and counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Fenced code block rendered as `<pre><code>`
    CodeBlock,
    /// Inline code span
    InlineCode,
    /// Lists and blockquotes
    Structural,
}

impl PlaceholderKind {
    /// Tag embedded in the token between the marker and the index.
    pub fn tag(&self) -> &'static str {
        match self {
            PlaceholderKind::CodeBlock => "CODEBLOCK",
            PlaceholderKind::InlineCode => "INLINECODE",
            PlaceholderKind::Structural => "PROTECTEDBLOCK",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CODEBLOCK" => Some(PlaceholderKind::CodeBlock),
            "INLINECODE" => Some(PlaceholderKind::InlineCode),
            "PROTECTEDBLOCK" => Some(PlaceholderKind::Structural),
            _ => None,
        }
    }

    /// The two code categories, restored together before line-break handling.
    pub fn code() -> &'static [PlaceholderKind] {
        &[PlaceholderKind::CodeBlock, PlaceholderKind::InlineCode]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Placeholder Table
// ─────────────────────────────────────────────────────────────────────────────

/// Append-only store of protected fragments, one vector per category.
///
/// A table lives for exactly one conversion; nothing is shared between calls.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderTable {
    code_blocks: Vec<String>,
    inline_code: Vec<String>,
    structural: Vec<String>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: PlaceholderKind) -> &Vec<String> {
        match kind {
            PlaceholderKind::CodeBlock => &self.code_blocks,
            PlaceholderKind::InlineCode => &self.inline_code,
            PlaceholderKind::Structural => &self.structural,
        }
    }

    fn slot_mut(&mut self, kind: PlaceholderKind) -> &mut Vec<String> {
        match kind {
            PlaceholderKind::CodeBlock => &mut self.code_blocks,
            PlaceholderKind::InlineCode => &mut self.inline_code,
            PlaceholderKind::Structural => &mut self.structural,
        }
    }

    /// Build the token for `index` in the given category.
    pub fn token(kind: PlaceholderKind, index: usize) -> String {
        format!("{MARKER}{}{index}{MARKER}", kind.tag())
    }

    /// Store a finished fragment and return the token that stands in for it.
    pub fn protect(&mut self, kind: PlaceholderKind, fragment: impl Into<String>) -> String {
        let slot = self.slot_mut(kind);
        let index = slot.len();
        slot.push(fragment.into());
        trace!("Protected {} fragment #{}", kind.tag(), index);
        Self::token(kind, index)
    }

    /// Number of fragments stored for a category.
    pub fn len(&self, kind: PlaceholderKind) -> usize {
        self.slot(kind).len()
    }

    /// True when no fragment of any category has been stored.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.code_blocks.is_empty() && self.inline_code.is_empty() && self.structural.is_empty()
    }

    /// Look up a stored fragment.
    pub fn get(&self, kind: PlaceholderKind, index: usize) -> Option<&str> {
        self.slot(kind).get(index).map(String::as_str)
    }

    /// Replace every token of the given categories with its fragment.
    ///
    /// Tokens of other categories, and tokens whose index is unknown, are
    /// left in place. Fragments are inserted literally.
    pub fn restore(&self, text: &str, kinds: &[PlaceholderKind]) -> String {
        token_regex()
            .replace_all(text, |caps: &Captures| {
                let whole = &caps[0];
                let Some(kind) = PlaceholderKind::from_tag(&caps[1]) else {
                    return whole.to_string();
                };
                if !kinds.contains(&kind) {
                    return whole.to_string();
                }
                caps[2]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.get(kind, index))
                    .map(str::to_string)
                    .unwrap_or_else(|| whole.to_string())
            })
            .into_owned()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
