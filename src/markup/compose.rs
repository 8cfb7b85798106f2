//! Paragraph composition and final cleanup
//!
//! The composer knows nothing about lists or blockquotes; those are still
//! tokens when it runs. It only has to keep its hands off restored `<pre>`
//! blocks, whose newlines are significant.

use super::placeholder::MARKER;
use regex::Regex;
use std::sync::OnceLock;

static PRE_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();
static BREAK_BEFORE_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static EMPTY_PARAGRAPH_REGEX: OnceLock<Regex> = OnceLock::new();
static EXCESS_BREAKS_REGEX: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_GAP_REGEX: OnceLock<Regex> = OnceLock::new();
static TRAILING_BREAKS_REGEX: OnceLock<Regex> = OnceLock::new();

fn pre_block_regex() -> &'static Regex {
    PRE_BLOCK_REGEX
        .get_or_init(|| Regex::new(r"(?s)<pre>.*?</pre>").expect("Failed to compile pre regex"))
}

fn paragraph_break_regex() -> &'static Regex {
    PARAGRAPH_BREAK_REGEX
        .get_or_init(|| Regex::new(r"\n{2,}").expect("Failed to compile paragraph break regex"))
}

fn break_before_block_regex() -> &'static Regex {
    BREAK_BEFORE_BLOCK_REGEX.get_or_init(|| {
        Regex::new(r"<br/>\s*(<pre>|<ul>|<ol>|<blockquote>|<h[1-6]>)")
            .expect("Failed to compile block break regex")
    })
}

fn paragraph_tag_regex() -> &'static Regex {
    PARAGRAPH_TAG_REGEX
        .get_or_init(|| Regex::new(r"</?p>").expect("Failed to compile paragraph tag regex"))
}

fn empty_paragraph_regex() -> &'static Regex {
    EMPTY_PARAGRAPH_REGEX.get_or_init(|| {
        Regex::new(r"<p>\s*(?:<br/>\s*)?</p>").expect("Failed to compile empty paragraph regex")
    })
}

fn excess_breaks_regex() -> &'static Regex {
    EXCESS_BREAKS_REGEX
        .get_or_init(|| Regex::new(r"(?:<br/>){3,}").expect("Failed to compile line break regex"))
}

fn paragraph_gap_regex() -> &'static Regex {
    PARAGRAPH_GAP_REGEX
        .get_or_init(|| Regex::new(r"</p>\s*<p>").expect("Failed to compile paragraph gap regex"))
}

fn trailing_breaks_regex() -> &'static Regex {
    TRAILING_BREAKS_REGEX.get_or_init(|| {
        Regex::new(r"(?:\s*<br/>)+\s*$").expect("Failed to compile trailing break regex")
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Paragraphs and Line Breaks
// ─────────────────────────────────────────────────────────────────────────────

/// Turn blank-line runs into paragraph boundaries and single newlines into
/// `<br/>`, leaving `<pre>` blocks untouched.
///
/// The result is wrapped in `<p>` unless it already starts with markup or a
/// placeholder token.
pub fn compose_paragraphs(text: &str) -> String {
    let mut composed = String::with_capacity(text.len() + text.len() / 8);
    let mut last = 0;

    for pre in pre_block_regex().find_iter(text) {
        composed.push_str(&convert_line_breaks(&text[last..pre.start()]));
        composed.push_str(pre.as_str());
        last = pre.end();
    }
    composed.push_str(&convert_line_breaks(&text[last..]));

    if composed.starts_with('<') || composed.starts_with(MARKER) {
        composed
    } else {
        format!("<p>{}</p>", composed)
    }
}

fn convert_line_breaks(text: &str) -> String {
    paragraph_break_regex()
        .replace_all(text, "</p><p>")
        .replace('\n', "<br/>")
}

// ─────────────────────────────────────────────────────────────────────────────
// Cleanup
// ─────────────────────────────────────────────────────────────────────────────

/// Final tidy-up of the fully restored markup.
pub fn clean_up(markup: &str) -> String {
    let markup = break_before_block_regex().replace_all(markup, "${1}");
    let markup = balance_paragraphs(&markup);
    let markup = empty_paragraph_regex().replace_all(&markup, "");
    let markup = excess_breaks_regex().replace_all(&markup, "<br/><br/>");
    let markup = paragraph_gap_regex().replace_all(&markup, "</p><p>");
    // A block token is always followed by a newline; at the end it breaks nothing
    let markup = trailing_breaks_regex().replace(&markup, "");
    markup.trim().to_string()
}

/// Drop `</p>` tags that close nothing and close a paragraph left open.
///
/// Paragraph boundaries are emitted blindly as `</p><p>`, so when the text
/// was not wrapped (it started with a heading, say) the first boundary
/// closes a paragraph that was never opened.
fn balance_paragraphs(markup: &str) -> String {
    let mut balanced = String::with_capacity(markup.len() + 4);
    let mut open = 0usize;
    let mut last = 0;

    for tag in paragraph_tag_regex().find_iter(markup) {
        balanced.push_str(&markup[last..tag.start()]);
        last = tag.end();

        if tag.as_str() == "<p>" {
            open += 1;
            balanced.push_str("<p>");
        } else if open > 0 {
            open -= 1;
            balanced.push_str("</p>");
        }
    }
    balanced.push_str(&markup[last..]);

    for _ in 0..open {
        balanced.push_str("</p>");
    }
    balanced
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
