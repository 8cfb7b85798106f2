//! Code protection stage
//!
//! Fenced blocks are extracted first, then inline spans in whatever text is
//! left. Both are escaped and wrapped here, so nothing downstream ever sees
//! their raw content.

use super::escape::escape_entities;
use super::placeholder::{PlaceholderKind, PlaceholderTable};
use super::MarkupOptions;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static FENCED_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
static INLINE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn fenced_block_regex() -> &'static Regex {
    FENCED_BLOCK_REGEX.get_or_init(|| {
        Regex::new(r"(?s)```(.*?)```").expect("Failed to compile fenced block regex")
    })
}

fn inline_code_regex() -> &'static Regex {
    INLINE_CODE_REGEX
        .get_or_init(|| Regex::new(r"`([^`]+)`").expect("Failed to compile inline code regex"))
}

/// Replace fenced blocks and inline spans with placeholder tokens.
pub fn protect_code(text: &str, table: &mut PlaceholderTable, options: &MarkupOptions) -> String {
    let text = fenced_block_regex().replace_all(text, |caps: &Captures| {
        let code = caps[1].trim_matches('\n');
        table.protect(PlaceholderKind::CodeBlock, render_code_block(code))
    });

    inline_code_regex()
        .replace_all(&text, |caps: &Captures| {
            table.protect(
                PlaceholderKind::InlineCode,
                render_inline_code(&caps[1], &options.inline_code_background),
            )
        })
        .into_owned()
}

fn render_code_block(code: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_entities(code))
}

fn render_inline_code(code: &str, background: &str) -> String {
    format!(
        "<span style=\"font-family: monospace; background-color: {};\">&nbsp;{}&nbsp;</span>",
        background,
        escape_entities(code)
    )
}
