//! Markdown to rich-text markup conversion
//!
//! Converts a restricted Markdown dialect into the small tag set that
//! rich-text widgets understand (`p`, `br`, `b`, `i`, `h1`-`h3`, `a`, `pre`,
//! `span`, `ul`/`ol`/`li`, `blockquote`, `font`).
//!
//! # Pipeline
//!
//! The conversion is a fixed sequence of whole-string rewrites:
//!
//! 1. normalize line endings, strip the placeholder marker byte
//! 2. protect fenced blocks and inline code ([`code`])
//! 3. escape `&`, `<`, `>` ([`escape`])
//! 4. headings, emphasis, links ([`rules::INLINE_MARKUP`])
//! 5. protect lists, then blockquotes ([`blocks`])
//! 6. auto-link bare URLs ([`rules::AUTOLINKS`])
//! 7. restore code
//! 8. paragraphs and line breaks ([`compose`])
//! 9. restore lists and blockquotes, clean up, prepend the style prologue
//!
//! Protected fragments wait in a [`PlaceholderTable`] that is created for a
//! single call and dropped when it returns.
//!
//! # Example
//! ```
//! use md2rich::markdown_to_markup;
//!
//! let markup = markdown_to_markup("Some **bold** text");
//! assert!(markup.ends_with("<p>Some <b>bold</b> text</p>"));
//! ```

mod blocks;
mod code;
mod compose;
mod escape;
mod placeholder;
pub mod rules;
mod style;

pub use escape::escape_entities;
pub use placeholder::{PlaceholderKind, PlaceholderTable, MARKER};
pub use style::STYLE_PROLOGUE;

use log::debug;
use rules::{AUTOLINKS, INLINE_MARKUP};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Tunable parts of the generated markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    /// Background of inline code spans. `#AARRGGBB` is understood by Qt.
    pub inline_code_background: String,

    /// Text color inside blockquotes
    pub blockquote_color: String,

    /// Whether to prepend the `<style>` prologue
    pub emit_style_prologue: bool,
}

impl MarkupOptions {
    /// Default inline code background (about 19% white, for dark themes).
    pub const DEFAULT_INLINE_CODE_BACKGROUND: &'static str = "#30FFFFFF";
    /// Default blockquote text color.
    pub const DEFAULT_BLOCKQUOTE_COLOR: &'static str = "#a0a0a0";
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            inline_code_background: Self::DEFAULT_INLINE_CODE_BACKGROUND.to_string(),
            blockquote_color: Self::DEFAULT_BLOCKQUOTE_COLOR.to_string(),
            emit_style_prologue: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Converter
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown to markup converter.
///
/// Holds only immutable options, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct MarkupConverter {
    options: MarkupOptions,
}

impl MarkupConverter {
    pub fn new(options: MarkupOptions) -> Self {
        Self { options }
    }

    /// Convert Markdown text to markup.
    ///
    /// Never fails: constructs that do not parse stay in the output as
    /// escaped literal text. Empty input yields an empty string, without the
    /// style prologue.
    pub fn convert(&self, markdown: &str) -> String {
        let text = normalize_input(markdown);
        if text.is_empty() {
            return String::new();
        }

        let mut table = PlaceholderTable::new();

        let text = code::protect_code(&text, &mut table, &self.options);
        let text = escape_entities(&text);
        let text = INLINE_MARKUP.apply(&text);
        let text = blocks::protect_lists(&text, &mut table);
        let text = blocks::protect_blockquotes(&text, &mut table, &self.options);
        let text = AUTOLINKS.apply(&text);

        let text = table.restore(&text, PlaceholderKind::code());
        let text = compose::compose_paragraphs(&text);
        let text = table.restore(&text, &[PlaceholderKind::Structural]);
        // Code tokens that travelled inside list items or quotes
        let text = table.restore(&text, PlaceholderKind::code());
        let markup = compose::clean_up(&text);

        debug!(
            "Converted {} bytes of Markdown into {} bytes of markup ({} code blocks, {} inline spans, {} lists/quotes)",
            markdown.len(),
            markup.len(),
            table.len(PlaceholderKind::CodeBlock),
            table.len(PlaceholderKind::InlineCode),
            table.len(PlaceholderKind::Structural),
        );

        if self.options.emit_style_prologue {
            format!("{}{}", STYLE_PROLOGUE, markup)
        } else {
            markup
        }
    }
}

/// Convert Markdown to markup with the default options.
pub fn markdown_to_markup(markdown: &str) -> String {
    MarkupConverter::default().convert(markdown)
}

/// Normalize line endings to `\n` and remove the placeholder marker byte.
fn normalize_input(markdown: &str) -> String {
    markdown
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(MARKER, "")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Convert and strip the prologue.
    fn body(markdown: &str) -> String {
        let markup = markdown_to_markup(markdown);
        markup
            .strip_prefix(STYLE_PROLOGUE)
            .expect("output should start with the style prologue")
            .to_string()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Basics
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(markdown_to_markup(""), "");
        assert_eq!(markdown_to_markup("\u{0}"), "");
    }

    #[test]
    fn test_non_empty_output_starts_with_prologue() {
        for input in ["x", "# h", "- a", "```\ncode\n```", "   "] {
            assert!(markdown_to_markup(input).starts_with(STYLE_PROLOGUE));
        }
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(body("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn test_prologue_can_be_disabled() {
        let converter = MarkupConverter::new(MarkupOptions {
            emit_style_prologue: false,
            ..MarkupOptions::default()
        });
        assert_eq!(converter.convert("Hello"), "<p>Hello</p>");
        assert_eq!(converter.convert(""), "");
    }

    #[test]
    fn test_documented_example() {
        let out = body("# Title\n\nSome *text* with `code` and a [link](http://x).");

        assert!(out.starts_with(r#"<h1><font size="6">Title</font></h1>"#));
        assert!(out.contains("<p>Some <i>text</i> with "));
        assert!(out.contains("&nbsp;code&nbsp;</span>"));
        assert!(out.contains(r#"<a href="http://x">link</a>"#));
        assert!(out.ends_with(".</p>"));
        assert!(!out.contains("</h1></p>"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Escaping
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_text_entities_escaped() {
        assert_eq!(body("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_code_entities_escaped_exactly_once() {
        let out = body("```\n<div> & </div>\n```\n\nand `a<b`");

        assert!(out.contains("<pre><code>&lt;div&gt; &amp; &lt;/div&gt;</code></pre>"));
        assert!(out.contains("&nbsp;a&lt;b&nbsp;"));
        assert!(!out.contains("&amp;lt;"));
        assert!(!out.contains("&amp;amp;"));
    }

    #[test]
    fn test_marker_byte_in_input_is_dropped() {
        assert_eq!(body("a\u{0}CODEBLOCK0\u{0}b"), "<p>aCODEBLOCK0b</p>");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(body("a\r\n\r\nb\r\nc"), "<p>a</p><p>b<br/>c</p>");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ordering invariants
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_structural_markers_inside_fence_stay_verbatim() {
        let out = body("```\n- not a list\n> not a quote\n1. nor this\n# nor a heading\n```");

        assert_eq!(
            out,
            "<pre><code>- not a list\n&gt; not a quote\n1. nor this\n# nor a heading</code></pre>"
        );
        assert!(!out.contains("<ul>"));
        assert!(!out.contains("<blockquote>"));
        assert!(!out.contains("<h1>"));
    }

    #[test]
    fn test_emphasis_markers_inside_inline_code_untouched() {
        let out = body("call `a*b*c` now");
        assert!(out.contains("&nbsp;a*b*c&nbsp;"));
        assert!(!out.contains("<i>"));
    }

    #[test]
    fn test_bold_italic_is_single_element() {
        assert_eq!(body("***both***"), "<b><i>both</i></b>");
        assert_eq!(
            body("so ***very*** much"),
            "<p>so <b><i>very</i></b> much</p>"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists and blockquotes
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_list_consolidation() {
        let out = body("- one\n- two\n- three");
        assert_eq!(out, "<ul><li>one</li><li>two</li><li>three</li></ul>");
        assert_eq!(out.matches("<li>").count(), 3);
        assert!(!out.contains("<br/>"));
    }

    #[test]
    fn test_list_after_paragraph() {
        // The blank lines around the list are absorbed by item tagging and
        // the run merge, so the list sits inside the surrounding paragraph
        assert_eq!(
            body("Intro\n\n- a\n- b\n\nOutro"),
            "<p>Intro<ul><li>a</li><li>b</li></ul><br/>Outro</p>"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            body("1. first\n2. second"),
            "<ol><li>first</li><li>second</li></ol>"
        );
    }

    #[test]
    fn test_inline_code_inside_list_item_restored() {
        let out = body("- run `cargo doc`\n- done");
        assert!(out.starts_with("<ul><li>run <span"));
        assert!(out.contains("&nbsp;cargo doc&nbsp;</span></li><li>done</li></ul>"));
        assert!(!out.contains(MARKER));
    }

    #[test]
    fn test_blockquote_consolidation() {
        let out = body("> first\n> second");
        assert!(out.starts_with(
            "<blockquote><font color=\"#a0a0a0\"><i>first<br/>second</i></font></blockquote>"
        ));
        assert_eq!(out.matches("<blockquote>").count(), 1);
        assert!(!out.contains("</p><p>"));
    }

    #[test]
    fn test_blank_line_between_quotes_merges_them() {
        assert_eq!(
            body("> a\n\n> b"),
            "<blockquote><font color=\"#a0a0a0\"><i>a<br/>b</i></font></blockquote>"
        );
    }

    #[test]
    fn test_formatting_inside_blockquote() {
        let out = body("> a **bold** claim");
        assert!(out.contains("<i>a <b>bold</b> claim</i>"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bare_url_autolinked() {
        assert_eq!(
            body("visit https://example.com today"),
            r#"<p>visit <a href="https://example.com">https://example.com</a> today</p>"#
        );
    }

    #[test]
    fn test_markdown_link_not_double_wrapped() {
        let out = body("[site](https://example.com)");
        assert_eq!(out.matches("<a href").count(), 1);
    }

    #[test]
    fn test_url_next_to_inline_code_keeps_code() {
        let out = body("https://x.org`code`");
        assert!(out.contains(r#"<a href="https://x.org">https://x.org</a>"#));
        assert!(out.contains("&nbsp;code&nbsp;"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Degraded input
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_unbalanced_constructs_stay_literal() {
        let out = body("``` open fence and [broken](link");
        assert_eq!(out, "<p>``` open fence and [broken](link</p>");
    }

    #[test]
    fn test_trailing_blank_lines_leave_no_empty_paragraph() {
        assert_eq!(body("first\n\n\n"), "<p>first</p>");
        assert_eq!(
            body("# Title\n\n"),
            r#"<h1><font size="6">Title</font></h1>"#
        );
    }

    #[test]
    fn test_whitespace_only_input_has_empty_body() {
        assert_eq!(body("  \n\n  "), "");
    }

    #[test]
    fn test_converter_is_reusable() {
        let converter = MarkupConverter::default();
        let first = converter.convert("- a\n\n`x`");
        let second = converter.convert("- a\n\n`x`");
        assert_eq!(first, second);
    }
}
