//! Style-sheet prologue prepended to every non-empty conversion.
//!
//! Rich-text widgets apply generous default margins to headings, paragraphs
//! and lists; these rules tighten them to something that reads well in a
//! chat bubble or note panel.

/// Fixed `<style>` block emitted ahead of the converted markup.
pub const STYLE_PROLOGUE: &str = concat!(
    "<style>",
    "h1 { margin-top: 0px; margin-bottom: 8px; }",
    "h2 { margin-top: 12px; margin-bottom: 4px; }",
    "h3 { margin-top: 8px; margin-bottom: 2px; }",
    "p { margin-top: 0px; margin-bottom: 8px; }",
    "ul, ol { margin-top: 0px; margin-bottom: 8px; }",
    "li { margin-bottom: 0px; }",
    "blockquote { margin-top: 4px; margin-bottom: 4px; }",
    "</style>",
);
