//! Ordered rewrite rules
//!
//! Every pattern-to-template rewrite of the structural stage lives here as
//! data. Within a [`RuleSet`] rules run strictly in declaration order, each
//! one over the whole working string. The order is a precedence contract:
//! more specific patterns come before the patterns they contain, so
//! `***x***` is consumed whole before `**` or `*` get a chance at it.
//!
//! Replacement templates use `${n}` capture references.

use regex::Regex;
use std::sync::OnceLock;

/// A single regex rewrite.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    /// Short identifier, used in logs and tests
    pub name: &'static str,
    pattern: &'static str,
    replacement: &'static str,
}

impl RewriteRule {
    const fn new(name: &'static str, pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern,
            replacement,
        }
    }
}

/// An ordered list of rules whose regexes are compiled on first use.
pub struct RuleSet {
    rules: &'static [RewriteRule],
    compiled: OnceLock<Vec<Regex>>,
}

impl RuleSet {
    const fn new(rules: &'static [RewriteRule]) -> Self {
        Self {
            rules,
            compiled: OnceLock::new(),
        }
    }

    fn compiled(&self) -> &[Regex] {
        self.compiled.get_or_init(|| {
            self.rules
                .iter()
                .map(|rule| {
                    Regex::new(rule.pattern).unwrap_or_else(|e| {
                        panic!("Failed to compile rewrite rule '{}': {}", rule.name, e)
                    })
                })
                .collect()
        })
    }

    /// Rule names in application order.
    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }

    /// Apply every rule, in order, to the whole text.
    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (rule, regex) in self.rules.iter().zip(self.compiled()) {
            text = regex.replace_all(&text, rule.replacement).into_owned();
        }
        text
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rule Tables
// ─────────────────────────────────────────────────────────────────────────────

/// Headings, emphasis and links. Runs right after entity escaping.
pub static INLINE_MARKUP: RuleSet = RuleSet::new(&[
    // Headings, deepest first
    RewriteRule::new(
        "heading3",
        r"(?m)^### (.*)$",
        r#"<h3><font size="4">${1}</font></h3>"#,
    ),
    RewriteRule::new(
        "heading2",
        r"(?m)^## (.*)$",
        r#"<h2><font size="5">${1}</font></h2>"#,
    ),
    RewriteRule::new(
        "heading1",
        r"(?m)^# (.*)$",
        r#"<h1><font size="6">${1}</font></h1>"#,
    ),
    // Emphasis: triple, then double, then single delimiters
    RewriteRule::new(
        "bold_italic_star",
        r"\*\*\*(.*?)\*\*\*",
        "<b><i>${1}</i></b>",
    ),
    RewriteRule::new("bold_italic_underscore", r"___(.*?)___", "<b><i>${1}</i></b>"),
    RewriteRule::new("bold_star", r"\*\*(.*?)\*\*", "<b>${1}</b>"),
    RewriteRule::new("bold_underscore", r"__(.*?)__", "<b>${1}</b>"),
    RewriteRule::new("italic_star", r"\*(.*?)\*", "<i>${1}</i>"),
    RewriteRule::new("italic_underscore", r"_(.*?)_", "<i>${1}</i>"),
    // [text](url)
    RewriteRule::new(
        "link",
        r"\[([^\]]+)\]\(([^)]+)\)",
        r#"<a href="${2}">${1}</a>"#,
    ),
]);

/// Tags list item lines with intermediate per-item tags.
pub static LIST_ITEMS: RuleSet = RuleSet::new(&[
    RewriteRule::new(
        "unordered_item",
        r"(?m)^\s*[*-] (.*)$",
        "<li_ul>${1}</li_ul>",
    ),
    RewriteRule::new(
        "ordered_item",
        r"(?m)^\s*\d+\. (.*)$",
        "<li_ol>${1}</li_ol>",
    ),
]);

/// Tags blockquote lines. `>` has already been escaped at this point.
pub static BLOCKQUOTE_LINES: RuleSet = RuleSet::new(&[RewriteRule::new(
    "blockquote_line",
    r"(?m)^&gt; (.*)$",
    "<bq_line>${1}</bq_line>",
)]);

/// Wraps bare URLs in anchors.
///
/// A URL right after `"`, `'` or `>` already sits inside generated markup
/// and is skipped. The character before the URL is consumed and written
/// back unchanged. URLs stop at whitespace, `<` and the placeholder marker.
pub static AUTOLINKS: RuleSet = RuleSet::new(&[RewriteRule::new(
    "bare_url",
    r#"(^|[^"'>])((?:https?|file)://[^\s<\x00]+)"#,
    r#"${1}<a href="${2}">${2}</a>"#,
)]);

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
