//! List and blockquote consolidation
//!
//! Item lines are first tagged by the rules in [`super::rules`]. Each run of
//! consecutive tagged lines is then merged into one container, parked in the
//! structural sub-table and replaced by a single token followed by a newline.
//! This has to happen before line-break composition, which would otherwise
//! scatter `<br/>` elements between the items.

use super::placeholder::{PlaceholderKind, PlaceholderTable};
use super::rules::{BLOCKQUOTE_LINES, LIST_ITEMS};
use super::MarkupOptions;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static UNORDERED_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static ORDERED_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static BLOCKQUOTE_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static BLOCKQUOTE_JOIN_REGEX: OnceLock<Regex> = OnceLock::new();

fn unordered_run_regex() -> &'static Regex {
    UNORDERED_RUN_REGEX.get_or_init(|| {
        Regex::new(r"(?s)(?:<li_ul>.*?</li_ul>\s*)+")
            .expect("Failed to compile unordered list regex")
    })
}

fn ordered_run_regex() -> &'static Regex {
    ORDERED_RUN_REGEX.get_or_init(|| {
        Regex::new(r"(?s)(?:<li_ol>.*?</li_ol>\s*)+").expect("Failed to compile ordered list regex")
    })
}

fn blockquote_run_regex() -> &'static Regex {
    BLOCKQUOTE_RUN_REGEX.get_or_init(|| {
        Regex::new(r"(?s)(?:<bq_line>.*?</bq_line>\s*)+")
            .expect("Failed to compile blockquote regex")
    })
}

fn blockquote_join_regex() -> &'static Regex {
    BLOCKQUOTE_JOIN_REGEX.get_or_init(|| {
        Regex::new(r"</bq_line>\s*<bq_line>").expect("Failed to compile blockquote join regex")
    })
}

/// List flavour, selecting the intermediate item tag and the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn item_tag(&self) -> &'static str {
        match self {
            ListKind::Unordered => "li_ul",
            ListKind::Ordered => "li_ol",
        }
    }

    fn container(&self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }

    fn run_regex(&self) -> &'static Regex {
        match self {
            ListKind::Unordered => unordered_run_regex(),
            ListKind::Ordered => ordered_run_regex(),
        }
    }
}

/// Tag list items, then merge unordered runs followed by ordered runs.
pub fn protect_lists(text: &str, table: &mut PlaceholderTable) -> String {
    let text = LIST_ITEMS.apply(text);
    let text = consolidate_list(&text, ListKind::Unordered, table);
    consolidate_list(&text, ListKind::Ordered, table)
}

fn consolidate_list(text: &str, kind: ListKind, table: &mut PlaceholderTable) -> String {
    let open = format!("<{}>", kind.item_tag());
    let close = format!("</{}>", kind.item_tag());

    kind.run_regex()
        .replace_all(text, |caps: &Captures| {
            let items = caps[0]
                .replace(&open, "<li>")
                .replace(&close, "</li>")
                .replace('\n', "");
            let block = format!("<{0}>{1}</{0}>", kind.container(), items);
            format!("{}\n", table.protect(PlaceholderKind::Structural, block))
        })
        .into_owned()
}

/// Tag blockquote lines and merge each run into one styled blockquote.
pub fn protect_blockquotes(
    text: &str,
    table: &mut PlaceholderTable,
    options: &MarkupOptions,
) -> String {
    let text = BLOCKQUOTE_LINES.apply(text);

    blockquote_run_regex()
        .replace_all(&text, |caps: &Captures| {
            let joined = blockquote_join_regex().replace_all(&caps[0], "<br/>");
            let inner = joined
                .replace("<bq_line>", "")
                .replace("</bq_line>", "");
            let block = format!(
                "<blockquote><font color=\"{}\"><i>{}</i></font></blockquote>",
                options.blockquote_color,
                inner.trim()
            );
            format!("{}\n", table.protect(PlaceholderKind::Structural, block))
        })
        .into_owned()
}
