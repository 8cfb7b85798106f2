//! md2rich - Markdown to rich-text markup
//!
//! Converts a small Markdown dialect (as written by chat assistants) into
//! the HTML subset understood by rich-text widgets such as Qt's
//! `QTextBrowser`. Code spans and blocks are protected from every later
//! rewrite by placeholder tokens, so their contents come out escaped but
//! otherwise untouched.
//!
//! ```
//! let markup = md2rich::markdown_to_markup("Run `cargo fmt` first");
//! assert!(markup.contains("&nbsp;cargo fmt&nbsp;"));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod markup;

pub use error::{Error, Result};
pub use markup::{markdown_to_markup, MarkupConverter, MarkupOptions};
