//! Document export for md2rich
//!
//! Thin I/O layer around the converter: produces either the bare markup
//! fragment a rich-text widget consumes, or a minimal standalone HTML
//! document for previewing that fragment in a browser.

mod document;

pub use document::{
    export_to_markup_file, generate_markup_document, generate_markup_fragment, generate_output,
};
