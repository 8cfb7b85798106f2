//! Markup fragment and document generation

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::markup::{escape_entities, MarkupConverter, MarkupOptions};
use log::info;
use std::fs;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate the markup fragment for a rich-text widget.
pub fn generate_markup_fragment(markdown: &str, options: &MarkupOptions) -> String {
    MarkupConverter::new(options.clone()).convert(markdown)
}

/// Generate a standalone HTML document around the markup fragment.
///
/// The fragment's own `<style>` prologue stays inside the body, exactly as
/// the widget would receive it.
pub fn generate_markup_document(
    markdown: &str,
    title: Option<&str>,
    options: &MarkupOptions,
) -> String {
    let body = generate_markup_fragment(markdown, options);
    let title = title.unwrap_or(Settings::DEFAULT_DOCUMENT_TITLE);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="generator" content="md2rich">
    <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_entities(title),
        body = body,
    )
}

/// Fragment or document, as the settings ask for.
pub fn generate_output(markdown: &str, title: Option<&str>, settings: &Settings) -> String {
    if settings.standalone {
        generate_markup_document(
            markdown,
            Some(title.unwrap_or(&settings.document_title)),
            &settings.markup,
        )
    } else {
        generate_markup_fragment(markdown, &settings.markup)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Export
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a Markdown file and write the result to `output_path`.
///
/// Without an explicit `title`, standalone documents are titled after the
/// source file stem.
pub fn export_to_markup_file(
    source_path: &Path,
    output_path: &Path,
    title: Option<&str>,
    settings: &Settings,
) -> Result<()> {
    let markdown = fs::read_to_string(source_path).map_err(|e| Error::FileRead {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    let title = title.or_else(|| source_path.file_stem().and_then(|s| s.to_str()));
    let output = generate_output(&markdown, title, settings);

    fs::write(output_path, output).map_err(|e| Error::FileWrite {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    info!(
        "Exported {} to {}",
        source_path.display(),
        output_path.display()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
