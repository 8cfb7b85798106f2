//! User settings for md2rich
//!
//! This module defines the `Settings` struct holding every user-configurable
//! option, with serde support for JSON persistence.

use crate::markup::MarkupOptions;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have defaults via the `Default` trait and `#[serde(default)]`, so a
/// partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Markup
    // ─────────────────────────────────────────────────────────────────────────
    /// Colors and prologue of the generated markup
    pub markup: MarkupOptions,

    // ─────────────────────────────────────────────────────────────────────────
    // Output
    // ─────────────────────────────────────────────────────────────────────────
    /// Wrap output in a complete HTML document instead of a bare fragment
    pub standalone: bool,

    /// Title used for standalone documents read from stdin
    pub document_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            markup: MarkupOptions::default(),
            standalone: false,
            document_title: String::from(Self::DEFAULT_DOCUMENT_TITLE),
        }
    }
}

impl Settings {
    /// Title used when none is configured.
    pub const DEFAULT_DOCUMENT_TITLE: &'static str = "Converted Document";

    // ─────────────────────────────────────────────────────────────────────────
    // Validation and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Sanitize settings by resetting invalid values to their defaults.
    ///
    /// Colors end up verbatim inside markup attributes, so anything that is
    /// not a plain hex color is rejected.
    pub fn sanitize(&mut self) {
        if !is_hex_color(&self.markup.inline_code_background) {
            self.markup.inline_code_background =
                MarkupOptions::DEFAULT_INLINE_CODE_BACKGROUND.to_string();
        }

        if !is_hex_color(&self.markup.blockquote_color) {
            self.markup.blockquote_color = MarkupOptions::DEFAULT_BLOCKQUOTE_COLOR.to_string();
        }

        let title = self.document_title.trim();
        if title.is_empty() {
            self.document_title = String::from(Self::DEFAULT_DOCUMENT_TITLE);
        } else if title.len() != self.document_title.len() {
            self.document_title = title.to_string();
        }
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

/// `#RGB`, `#RGBA`, `#RRGGBB` or `#AARRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.markup, MarkupOptions::default());
        assert!(settings.markup.emit_style_prologue);
        assert!(!settings.standalone);
        assert_eq!(settings.document_title, "Converted Document");
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = Settings {
            standalone: true,
            document_title: "Notes".to_string(),
            ..Settings::default()
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r##"{"markup": {"blockquote_color": "#ffffff"}}"##;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.markup.blockquote_color, "#ffffff");
        // Everything else falls back to defaults, nested fields included
        assert_eq!(
            settings.markup.inline_code_background,
            MarkupOptions::DEFAULT_INLINE_CODE_BACKGROUND
        );
        assert!(settings.markup.emit_style_prologue);
        assert!(!settings.standalone);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"standalone": true, "future_feature": 3}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(settings.standalone);
    }

    #[test]
    fn test_wrong_types_rejected() {
        let result: Result<Settings, _> = serde_json::from_str(r#"{"standalone": "yes"}"#);
        assert!(result.is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sanitization tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#FFFA"));
        assert!(is_hex_color("#a0a0a0"));
        assert!(is_hex_color("#30FFFFFF"));

        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ff"));
        assert!(!is_hex_color("#gggggg"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color("#fff\" onclick=\"x"));
    }

    #[test]
    fn test_sanitize_invalid_colors() {
        let mut settings = Settings::default();
        settings.markup.inline_code_background = "transparent".to_string();
        settings.markup.blockquote_color = "#12\"".to_string();
        settings.sanitize();

        assert_eq!(
            settings.markup.inline_code_background,
            MarkupOptions::DEFAULT_INLINE_CODE_BACKGROUND
        );
        assert_eq!(
            settings.markup.blockquote_color,
            MarkupOptions::DEFAULT_BLOCKQUOTE_COLOR
        );
    }

    #[test]
    fn test_sanitize_keeps_valid_colors() {
        let mut settings = Settings::default();
        settings.markup.blockquote_color = "#336699".to_string();
        settings.sanitize();
        assert_eq!(settings.markup.blockquote_color, "#336699");
    }

    #[test]
    fn test_sanitize_title() {
        let mut settings = Settings::default();
        settings.document_title = "   ".to_string();
        settings.sanitize();
        assert_eq!(settings.document_title, Settings::DEFAULT_DOCUMENT_TITLE);

        settings.document_title = "  Weekly notes ".to_string();
        settings.sanitize();
        assert_eq!(settings.document_title, "Weekly notes");
    }

    #[test]
    fn test_from_json_sanitized() {
        let json = r#"{"markup": {"inline_code_background": "blue"}, "document_title": ""}"#;
        let settings = Settings::from_json_sanitized(json).unwrap();
        assert_eq!(
            settings.markup.inline_code_background,
            MarkupOptions::DEFAULT_INLINE_CODE_BACKGROUND
        );
        assert_eq!(settings.document_title, Settings::DEFAULT_DOCUMENT_TITLE);
    }
}
