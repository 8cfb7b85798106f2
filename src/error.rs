//! Error type for md2rich
//!
//! Conversion itself cannot fail: malformed Markdown degrades to escaped
//! literal text. Everything here comes from the I/O around it, meaning the
//! source and output files, stdin/stdout, and the settings file.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Input / Output
    // ─────────────────────────────────────────────────────────────────────────
    /// stdin or stdout failed
    Io(io::Error),

    /// A Markdown source could not be read
    FileRead { path: PathBuf, source: io::Error },

    /// Markup could not be written
    FileWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────
    /// The settings file could not be read
    ConfigLoad { path: PathBuf, source: io::Error },

    /// The settings file is not valid JSON for [`Settings`](crate::config::Settings)
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Settings could not be turned into JSON
    ConfigSerialize(serde_json::Error),

    /// The settings file or its directory could not be written
    ConfigSave { path: PathBuf, source: io::Error },

    /// No platform config directory (typically `HOME` unset)
    ConfigDirNotFound,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "cannot read '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "cannot write '{}': {}", path.display(), source)
            }
            Error::ConfigLoad { path, source } => {
                write!(f, "cannot read settings '{}': {}", path.display(), source)
            }
            Error::ConfigParse { path, source } => {
                write!(f, "invalid settings in '{}': {}", path.display(), source)
            }
            Error::ConfigSerialize(err) => write!(f, "cannot encode settings: {}", err),
            Error::ConfigSave { path, source } => {
                write!(f, "cannot save settings to '{}': {}", path.display(), source)
            }
            Error::ConfigDirNotFound => write!(f, "no configuration directory on this platform"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(source)
            | Error::FileRead { source, .. }
            | Error::FileWrite { source, .. }
            | Error::ConfigLoad { source, .. }
            | Error::ConfigSave { source, .. } => Some(source),
            Error::ConfigParse { source, .. } | Error::ConfigSerialize(source) => Some(source),
            Error::ConfigDirNotFound => None,
        }
    }
}

/// Fall back to a default, logging the error instead of propagating it.
pub trait ResultExt<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        self.unwrap_or_else(|err| {
            warn!("{}: {}. Using default.", context, err);
            default
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
