//! Configuration module for md2rich
//!
//! This module handles user preferences for the generated markup,
//! including serialization/deserialization to/from JSON and
//! persistent storage in a platform-specific directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
