//! Error types for constraint compilation and link indexing, with error codes and helpful
//! messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (C001-C004) for documentation lookup:
//!
//! - C001: `UnpairedLinkTags` (Link tags that do not appear exactly twice)
//! - C002: `InvalidCharacter` (Character outside the constraint alphabet)
//! - C003: `EmptyConstraint` (Empty constraint string)
//! - C004: `NoConstraints` (No constraints at all)
//!
//! Every one of these is raised while compiling the constraint text, so a bad constraint set
//! is reported before the word list is ever looked at.
//!
//! # Examples
//!
//! ```
//! use crossing::cluster::Cluster;
//! use crossing::errors::ConfigurationError;
//!
//! match Cluster::from_constraints(&["A1B", "C2D"]) {
//!     Err(e) => {
//!         assert_eq!(e.code(), "C001");
//!         println!("Error: {}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!("tags 1 and 2 each appear once"),
//! }
//! # let _ = ConfigurationError::NoConstraints;
//! ```

use crate::links::TagCount;

/// A constraint set that cannot be searched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Link tags do not appear in pairs: {}", format_tag_counts(.tags))]
    UnpairedLinkTags { tags: Vec<TagCount> },

    #[error("Invalid character '{invalid_char}' at position {position} of slot {slot}")]
    InvalidCharacter {
        slot: usize,
        position: usize,
        invalid_char: char,
    },

    #[error("Empty constraint for slot {slot}")]
    EmptyConstraint { slot: usize },

    #[error("No constraints given")]
    NoConstraints,
}

fn format_tag_counts(tags: &[TagCount]) -> String {
    tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl ConfigurationError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ConfigurationError::UnpairedLinkTags { .. } => "C001",
            ConfigurationError::InvalidCharacter { .. } => "C002",
            ConfigurationError::EmptyConstraint { .. } => "C003",
            ConfigurationError::NoConstraints => "C004",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ConfigurationError::UnpairedLinkTags { .. } => "Link tags that do not appear exactly twice",
            ConfigurationError::InvalidCharacter { .. } => "Character outside the constraint alphabet",
            ConfigurationError::EmptyConstraint { .. } => "Empty constraint string",
            ConfigurationError::NoConstraints => "No constraints at all",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ConfigurationError::UnpairedLinkTags { .. } => "Each digit 0-9 marks one crossing square, so it must appear in exactly two positions across the constraint set. Every offending tag is listed with the number of times it was found.",
            ConfigurationError::InvalidCharacter { .. } => "Constraints may only contain letters, the wildcard '*' (or '.'), and the link digits 0-9.",
            ConfigurationError::EmptyConstraint { .. } => "A slot needs at least one square. An empty constraint usually comes from a stray separator.",
            ConfigurationError::NoConstraints => "The constraint set is empty, so there are no slots to fill.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ConfigurationError::UnpairedLinkTags { .. } => Some("Use each digit exactly twice, e.g. 'T**3*' and 'W3**' share tag 3"),
            ConfigurationError::InvalidCharacter { .. } => Some("Replace the character with a letter, '*' or a digit 0-9"),
            ConfigurationError::EmptyConstraint { .. } => Some("Remove the empty constraint or give it at least one square, e.g. '*****'"),
            ConfigurationError::NoConstraints => Some("Give one constraint per slot, e.g. 'T**3*;W3**'"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
