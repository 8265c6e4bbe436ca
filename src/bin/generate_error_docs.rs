//! Generate error code documentation from the source of truth (the error enum).
//!
//! Codes, descriptions, details, and help text come straight from
//! `ConfigurationError::{code, description, details, help}`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use crossing::errors::ConfigurationError;
use crossing::links::{LinkTag, TagCount};

/// One representative value per `ConfigurationError` variant, in code order
fn all_configuration_error_variants() -> Vec<ConfigurationError> {
    let tag_count = |digit: u8, count: usize| LinkTag::new(digit).map(|tag| TagCount { tag, count });

    vec![
        ConfigurationError::UnpairedLinkTags {
            tags: [tag_count(1, 1), tag_count(2, 3)].into_iter().flatten().collect(),
        },
        ConfigurationError::InvalidCharacter { slot: 1, position: 2, invalid_char: '?' },
        ConfigurationError::EmptyConstraint { slot: 0 },
        ConfigurationError::NoConstraints,
    ]
}

/// Render the whole reference document
fn render_docs() -> String {
    let mut out = String::new();
    out.push_str("# Error Code Reference\n\n");
    out.push_str("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n\n");
    out.push_str("## Configuration Errors\n\n");
    out.push_str("Raised while compiling a constraint set, before any word list is read.\n\n");

    for error in all_configuration_error_variants() {
        out.push_str(&format!("### {}: {}\n\n", error.code(), error.description()));
        out.push_str(&format!("**Details:** {}\n\n", error.details()));

        if let Some(help_text) = error.help() {
            out.push_str(&format!("**How to fix:**\n```\n{help_text}\n```\n\n"));
        }

        out.push_str(&format!("**Example error message:**\n```\n{error}\n```\n\n"));
        out.push_str(&format!("**Detailed format:**\n```\n{}\n```\n\n", error.display_detailed()));
        out.push_str("---\n\n");
    }

    out.push_str("## Error Display Formats\n\n");
    out.push_str("### Simple Format\n```\nError: <message>\n```\n\n");
    out.push_str("### Detailed Format (via `display_detailed()`)\n```\n<message> (<code>)\n<help text if available>\n```\n");
    out
}

fn main() {
    print!("{}", render_docs());
}
