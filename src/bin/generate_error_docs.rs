//! Generate error code documentation from the source of truth (the error
//! enum).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ClueSetError` implementation via its `code()`,
//! `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use cluedrill::errors::ClueSetError;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            let code = error.code();
            let description = error.description();
            let details = error.details();
            let help = error.help();

            println!("### {}: {}\n", code, description);
            println!("**Details:** {}\n", details);

            if let Some(help_text) = help {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// Helper to create all `ClueSetError` variants for documentation
fn all_clue_set_error_variants() -> Vec<ClueSetError> {
    vec![
        // Json--create by parsing something that is not JSON
        ClueSetError::Json(serde_json::from_str::<serde_json::Value>("{oops").unwrap_err()),
        ClueSetError::NotAnArray {
            found: "an object".to_string(),
        },
        ClueSetError::NoClues,
        ClueSetError::ClueIndexOutOfRange {
            requested: 9,
            len: 3,
        },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Clue Set Errors (C001–C004)](#clue-set-errors)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    generate_clue_set_error_docs();

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("clue set contains no usable clue records (C003)");
    println!("Each record must be a JSON object with at least \"answer\" and \"clue\" fields");
    println!("```\n");
    println!("1. Note the error code (e.g., `C003`)");
    println!("2. Look it up in this document for detailed explanation");
    println!("3. Follow the suggested resolution steps\n");

    println!("## Error Display Formats\n");
    println!("Errors are displayed in two formats:\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```\n");
}

fn generate_clue_set_error_docs() {
    println!("## Clue Set Errors\n");
    println!("Errors from loading and validating a clue-set JSON document. Anything wrong with an individual record inside a valid array is logged and skipped instead of raised.\n");
    generate_error_docs!(all_clue_set_error_variants());
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The documentation list must cover every error code exactly once, in
    /// order. A new variant without a matching entry here would silently
    /// fall out of the generated docs.
    #[test]
    fn test_variant_list_covers_all_codes() {
        let codes: Vec<&str> = all_clue_set_error_variants()
            .iter()
            .map(ClueSetError::code)
            .collect();
        assert_eq!(codes, vec!["C001", "C002", "C003", "C004"]);
    }
}
