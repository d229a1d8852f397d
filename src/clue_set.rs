//! Loading and normalizing a clue set.
//!
//! The input is a JSON array with one object per clue, in the heterogeneous
//! export schema handled by [`crate::clue`]. This module owns the only
//! fallible step of the pipeline: getting from raw bytes to an ordered
//! `Vec<ClueEntry>`. Individual records that cannot be deserialized (not an
//! object, wrongly typed fields) are skipped with a warning so one bad
//! record never takes down the batch; only a malformed outer document or a
//! fully unusable set is an error.
//!
//! Designed to be WASM-friendly, like the rest of the crate:
//! - [`ClueSet::parse_from_str`] works everywhere, including WASM, so the
//!   browser side can `fetch()` the JSON and hand the string over.
//! - [`ClueSet::load_from_path`] is a native-only convenience wrapper.

use crate::clue::{ClueEntry, RawClue};
use crate::errors::ClueSetError;

/// A processed, ready-to-play clue set in source order.
#[derive(Debug, Clone)]
pub struct ClueSet {
    pub clues: Vec<ClueEntry>,
}

impl ClueSet {
    /// Parse a clue set from an in-memory JSON string.
    ///
    /// # Errors
    /// - [`ClueSetError::Json`] when the document is not valid JSON.
    /// - [`ClueSetError::NotAnArray`] when the top-level value is not an array.
    /// - [`ClueSetError::NoClues`] when no record survives normalization.
    pub fn parse_from_str(contents: &str) -> Result<ClueSet, ClueSetError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let serde_json::Value::Array(records) = value else {
            return Err(ClueSetError::NotAnArray {
                found: json_type_name(&value).to_string(),
            });
        };

        let total = records.len();
        let clues: Vec<ClueEntry> = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| match serde_json::from_value::<RawClue>(record) {
                Ok(raw) => Some(ClueEntry::from(&raw)),
                Err(e) => {
                    log::warn!("skipping clue record {i}: {e}");
                    None
                }
            })
            .collect();

        if clues.is_empty() {
            return Err(ClueSetError::NoClues);
        }
        log::info!("loaded {} of {} clue records", clues.len(), total);
        Ok(ClueSet { clues })
    }

    /// Native-only convenience: read a file and parse it.
    ///
    /// Not available under WebAssembly, where there is no filesystem to
    /// read from.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, or an `InvalidData`
    /// error wrapping the [`ClueSetError`] when parsing fails.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<ClueSet> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read clue set from '{}': {e}", path_ref.display()),
            )
        })?;
        Ok(Self::parse_from_str(&data)?)
    }
}

/// Human-readable JSON type for error messages, article included.
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_set() {
        let input = r#"[
            {"answer": "CAT NAP", "clue": "Feline rest (3,3)",
             "parse": {"type": "charade", "parts": []},
             "definition": {"text": "rest"}},
            {"answer": "ABACUS", "clue": "Counting frame (6)"}
        ]"#;
        let set = ClueSet::parse_from_str(input).unwrap();
        assert_eq!(set.clues.len(), 2);
        assert_eq!(set.clues[0].answer, "CAT NAP");
        assert_eq!(set.clues[0].clue_kind, "charade");
        assert_eq!(set.clues[1].clue_kind, "unknown");
    }

    #[test]
    fn test_parse_preserves_record_order() {
        let input = r#"[
            {"answer": "ONE", "clue": "1"},
            {"answer": "TWO", "clue": "2"},
            {"answer": "THREE", "clue": "3"}
        ]"#;
        let set = ClueSet::parse_from_str(input).unwrap();
        let answers: Vec<&str> = set.clues.iter().map(|c| c.answer.as_str()).collect();
        assert_eq!(answers, vec!["ONE", "TWO", "THREE"]);
    }

    #[test]
    fn test_parse_skips_non_object_records() {
        let input = r#"[
            "just a string",
            {"answer": "CAT", "clue": "Feline (3)"},
            42,
            null
        ]"#;
        let set = ClueSet::parse_from_str(input).unwrap();
        assert_eq!(set.clues.len(), 1);
        assert_eq!(set.clues[0].answer, "CAT");
    }

    #[test]
    fn test_parse_skips_records_with_wrongly_typed_fields() {
        let input = r#"[
            {"answer": 5, "clue": "bad"},
            {"answer": "CAT", "clue": "Feline (3)"}
        ]"#;
        let set = ClueSet::parse_from_str(input).unwrap();
        assert_eq!(set.clues.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = ClueSet::parse_from_str("{not json").unwrap_err();
        assert!(matches!(err, ClueSetError::Json(_)));
        assert_eq!(err.code(), "C001");
    }

    #[test]
    fn test_parse_rejects_non_array_top_level() {
        let err = ClueSet::parse_from_str(r#"{"answer": "CAT"}"#).unwrap_err();
        assert!(matches!(
            &err,
            ClueSetError::NotAnArray { found } if found == "an object"
        ));

        let err = ClueSet::parse_from_str(r#""hello""#).unwrap_err();
        assert!(matches!(
            &err,
            ClueSetError::NotAnArray { found } if found == "a string"
        ));
    }

    #[test]
    fn test_parse_empty_array_has_no_clues() {
        let err = ClueSet::parse_from_str("[]").unwrap_err();
        assert!(matches!(err, ClueSetError::NoClues));
    }

    #[test]
    fn test_parse_all_records_skipped_has_no_clues() {
        let err = ClueSet::parse_from_str(r#"[1, 2, "three"]"#).unwrap_err();
        assert!(matches!(err, ClueSetError::NoClues));
    }

    #[test]
    fn test_minimal_record_is_usable() {
        let set = ClueSet::parse_from_str(r#"[{}]"#).unwrap();
        assert_eq!(set.clues.len(), 1);
        assert_eq!(set.clues[0].answer, "");
        assert_eq!(set.clues[0].clue_kind, "unknown");
    }
}
