//! Raw clue schema and normalization into the canonical [`ClueEntry`] model.
//!
//! The source JSON is heterogeneous: records may or may not carry a parse
//! tree, tooltip data, or a definition object, and individual fields inside
//! those may be null or absent. Deserialization therefore defaults every
//! field, and normalization is a total function: malformed or missing data
//! degrades to empty values instead of failing the record.

use crate::clue_kind::UNKNOWN_KIND;
use fancy_regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Splits a double-definition text into its alternative definitions:
/// `;`, `,`, or the literal word ` and ` (case-insensitive).
pub(crate) static DEF_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[;,]| and ").unwrap());

/// One raw clue record as it appears in the source JSON.
///
/// Every field is defaulted so that a record carrying only `answer` and
/// `clue` still deserializes. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawClue {
    pub answer: String,
    pub clue: String,
    pub parse: Option<RawParse>,
    #[serde(rename = "indicatorsUsed")]
    pub indicators_used: Vec<RawIndicator>,
    pub definition: Option<RawDefinition>,
    pub tooltips: Option<RawTooltips>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParse {
    /// Wordplay category tag, e.g. "anagram" or "double definition".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub parts: Vec<RawPart>,
}

/// One node of the parse tree. A part is either a literal (text taken
/// verbatim into the wordplay), a letter selection (carrying `base`), or an
/// indicator wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPart {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: Option<RawSource>,
    pub base: Option<String>,
    pub indicator: Option<RawIndicator>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSource {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndicator {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDefinition {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTooltips {
    /// Free-text description of the clue type, e.g. "All about anagrams".
    #[serde(rename = "clueType")]
    pub clue_type: Option<String>,
    pub components: Vec<RawComponent>,
}

/// Tooltip text attached to a parse part, matched on `for == part.id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawComponent {
    #[serde(rename = "for")]
    pub for_id: String,
    pub text: String,
}

/// Canonical, immutable clue model produced once per raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueEntry {
    /// Original-case answer; may contain spaces (word boundaries for the grid).
    pub answer: String,
    /// The surface text to annotate.
    pub clue_text: String,
    /// Lower-cased category tag; never empty, defaults to "unknown".
    pub clue_kind: String,
    /// One or more literal definition phrases. Two or more phrases means
    /// multi-definition mode.
    pub definition_spans: Vec<String>,
    /// Indicator phrases, deduplicated, first-seen order.
    pub indicator_words: Vec<String>,
    /// Wordplay building blocks in parse order; only non-empty derived texts.
    pub fodder_words: Vec<String>,
    /// One entry per parse part, empty text included. Fodder tooltips are
    /// looked up by fodder position into this list, so the length asymmetry
    /// with `fodder_words` is load-bearing.
    pub parts: Vec<CluePart>,
}

/// A parse part reduced to what annotation needs: its text and its tooltip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CluePart {
    pub text: String,
    pub hint: String,
}

impl ClueEntry {
    /// True when the entry carries alternative definitions (double-definition
    /// clues that split cleanly).
    #[must_use]
    pub fn has_multiple_definitions(&self) -> bool {
        self.definition_spans.len() >= 2
    }

    /// Character count of each whitespace-separated answer word, in order.
    /// "SEA DOG" -> [3, 3].
    #[must_use]
    pub fn word_lengths(&self) -> Vec<usize> {
        self.answer
            .split_whitespace()
            .map(|w| w.chars().count())
            .collect()
    }

    /// Standard enumeration display, e.g. "(3,3)".
    #[must_use]
    pub fn enumeration(&self) -> String {
        let lengths: Vec<String> = self
            .word_lengths()
            .iter()
            .map(ToString::to_string)
            .collect();
        format!("({})", lengths.join(","))
    }
}

impl From<&RawClue> for ClueEntry {
    fn from(raw: &RawClue) -> Self {
        let clue_kind = resolve_kind(raw);
        let definition_spans = extract_definitions(raw, &clue_kind);
        let indicator_words = collect_indicators(raw);
        let (fodder_words, parts) = collect_parts(raw);
        Self {
            answer: raw.answer.clone(),
            clue_text: raw.clue.clone(),
            clue_kind,
            definition_spans,
            indicator_words,
            fodder_words,
            parts,
        }
    }
}

/// Clue-kind resolution chain: `parse.type`, else the 3rd whitespace token of
/// the tooltip title with one trailing `s` stripped, else "unknown".
///
/// The trailing-`s` strip is a pluralization heuristic inherited from the
/// source data ("All about anagrams" -> "anagram"). Titles with fewer than
/// three tokens fall through to "unknown".
fn resolve_kind(raw: &RawClue) -> String {
    if let Some(parse) = &raw.parse
        && let Some(kind) = parse.kind.as_deref()
        && !kind.is_empty()
    {
        return kind.to_lowercase();
    }
    if let Some(tooltips) = &raw.tooltips
        && let Some(title) = tooltips.clue_type.as_deref()
        && let Some(token) = title.split_whitespace().nth(2)
    {
        let kind = token.to_lowercase();
        let kind = kind.strip_suffix('s').unwrap_or(&kind);
        if !kind.is_empty() {
            return kind.to_string();
        }
    }
    UNKNOWN_KIND.to_string()
}

/// Definition phrases for the entry. Double-definition clues split their
/// text into alternatives; everything else keeps at most the single phrase.
fn extract_definitions(raw: &RawClue, kind: &str) -> Vec<String> {
    let text = raw
        .definition
        .as_ref()
        .and_then(|d| d.text.as_deref())
        .unwrap_or("");
    if text.is_empty() {
        return Vec::new();
    }
    if kind.starts_with("double") {
        let pieces: Vec<String> = DEF_SPLIT_RE
            .split(text)
            .filter_map(Result::ok)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if pieces.len() >= 2 {
            return pieces;
        }
    }
    vec![text.to_string()]
}

/// Indicator phrases from the parse tree followed by `indicatorsUsed`,
/// deduplicated with first-seen order preserved.
fn collect_indicators(raw: &RawClue) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    if let Some(parse) = &raw.parse {
        for part in &parse.parts {
            if let Some(indicator) = &part.indicator
                && let Some(text) = indicator.text.as_deref()
                && !text.is_empty()
            {
                words.push(text.to_string());
            }
        }
    }
    for indicator in &raw.indicators_used {
        if let Some(text) = indicator.text.as_deref()
            && !text.is_empty()
        {
            words.push(text.to_string());
        }
    }
    let mut seen = HashSet::new();
    words.retain(|w| seen.insert(w.clone()));
    words
}

/// Builds `fodder_words` and `parts` from one walk over the parse tree.
///
/// Both lists come from the same iteration but filter differently: every
/// part produces a `CluePart`, while only non-empty texts enter the fodder
/// list. Collapsing the two would shift the highlight-to-hint alignment.
fn collect_parts(raw: &RawClue) -> (Vec<String>, Vec<CluePart>) {
    let mut fodder = Vec::new();
    let mut parts = Vec::new();
    let Some(parse) = &raw.parse else {
        return (fodder, parts);
    };
    for part in &parse.parts {
        let text = derived_text(part);
        let hint = hint_for(raw.tooltips.as_ref(), &part.id);
        if !text.is_empty() {
            fodder.push(text.clone());
        }
        parts.push(CluePart { text, hint });
    }
    (fodder, parts)
}

/// Text a part contributes to the wordplay, by priority: a literal part's
/// source text, else the letter-selection `base`, else any source text,
/// else empty.
fn derived_text(part: &RawPart) -> String {
    let source_text = part
        .source
        .as_ref()
        .and_then(|s| s.text.as_deref())
        .unwrap_or("");
    if part.kind == "literal" && !source_text.is_empty() {
        return source_text.to_string();
    }
    if let Some(base) = part.base.as_deref()
        && !base.is_empty()
    {
        return base.to_string();
    }
    source_text.to_string()
}

/// Tooltip component text for a part id, empty when no component matches.
fn hint_for(tooltips: Option<&RawTooltips>, part_id: &str) -> String {
    tooltips
        .map(|t| t.components.as_slice())
        .unwrap_or_default()
        .iter()
        .find(|c| c.for_id == part_id)
        .map(|c| c.text.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawClue {
        serde_json::from_value(value).unwrap()
    }

    fn entry(value: serde_json::Value) -> ClueEntry {
        ClueEntry::from(&raw(value))
    }

    #[test]
    fn test_bare_record_degrades_to_defaults() {
        let e = entry(json!({"answer": "ABACUS", "clue": "Counting frame (6)"}));
        assert_eq!(e.clue_kind, "unknown");
        assert!(e.definition_spans.is_empty());
        assert!(e.indicator_words.is_empty());
        assert!(e.fodder_words.is_empty());
        assert!(e.parts.is_empty());
        assert_eq!(e.answer, "ABACUS");
        assert_eq!(e.clue_text, "Counting frame (6)");
    }

    #[test]
    fn test_kind_from_parse_type_is_lowercased() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "Anagram", "parts": []}
        }));
        assert_eq!(e.clue_kind, "anagram");
    }

    #[test]
    fn test_kind_from_tooltip_title_third_token_strips_plural() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "tooltips": {"clueType": "All about anagrams"}
        }));
        assert_eq!(e.clue_kind, "anagram");
    }

    #[test]
    fn test_kind_tooltip_title_too_short_falls_back() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "tooltips": {"clueType": "Just anagrams"}
        }));
        assert_eq!(e.clue_kind, "unknown");
    }

    #[test]
    fn test_kind_empty_parse_type_falls_through_to_tooltip() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "", "parts": []},
            "tooltips": {"clueType": "All about charades"}
        }));
        assert_eq!(e.clue_kind, "charade");
    }

    #[test]
    fn test_kind_parse_type_wins_over_tooltip() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "hidden", "parts": []},
            "tooltips": {"clueType": "All about anagrams"}
        }));
        assert_eq!(e.clue_kind, "hidden");
    }

    #[test]
    fn test_double_definition_splits_on_semicolon() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "double definition", "parts": []},
            "definition": {"text": "a tree; a plant"}
        }));
        assert_eq!(e.definition_spans, vec!["a tree", "a plant"]);
        assert!(e.has_multiple_definitions());
    }

    #[test]
    fn test_double_definition_splits_on_comma_and_word_and() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "double", "parts": []},
            "definition": {"text": "sprint, small tear AND a stocking flaw"}
        }));
        assert_eq!(
            e.definition_spans,
            vec!["sprint", "small tear", "a stocking flaw"]
        );
    }

    #[test]
    fn test_double_definition_single_piece_stays_single() {
        // No separator in the text: multi mode needs at least two pieces.
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "double definition", "parts": []},
            "definition": {"text": "one lonely meaning"}
        }));
        assert_eq!(e.definition_spans, vec!["one lonely meaning"]);
        assert!(!e.has_multiple_definitions());
    }

    #[test]
    fn test_non_double_kind_keeps_definition_whole() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "anagram", "parts": []},
            "definition": {"text": "first; second"}
        }));
        assert_eq!(e.definition_spans, vec!["first; second"]);
    }

    #[test]
    fn test_missing_definition_yields_no_spans() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "double definition", "parts": []}
        }));
        assert!(e.definition_spans.is_empty());
    }

    #[test]
    fn test_indicators_concatenate_parse_then_used() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "anagram", "parts": [
                {"id": "p1", "type": "anagram", "indicator": {"text": "mixed"}},
                {"id": "p2", "type": "literal", "source": {"text": "rats"}}
            ]},
            "indicatorsUsed": [{"text": "wildly"}, {"text": "mixed"}]
        }));
        assert_eq!(e.indicator_words, vec!["mixed", "wildly"]);
    }

    #[test]
    fn test_indicator_dedup_preserves_first_seen_order() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "indicatorsUsed": [
                {"text": "around"}, {"text": "about"}, {"text": "around"}
            ]
        }));
        assert_eq!(e.indicator_words, vec!["around", "about"]);
    }

    #[test]
    fn test_fodder_priority_literal_source_then_base_then_any_source() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "charade", "parts": [
                {"id": "p1", "type": "literal", "source": {"text": "CAT"}},
                {"id": "p2", "type": "first-letters", "base": "new", "source": {"text": "ignored-by-base"}},
                {"id": "p3", "type": "container", "source": {"text": "HOLD"}}
            ]}
        }));
        assert_eq!(e.fodder_words, vec!["CAT", "new", "HOLD"]);
    }

    #[test]
    fn test_empty_part_kept_in_parts_but_not_fodder() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "charade", "parts": [
                {"id": "p1", "type": "literal", "source": {"text": "CAT"}},
                {"id": "p2", "type": "link"},
                {"id": "p3", "type": "literal", "source": {"text": "NAP"}}
            ]}
        }));
        assert_eq!(e.fodder_words, vec!["CAT", "NAP"]);
        assert_eq!(e.parts.len(), 3);
        assert_eq!(e.parts[1], CluePart::default());
    }

    #[test]
    fn test_part_hints_match_on_component_for_id() {
        let e = entry(json!({
            "answer": "A", "clue": "x",
            "parse": {"type": "charade", "parts": [
                {"id": "p1", "type": "literal", "source": {"text": "CAT"}},
                {"id": "p2", "type": "literal", "source": {"text": "NAP"}}
            ]},
            "tooltips": {"components": [
                {"for": "p2", "text": "a short sleep"}
            ]}
        }));
        assert_eq!(e.parts[0].hint, "");
        assert_eq!(e.parts[1].hint, "a short sleep");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let r = raw(json!({
            "answer": "CAT NAP", "clue": "Feline rest (3,3)",
            "parse": {"type": "charade", "parts": [
                {"id": "p1", "type": "literal", "source": {"text": "CAT"}},
                {"id": "p2", "type": "literal", "source": {"text": "NAP"}}
            ]},
            "definition": {"text": "rest"}
        }));
        assert_eq!(ClueEntry::from(&r), ClueEntry::from(&r));
    }

    #[test]
    fn test_cat_nap_end_to_end_normalization() {
        let e = entry(json!({
            "answer": "CAT NAP", "clue": "Feline rest (3,3)",
            "parse": {"type": "charade", "parts": [
                {"id": "p1", "type": "literal", "source": {"text": "CAT"}},
                {"id": "p2", "type": "literal", "source": {"text": "NAP"}}
            ]},
            "definition": {"text": "rest"}
        }));
        assert_eq!(e.clue_kind, "charade");
        assert_eq!(e.definition_spans, vec!["rest"]);
        assert_eq!(e.fodder_words, vec!["CAT", "NAP"]);
        assert_eq!(e.parts.len(), 2);
        assert_eq!(e.parts[0].text, "CAT");
        assert_eq!(e.parts[0].hint, "");
    }

    #[test]
    fn test_word_lengths_and_enumeration() {
        let e = entry(json!({"answer": "SEA DOG", "clue": "x"}));
        assert_eq!(e.word_lengths(), vec![3, 3]);
        assert_eq!(e.enumeration(), "(3,3)");

        let single = entry(json!({"answer": "ABACUS", "clue": "x"}));
        assert_eq!(single.word_lengths(), vec![6]);
        assert_eq!(single.enumeration(), "(6)");
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn test_null_fields_degrade() {
            let e = entry(json!({
                "answer": "A", "clue": "x",
                "parse": null,
                "definition": null,
                "tooltips": null
            }));
            assert_eq!(e.clue_kind, "unknown");
            assert!(e.definition_spans.is_empty());
        }

        #[test]
        fn test_empty_definition_text_counts_as_absent() {
            let e = entry(json!({
                "answer": "A", "clue": "x",
                "definition": {"text": ""}
            }));
            assert!(e.definition_spans.is_empty());
        }

        #[test]
        fn test_empty_indicator_texts_dropped() {
            let e = entry(json!({
                "answer": "A", "clue": "x",
                "indicatorsUsed": [{"text": ""}, {}, {"text": "hidden in"}]
            }));
            assert_eq!(e.indicator_words, vec!["hidden in"]);
        }

        #[test]
        fn test_split_pieces_are_trimmed_and_empties_dropped() {
            let e = entry(json!({
                "answer": "A", "clue": "x",
                "parse": {"type": "double", "parts": []},
                "definition": {"text": " ; lead ,  follow ; "}
            }));
            assert_eq!(e.definition_spans, vec!["lead", "follow"]);
        }

        #[test]
        fn test_and_inside_word_does_not_split() {
            let e = entry(json!({
                "answer": "A", "clue": "x",
                "parse": {"type": "double", "parts": []},
                "definition": {"text": "Highland dance"}
            }));
            assert_eq!(e.definition_spans, vec!["Highland dance"]);
        }

        #[test]
        fn test_tooltip_token_that_is_only_s_falls_back() {
            let e = entry(json!({
                "answer": "A", "clue": "x",
                "tooltips": {"clueType": "a b s"}
            }));
            assert_eq!(e.clue_kind, "unknown");
        }

        #[test]
        fn test_unknown_json_fields_ignored() {
            let e = entry(json!({
                "answer": "A", "clue": "x",
                "difficulty": 5,
                "setter": "Araucaria"
            }));
            assert_eq!(e.answer, "A");
        }
    }
}
