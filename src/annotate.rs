//! Span annotation of clue text.
//!
//! Three passes run in fixed precedence order over the original clue text:
//! definitions, then indicators, then fodder. Each pass claims byte ranges;
//! later passes search around ranges already claimed, so an earlier category
//! is never re-wrapped. Only the first free occurrence of a phrase is
//! claimed, and a phrase that cannot be located anywhere is skipped without
//! error.

use crate::clue::ClueEntry;
use crate::clue_kind::{indicator_hint, primary_token};
use fancy_regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Tooltip for a fodder word whose parse part carries no hint of its own.
const FODDER_FALLBACK: &str = "Fodder — used to build the answer.";

/// Tooltip for a single-phrase definition.
const DEFINITION_TOOLTIP: &str = "Definition";

/// Compiled-pattern cache. Indicator and fodder words repeat heavily across
/// a clue set, so each distinct pattern is compiled once per process.
///
/// The `Mutex` makes the map usable from a shared static; patterns are
/// compiled outside the lock and re-checked before insert, and a poisoned
/// lock degrades to compile-without-caching.
static PATTERN_CACHE: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

fn get_regex(pattern: &str) -> Result<Regex, Box<fancy_regex::Error>> {
    let cache = PATTERN_CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Ok(guard) = cache.lock()
        && let Some(re) = guard.get(pattern).cloned()
    {
        return Ok(re);
    }

    let compiled = Regex::new(pattern)?;

    if let Ok(mut guard) = cache.lock() {
        if let Some(existing) = guard.get(pattern).cloned() {
            return Ok(existing);
        }
        guard.insert(pattern.to_string(), compiled.clone());
    }
    Ok(compiled)
}

/// Which pass produced a span. Serialized lowercase for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanCategory {
    Definition,
    Indicator,
    Fodder,
}

impl SpanCategory {
    /// CSS-friendly category name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Indicator => "indicator",
            Self::Fodder => "fodder",
        }
    }
}

/// One piece of the annotated clue text, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Plain {
        text: String,
    },
    Span {
        text: String,
        tooltip: String,
        category: SpanCategory,
    },
}

/// Annotated rendering of one clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedClue {
    /// Primary clue-kind token ("double definition" -> "double"); renderers
    /// key their visual theme off this.
    pub kind: String,
    pub segments: Vec<Segment>,
}

impl AnnotatedClue {
    /// Markup rendering for consumers that want a single HTML string.
    /// Span categories become `clue-*` classes, tooltips become `title`
    /// attributes, and all text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        use std::fmt::Write;

        let mut html = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain { text } => html.push_str(&escape_html(text)),
                Segment::Span {
                    text,
                    tooltip,
                    category,
                } => {
                    let _ = write!(
                        html,
                        r#"<span class="clue-{}" title="{}">{}</span>"#,
                        category.as_str(),
                        escape_html(tooltip),
                        escape_html(text)
                    );
                }
            }
        }
        html
    }
}

/// A byte range of the clue text owned by one span, plus its presentation.
struct Claim {
    start: usize,
    end: usize,
    tooltip: String,
    category: SpanCategory,
}

/// Annotate a normalized clue. Total: phrases that cannot be placed are
/// dropped, never errors.
#[must_use]
pub fn annotate(entry: &ClueEntry) -> AnnotatedClue {
    let text = entry.clue_text.as_str();
    let mut claims: Vec<Claim> = Vec::new();

    // 1. Definitions. Multi-definition phrases may span several words, so
    //    they match as literal substrings; a lone definition anchors on word
    //    boundaries.
    if entry.has_multiple_definitions() {
        for (i, phrase) in entry.definition_spans.iter().enumerate() {
            let tooltip = format!("Double definition — meaning {}", i + 1);
            claim_first(
                text,
                &literal_pattern(phrase),
                tooltip,
                SpanCategory::Definition,
                &mut claims,
            );
        }
    } else if let Some(phrase) = entry.definition_spans.first() {
        claim_first(
            text,
            &word_pattern(phrase),
            DEFINITION_TOOLTIP.to_string(),
            SpanCategory::Definition,
            &mut claims,
        );
    }

    // 2. Indicators, all sharing the kind-table hint.
    for word in &entry.indicator_words {
        claim_first(
            text,
            &word_pattern(word),
            indicator_hint(&entry.clue_kind).to_string(),
            SpanCategory::Indicator,
            &mut claims,
        );
    }

    // 3. Fodder. The hint comes from the part at the same fodder position.
    for (i, word) in entry.fodder_words.iter().enumerate() {
        let hint = entry.parts.get(i).map_or("", |p| p.hint.as_str());
        let tooltip = if hint.is_empty() {
            FODDER_FALLBACK.to_string()
        } else {
            hint.to_string()
        };
        claim_first(
            text,
            &word_pattern(word),
            tooltip,
            SpanCategory::Fodder,
            &mut claims,
        );
    }

    claims.sort_by_key(|c| c.start);
    AnnotatedClue {
        kind: primary_token(&entry.clue_kind).to_string(),
        segments: build_segments(text, claims),
    }
}

/// Case-insensitive literal-substring pattern.
fn literal_pattern(phrase: &str) -> String {
    format!("(?i){}", fancy_regex::escape(phrase))
}

/// Case-insensitive word-boundary pattern.
fn word_pattern(phrase: &str) -> String {
    format!(r"(?i)\b{}\b", fancy_regex::escape(phrase))
}

/// Claim the first occurrence of `pattern` that does not overlap an existing
/// claim. Failure to place is expected (inflected clue text) and only logged.
fn claim_first(
    text: &str,
    pattern: &str,
    tooltip: String,
    category: SpanCategory,
    claims: &mut Vec<Claim>,
) {
    match get_regex(pattern) {
        Ok(re) => {
            if let Some((start, end)) = find_unclaimed(text, &re, claims) {
                claims.push(Claim {
                    start,
                    end,
                    tooltip,
                    category,
                });
            } else {
                log::debug!("no free occurrence of {pattern} in clue text, skipping");
            }
        }
        Err(e) => {
            // Patterns are built from escaped literals and should always compile.
            debug_assert!(false, "annotation pattern failed to compile: {e}");
        }
    }
}

/// First match of `re` in `text` whose range is disjoint from every claim.
fn find_unclaimed(text: &str, re: &Regex, claims: &[Claim]) -> Option<(usize, usize)> {
    let mut pos = 0;
    while pos <= text.len() {
        let m = match re.find_from_pos(text, pos) {
            Ok(Some(m)) => m,
            _ => return None,
        };
        if claims
            .iter()
            .any(|c| m.start() < c.end && c.start < m.end())
        {
            pos = next_search_pos(text, m.start());
            continue;
        }
        return Some((m.start(), m.end()));
    }
    None
}

/// Position one character past `match_start`, staying on a char boundary.
/// Returns past-the-end when no character remains, which ends the scan.
fn next_search_pos(text: &str, match_start: usize) -> usize {
    text[match_start..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| match_start + c.len_utf8())
}

/// Stitch sorted, disjoint claims and the gaps between them into segments.
fn build_segments(text: &str, claims: Vec<Claim>) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for claim in claims {
        if claim.start > cursor {
            segments.push(Segment::Plain {
                text: text[cursor..claim.start].to_string(),
            });
        }
        segments.push(Segment::Span {
            text: text[claim.start..claim.end].to_string(),
            tooltip: claim.tooltip,
            category: claim.category,
        });
        cursor = claim.end;
    }
    if cursor < text.len() {
        segments.push(Segment::Plain {
            text: text[cursor..].to_string(),
        });
    }
    segments
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
