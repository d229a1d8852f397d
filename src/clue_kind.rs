//! Clue-kind vocabulary: the category tags a normalized clue can carry and the
//! fixed per-category indicator hints shown when an indicator word is highlighted.

/// Category tags with a dedicated indicator hint. Anything else falls back to
/// the generic "Indicator" tooltip.
pub(crate) const KNOWN_KINDS: [&str; 11] = [
    "anagram",
    "hidden",
    "container",
    "reversal",
    "deletion",
    "homophone",
    "acrostic",
    "spoonerism",
    "charade",
    "double",
    "lit",
];

/// Kind assigned when a raw record carries no usable type information.
pub(crate) const UNKNOWN_KIND: &str = "unknown";

/// First whitespace-delimited token of a kind string ("double definition" -> "double").
///
/// The renderer keys its visual theme off this token, and the indicator-hint
/// table is keyed off it too.
#[must_use]
pub(crate) fn primary_token(kind: &str) -> &str {
    kind.split_whitespace().next().unwrap_or("")
}

/// Tooltip text for an indicator word, chosen by the clue's primary kind token.
#[must_use]
pub(crate) fn indicator_hint(kind: &str) -> &'static str {
    match primary_token(kind).to_ascii_lowercase().as_str() {
        "anagram" => "Anagram indicator — rearrange the letters of the fodder.",
        "hidden" => "Hidden-word indicator — the answer is concealed inside the clue.",
        "container" => "Container indicator — put one piece inside another.",
        "reversal" => "Reversal indicator — read the fodder backwards.",
        "deletion" => "Deletion indicator — remove letters from the fodder.",
        "homophone" => "Homophone indicator — the answer sounds like the fodder.",
        "acrostic" => "Acrostic indicator — take initial letters from the fodder.",
        "spoonerism" => "Spoonerism indicator — swap the opening sounds.",
        "charade" => "Charade link — the answer is built from parts in order.",
        "double" => "Signals that both halves of the clue define the answer.",
        "lit" => "&lit marker — the whole clue is definition and wordplay at once.",
        _ => "Indicator",
    }
}
