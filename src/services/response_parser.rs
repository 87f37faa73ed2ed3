//! Tag-delimited response parsing.
//!
//! Total and idempotent: any raw text — empty, tagless, tags in the wrong
//! order — yields a [`MoveCandidate`] with absent fields. Absent is the
//! normal representation of "the model did not comply with the output
//! contract" and must not be conflated with an error.

use crate::domain::models::MoveCandidate;

/// Extract a move candidate from raw completion text.
///
/// The move is the first `<move>…</move>` span, newline-stripped and
/// trimmed; the justification is the first `<reason>…</reason>` span,
/// cleaned the same way. Empty spans count as absent.
pub fn parse(raw: &str) -> MoveCandidate {
    MoveCandidate {
        san: extract_tag(raw, "move")
            .as_deref()
            .map(clean)
            .filter(|s| !s.is_empty()),
        justification: extract_tag(raw, "reason")
            .as_deref()
            .map(clean)
            .filter(|s| !s.is_empty()),
    }
}

/// The whole cleaned text, used as the justification for providers that
/// answered without explicit reason tagging.
pub fn whole_text_justification(raw: &str) -> Option<String> {
    let cleaned = clean(raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

fn extract_tag(raw: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = raw.find(&open)? + open.len();
    let end = raw[start..].find(&close)? + start;
    Some(raw[start..end].to_string())
}

fn clean(text: &str) -> String {
    text.replace('\n', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_move_and_reason() {
        let candidate = parse("<move>e4</move><reason>central control</reason>");
        assert_eq!(candidate.san.as_deref(), Some("e4"));
        assert_eq!(candidate.justification.as_deref(), Some("central control"));
    }

    #[test]
    fn strips_newlines_inside_tags() {
        let candidate = parse("<move>\ne4\n</move>");
        assert_eq!(candidate.san.as_deref(), Some("e4"));
    }

    #[test]
    fn missing_tags_yield_absent_fields() {
        let candidate = parse("I think pawn to e4 is strong here.");
        assert_eq!(candidate, MoveCandidate::default());
    }

    #[test]
    fn empty_input_yields_absent_fields() {
        assert_eq!(parse(""), MoveCandidate::default());
    }

    #[test]
    fn tags_in_wrong_order_yield_absent_move() {
        let candidate = parse("</move>e4<move>");
        assert!(candidate.san.is_none());
    }

    #[test]
    fn empty_span_counts_as_absent() {
        let candidate = parse("<move></move>");
        assert!(candidate.san.is_none());
    }

    #[test]
    fn parsing_is_idempotent_on_extracted_text() {
        let first = parse("<move>e4</move>");
        let again = parse("<move>e4</move>");
        assert_eq!(first, again);
    }

    #[test]
    fn whole_text_fallback_cleans_and_rejects_empty() {
        assert_eq!(
            whole_text_justification("a solid\nopening move  "),
            Some("a solidopening move".to_string())
        );
        assert_eq!(whole_text_justification("  \n "), None);
    }
}
