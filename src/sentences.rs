use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MIN_SENTENCE_CHARS;
use crate::models::Sentence;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static TERMINATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("static regex"));

/// Collapse whitespace runs to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Split a document body into sentences longer than `min_chars` characters.
pub fn extract_sentences_with(text: &str, min_chars: usize) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    TERMINATOR_RE
        .split(&normalized)
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .map(str::to_string)
        .collect()
}

pub fn extract_sentences(text: &str) -> Vec<String> {
    extract_sentences_with(text, MIN_SENTENCE_CHARS)
}

/// Flatten per-document sentences into one ordered list tagged with the owning document.
pub fn flatten(by_doc: &[Vec<String>]) -> Vec<Sentence> {
    by_doc
        .iter()
        .enumerate()
        .flat_map(|(doc, sentences)| {
            sentences.iter().map(move |text| Sentence {
                text: text.clone(),
                doc,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminator_runs_and_drops_short_fragments() {
        let text = "Solar capacity doubled over the decade!!! Yes. \
                    Grid operators remain cautious about storage?! Ok";
        let got = extract_sentences(text);
        assert_eq!(
            got,
            vec![
                "Solar capacity doubled over the decade".to_string(),
                "Grid operators remain cautious about storage".to_string(),
            ]
        );
    }

    #[test]
    fn collapses_internal_whitespace() {
        let text = "The   committee\n\tpublished its findings\r\n yesterday.";
        assert_eq!(
            extract_sentences(text),
            vec!["The committee published its findings yesterday".to_string()]
        );
    }

    #[test]
    fn boundary_length_is_exclusive() {
        // exactly 20 chars is dropped, 21 is kept
        assert!(extract_sentences("abcdefghij abcdefghi.").is_empty());
        assert_eq!(extract_sentences("abcdefghij abcdefghij.").len(), 1);
    }

    #[test]
    fn short_unpunctuated_text_yields_nothing() {
        assert!(extract_sentences("too short to count").is_empty());
        assert!(extract_sentences("").is_empty());
        assert!(extract_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 21 and 20 chars, both well over 20 bytes
        assert_eq!(extract_sentences("éééééééééé éééééééééé").len(), 1);
        assert!(extract_sentences("ééééééééé éééééééééé").is_empty());
    }

    #[test]
    fn flatten_keeps_document_order() {
        let by_doc = vec![
            vec!["first doc sentence".to_string()],
            vec![],
            vec!["third a".to_string(), "third b".to_string()],
        ];
        let flat = flatten(&by_doc);
        assert_eq!(flat.iter().map(|s| s.doc).collect::<Vec<_>>(), vec![0, 2, 2]);
        assert_eq!(flat[2].text, "third b");
    }
}
