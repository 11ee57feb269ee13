use crate::Query;

/// How strongly a sentence relates to the query, best class first.
///
/// Matching is whole-word on whitespace-split tokens, case-insensitive.
/// No substring or stemmed matching: "pythonic" does not match "python".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermMatch {
    /// Every query term appears in the sentence.
    AllTerms,
    /// At least one query term appears.
    AnyTerm,
    /// No query term appears, but at least one synonym does.
    AnySynonym,
    /// Nothing matches.
    None,
}

fn lower_tokens(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Whole-word containment of `needle` in `tokens`. Multi-word synonyms
/// (e.g. "operating system") match as a contiguous token run.
fn contains_phrase(tokens: &[String], needle: &str) -> bool {
    let words: Vec<&str> = needle.split_whitespace().collect();
    match words.as_slice() {
        [] => false,
        [w] => tokens.iter().any(|t| t == w),
        ws => tokens
            .windows(ws.len())
            .any(|win| win.iter().zip(ws).all(|(t, w)| t == w)),
    }
}

/// Classify `sentence` against `query`. The result is independent of
/// query-term order, and synonym membership is only consulted once the
/// plain term checks have failed.
pub fn classify(sentence: &str, query: &Query) -> TermMatch {
    let tokens = lower_tokens(sentence);
    if tokens.is_empty() {
        return TermMatch::None;
    }

    let mut any = false;
    let mut all = true;
    for term in query.terms() {
        if contains_phrase(&tokens, term) {
            any = true;
        } else {
            all = false;
        }
    }
    if all {
        return TermMatch::AllTerms;
    }
    if any {
        return TermMatch::AnyTerm;
    }

    if query
        .synonym_set()
        .iter()
        .any(|syn| contains_phrase(&tokens, syn))
    {
        return TermMatch::AnySynonym;
    }
    TermMatch::None
}
