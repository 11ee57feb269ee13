use crate::matcher::{classify, TermMatch};
use crate::Query;
use std::collections::HashSet;

/// Walk `candidates` in order and keep every sentence whose match class
/// is enabled, de-duplicated by exact string equality.
///
/// This is a deliberate single-pass, encounter-order policy: selected
/// sentences keep their original document order, with no second pass
/// that re-sorts by match class. A weakly-matching sentence early in the
/// document therefore precedes a strongly-matching one later on.
pub fn select_sentences<I, S>(candidates: I, query: &Query, use_synonyms: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selected: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for candidate in candidates {
        let sentence = candidate.as_ref();
        let keep = match classify(sentence, query) {
            TermMatch::AllTerms | TermMatch::AnyTerm => true,
            TermMatch::AnySynonym => use_synonyms,
            TermMatch::None => false,
        };
        if keep && seen.insert(sentence.to_string()) {
            selected.push(sentence.to_string());
        }
    }
    selected
}
