//! Rule-based sentence segmentation.
//!
//! Splits on `.`, `!`, `?` followed by whitespace, with guards for
//! common abbreviations and decimal points. English-oriented, like the
//! rest of the tokenization in this workspace.

/// Lowercased abbreviations that a trailing period does not terminate.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "vs", "etc", "e.g", "i.e", "fig", "no", "inc", "jr",
    "sr",
];

fn is_abbreviation(prev_word: &str) -> bool {
    let w = prev_word.trim_start_matches(['(', '"', '\'']).to_lowercase();
    ABBREVIATIONS.contains(&w.as_str())
}

/// Segment `text` into trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;

    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if matches!(c, '.' | '!' | '?') {
            // Swallow terminator runs ("..." / "?!").
            let mut end = i + 1;
            while end < chars.len() && matches!(chars[end], '.' | '!' | '?') {
                end += 1;
            }

            let followed_by_space = end >= chars.len() || chars[end].is_whitespace();
            let decimal_point = c == '.'
                && end == i + 1
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && end < chars.len()
                && chars[end].is_ascii_digit();

            let prev_word: String = chars[start..i]
                .iter()
                .collect::<String>()
                .split_whitespace()
                .last()
                .unwrap_or("")
                .to_string();

            if followed_by_space && !decimal_point && !(c == '.' && is_abbreviation(&prev_word)) {
                let sentence: String = chars[start..end].iter().collect();
                let sentence = sentence.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = end;
            }
            i = end;
        } else {
            i += 1;
        }
    }

    let tail: String = chars[start..].iter().collect();
    let tail = tail.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}
