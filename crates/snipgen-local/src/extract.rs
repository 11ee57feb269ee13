//! HTML to [`PageTextBundle`] extraction.
//!
//! Deliberately "good enough" rather than a full readability engine: the
//! snippet strategies only need a meta description, paragraph texts, and
//! sentence-segmented body text.

use crate::sentences::split_sentences;
use snipgen_core::PageTextBundle;
use std::io::Cursor;

/// Minimum words for a paragraph to count as candidate text.
pub const MIN_PARAGRAPH_WORDS: usize = 5;

/// Width used when rendering HTML to text; only affects line wrapping,
/// which whitespace normalization then erases.
const RENDER_WIDTH: usize = 100;

/// Replace each run of non-ASCII characters with a single space and drop
/// embedded newlines. Applied to snippet-bound text so the word-level
/// matching and the report stay in the query's tokenization language.
pub fn ascii_clean(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_non_ascii = false;
    for ch in s.chars() {
        if ch == '\n' || ch == '\r' {
            continue;
        }
        if ch.is_ascii() {
            out.push(ch);
            in_non_ascii = false;
        } else if !in_non_ascii {
            out.push(' ');
            in_non_ascii = true;
        }
    }
    out
}

fn norm_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn meta_description(doc: &html_scraper::Html) -> Option<String> {
    let sel = html_scraper::Selector::parse(r#"meta[name="description"]"#).ok()?;
    let content = doc
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))?;
    let cleaned = norm_ws(&ascii_clean(content));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn paragraphs(doc: &html_scraper::Html) -> Vec<String> {
    let Ok(sel) = html_scraper::Selector::parse("p") else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(|p| norm_ws(&ascii_clean(&p.text().collect::<String>())))
        .filter(|p| p.split_whitespace().count() >= MIN_PARAGRAPH_WORDS)
        .collect()
}

/// Parse an HTML document into the text bundle the strategies consume.
/// Never fails: malformed HTML degrades to an emptier bundle.
pub fn page_bundle(html: &str) -> PageTextBundle {
    let doc = html_scraper::Html::parse_document(html);

    let meta_description = meta_description(&doc);
    let paragraphs = paragraphs(&doc);

    // html2text handles boilerplate-ish markup better than raw text-node
    // concatenation (scripts and styles do not leak into the body text).
    let rendered =
        html2text::from_read(Cursor::new(html.as_bytes()), RENDER_WIDTH).unwrap_or_default();
    let body_text = norm_ws(&ascii_clean(&rendered));
    let sentences = split_sentences(&body_text);

    PageTextBundle {
        meta_description,
        paragraphs,
        body_text,
        sentences,
    }
}
