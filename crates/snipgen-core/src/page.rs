use serde::{Deserialize, Serialize};

/// Plain-text view of one fetched page, as produced by the page
/// fetch/parse collaborator.
///
/// A failed fetch maps to `PageTextBundle::default()`: every downstream
/// strategy then degrades to the degenerate snippet instead of aborting
/// the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTextBundle {
    /// `<meta name="description">` content, if the page carries one.
    pub meta_description: Option<String>,
    /// Paragraph texts in document order; each has at least five words.
    pub paragraphs: Vec<String>,
    /// Readable body text.
    pub body_text: String,
    /// Body text segmented into sentences, in document order.
    pub sentences: Vec<String>,
}

impl PageTextBundle {
    pub fn is_empty(&self) -> bool {
        self.meta_description.is_none()
            && self.paragraphs.is_empty()
            && self.body_text.trim().is_empty()
    }

    /// Sentences considered by the query-dependent page strategies: the
    /// page's sentences with the meta description appended as a
    /// pseudo-sentence (it often holds exactly the query-relevant text).
    pub fn candidate_sentences(&self) -> Vec<String> {
        let mut out = self.sentences.clone();
        if let Some(desc) = self.meta_description.as_deref() {
            if !desc.trim().is_empty() {
                out.push(desc.trim().to_string());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_is_empty() {
        assert!(PageTextBundle::default().is_empty());
    }

    #[test]
    fn candidate_sentences_append_meta_description_last() {
        let b = PageTextBundle {
            meta_description: Some("A description.".to_string()),
            sentences: vec!["First.".to_string(), "Second.".to_string()],
            ..Default::default()
        };
        assert_eq!(
            b.candidate_sentences(),
            ["First.", "Second.", "A description."]
        );
    }

    #[test]
    fn blank_meta_description_is_not_a_candidate() {
        let b = PageTextBundle {
            meta_description: Some("   ".to_string()),
            sentences: vec!["Only.".to_string()],
            ..Default::default()
        };
        assert_eq!(b.candidate_sentences(), ["Only."]);
    }
}
