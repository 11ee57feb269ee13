use crate::select::select_sentences;
use crate::snippet::{truncate_snippet, Snippet};
use crate::{PageProvider, PageTextBundle, Query, Summarizer};
use serde::{Deserialize, Serialize};

/// Sentence budget for the extractive summary strategies.
pub const SUMMARY_SENTENCES: usize = 5;

/// The five snippet synthesis strategies, in their fixed run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// First 20 words of the meta description, else of the first
    /// paragraph with at least five words, else of the body text.
    PartOfPage,
    /// First 20 words of a 5-sentence extractive summary.
    PageSummary,
    /// Page sentences (plus meta description) containing query terms.
    QueryTermSentences,
    /// Like [`Strategy::QueryTermSentences`], also admitting synonyms.
    QueryTermSynonymSentences,
    /// Summary sentences containing query terms or synonyms.
    QuerySummarySentences,
}

/// Where a query-dependent strategy draws its candidate sentences from.
enum CandidateSource {
    Page,
    Summary,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::PartOfPage,
        Strategy::PageSummary,
        Strategy::QueryTermSentences,
        Strategy::QueryTermSynonymSentences,
        Strategy::QuerySummarySentences,
    ];

    pub fn number(self) -> usize {
        match self {
            Strategy::PartOfPage => 1,
            Strategy::PageSummary => 2,
            Strategy::QueryTermSentences => 3,
            Strategy::QueryTermSynonymSentences => 4,
            Strategy::QuerySummarySentences => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::PartOfPage => "part-of-page extraction",
            Strategy::PageSummary => "page summarization",
            Strategy::QueryTermSentences => "query-term sentence extraction",
            Strategy::QueryTermSynonymSentences => "query-term + synonym sentence extraction",
            Strategy::QuerySummarySentences => "query-based summary extraction",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Strategy::PartOfPage => {
                "first 20 words of the meta description, first qualifying paragraph, or body text"
            }
            Strategy::PageSummary => "first 20 words of a 5-sentence extractive summary",
            Strategy::QueryTermSentences => {
                "page sentences containing all query terms, then at least one"
            }
            Strategy::QueryTermSynonymSentences => {
                "page sentences containing query terms, then query-term synonyms"
            }
            Strategy::QuerySummarySentences => {
                "summary sentences containing query terms or their synonyms"
            }
        }
    }

    pub fn is_query_dependent(self) -> bool {
        !matches!(self, Strategy::PartOfPage | Strategy::PageSummary)
    }

    /// Strategies 3-5 differ only in candidate source and whether
    /// synonym matches are admitted.
    fn selection_params(self) -> Option<(CandidateSource, bool)> {
        match self {
            Strategy::PartOfPage | Strategy::PageSummary => None,
            Strategy::QueryTermSentences => Some((CandidateSource::Page, false)),
            Strategy::QueryTermSynonymSentences => Some((CandidateSource::Page, true)),
            Strategy::QuerySummarySentences => Some((CandidateSource::Summary, true)),
        }
    }
}

/// Drives one strategy over a URL set, one snippet per URL.
///
/// Collaborators come in by reference so tests can substitute stubs; the
/// runner itself holds no state across URLs.
pub struct StrategyRunner<'a> {
    pages: &'a dyn PageProvider,
    summarizer: &'a dyn Summarizer,
}

impl<'a> StrategyRunner<'a> {
    pub fn new(pages: &'a dyn PageProvider, summarizer: &'a dyn Summarizer) -> Self {
        Self { pages, summarizer }
    }

    /// Run `strategy` over `urls` in order. Per-URL failures (fetch,
    /// parse, summarization) degrade that URL to the degenerate snippet
    /// and never abort the remaining URLs.
    pub async fn run(&self, strategy: Strategy, query: &Query, urls: &[String]) -> Vec<Snippet> {
        let mut out = Vec::with_capacity(urls.len());
        for url in urls {
            out.push(self.snippet_for(strategy, query, url).await);
        }
        out
    }

    async fn snippet_for(&self, strategy: Strategy, query: &Query, url: &str) -> Snippet {
        let (bundle, mut warning) = match self.pages.page(url).await {
            Ok(b) => (b, None),
            Err(e) => (PageTextBundle::default(), Some(e.to_string())),
        };

        let text = match strategy.selection_params() {
            None => match strategy {
                Strategy::PartOfPage => part_of_page(&bundle),
                Strategy::PageSummary => {
                    let (sentences, warn) = self.summary_of(&bundle);
                    warning = warning.or(warn);
                    truncate_snippet(&sentences)
                }
                _ => unreachable!("selection strategies handled below"),
            },
            Some((source, use_synonyms)) => {
                let candidates = match source {
                    CandidateSource::Page => bundle.candidate_sentences(),
                    CandidateSource::Summary => {
                        let (sentences, warn) = self.summary_of(&bundle);
                        warning = warning.or(warn);
                        sentences
                    }
                };
                let selected = select_sentences(candidates, query, use_synonyms);
                truncate_snippet(&selected)
            }
        };

        Snippet {
            url: url.to_string(),
            text,
            warning,
        }
    }

    /// Summarization failure is not fatal: it degrades to "no candidate
    /// text" for that URL, same as an empty page.
    fn summary_of(&self, bundle: &PageTextBundle) -> (Vec<String>, Option<String>) {
        if bundle.body_text.trim().is_empty() {
            return (Vec::new(), None);
        }
        match self.summarizer.summarize(&bundle.body_text, SUMMARY_SENTENCES) {
            Ok(sentences) => (sentences, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        }
    }
}

/// Strategy 1's strict fallback chain: meta description, else first
/// qualifying paragraph, else body text. Exactly one source is used.
fn part_of_page(bundle: &PageTextBundle) -> String {
    if let Some(desc) = bundle.meta_description.as_deref() {
        if !desc.trim().is_empty() {
            return truncate_snippet(&[desc]);
        }
    }
    if let Some(paragraph) = bundle.paragraphs.first() {
        return truncate_snippet(&[paragraph]);
    }
    truncate_snippet(&[bundle.body_text.as_str()])
}
