use crate::snippet::Snippet;
use crate::{DistanceMetric, ReferenceHit};
use serde::{Deserialize, Serialize};

/// One reference-vs-generated comparison. `distance` is `None` when the
/// metric was undefined for the pair (empty or fully out-of-vocabulary
/// token sequence on either side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub url: String,
    pub reference_snippet: String,
    pub generated_snippet: String,
    pub distance: Option<f64>,
}

/// Token preparation for the distance metric: lowercase, trim, split on
/// whitespace. No stemming, no stop-word removal; out-of-vocabulary
/// tokens are the metric's concern.
fn eval_tokens(s: &str) -> Vec<String> {
    s.trim()
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Compare each generated snippet against its reference, index-aligned
/// by URL. No aggregation: one record per URL, reported individually.
///
/// The metric comes in as a parameter so the harness stays testable with
/// a stub distance function.
pub fn evaluate(
    refs: &[ReferenceHit],
    generated: &[Snippet],
    metric: &dyn DistanceMetric,
) -> Vec<EvaluationRecord> {
    refs.iter()
        .zip(generated)
        .map(|(r, g)| {
            let ref_tokens = eval_tokens(&r.snippet);
            let gen_tokens = eval_tokens(&g.text);
            // The metric is undefined for empty input; guard here rather
            // than trusting every implementation to.
            let distance = if ref_tokens.is_empty() || gen_tokens.is_empty() {
                None
            } else {
                metric.distance(&ref_tokens, &gen_tokens).ok()
            };
            EvaluationRecord {
                url: r.url.clone(),
                reference_snippet: r.snippet.clone(),
                generated_snippet: g.text.clone(),
                distance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Result};

    /// Token-overlap stub: 0.0 for identical token sequences, growing
    /// with disagreement. Undefined when either side is all stopwords.
    struct OverlapMetric;

    impl DistanceMetric for OverlapMetric {
        fn distance(&self, a: &[String], b: &[String]) -> Result<f64> {
            if a == [String::from("...")] || b == [String::from("...")] {
                return Err(Error::Distance("no tokens in vocabulary".to_string()));
            }
            let shared = a.iter().filter(|t| b.contains(t)).count();
            Ok((a.len() + b.len()) as f64 - 2.0 * shared as f64)
        }
    }

    fn hit(url: &str, snippet: &str) -> ReferenceHit {
        ReferenceHit {
            url: url.to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn snip(url: &str, text: &str) -> Snippet {
        Snippet {
            url: url.to_string(),
            text: text.to_string(),
            warning: None,
        }
    }

    #[test]
    fn identical_snippets_score_zero() {
        let refs = vec![hit("https://a.example", "Python tutorial for beginners")];
        let gen = vec![snip("https://a.example", "python tutorial for beginners")];
        let records = evaluate(&refs, &gen, &OverlapMetric);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distance, Some(0.0));
    }

    #[test]
    fn records_stay_index_aligned_with_the_reference_list() {
        let refs = vec![
            hit("https://a.example", "alpha"),
            hit("https://b.example", "beta"),
        ];
        let gen = vec![
            snip("https://a.example", "alpha ..."),
            snip("https://b.example", "beta ..."),
        ];
        let records = evaluate(&refs, &gen, &OverlapMetric);
        assert_eq!(records[0].url, "https://a.example");
        assert_eq!(records[1].url, "https://b.example");
    }

    #[test]
    fn empty_generated_snippet_is_not_computable() {
        let refs = vec![hit("https://a.example", "some reference text")];
        let gen = vec![snip("https://a.example", "")];
        let records = evaluate(&refs, &gen, &OverlapMetric);
        assert_eq!(records[0].distance, None);
    }

    #[test]
    fn metric_errors_are_recorded_as_not_computable() {
        // A degenerate snippet tokenizes to just the marker; the metric
        // rejects it and the record carries no distance.
        let refs = vec![hit("https://a.example", "some reference text")];
        let gen = vec![snip("https://a.example", "...")];
        let records = evaluate(&refs, &gen, &OverlapMetric);
        assert_eq!(records[0].distance, None);
    }

    #[test]
    fn shorter_generated_list_produces_fewer_records() {
        let refs = vec![
            hit("https://a.example", "alpha"),
            hit("https://b.example", "beta"),
        ];
        let gen = vec![snip("https://a.example", "alpha ...")];
        assert_eq!(evaluate(&refs, &gen, &OverlapMetric).len(), 1);
    }
}
