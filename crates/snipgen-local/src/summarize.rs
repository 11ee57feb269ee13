//! Extractive TextRank summarization: sentences as nodes, TF cosine
//! similarity as edges, PageRank iteration, top sentences re-sorted into
//! document order.

use crate::sentences::split_sentences;
use snipgen_core::{Error, Result, Summarizer};
use std::collections::HashMap;

const DAMPING: f64 = 0.85;
const CONVERGENCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRankSummarizer;

impl Summarizer for TextRankSummarizer {
    fn summarize(&self, text: &str, max_sentences: usize) -> Result<Vec<String>> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(Error::Summarize("no sentences to summarize".to_string()));
        }
        if sentences.len() <= max_sentences {
            return Ok(sentences);
        }

        let scores = rank_sentences(&sentences);
        let mut indexed: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Top N by rank, then document order for coherent output.
        let mut top: Vec<usize> = indexed.iter().take(max_sentences).map(|(i, _)| *i).collect();
        top.sort_unstable();

        Ok(top.iter().map(|&i| sentences[i].clone()).collect())
    }
}

/// PageRank over the sentence similarity graph.
fn rank_sentences(sentences: &[String]) -> Vec<f64> {
    let n = sentences.len();
    if n == 1 {
        return vec![1.0];
    }

    let vectors = tf_vectors(sentences);
    let mut sim = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let s = cosine(&vectors[i], &vectors[j]);
            sim[i][j] = s;
            sim[j][i] = s;
        }
    }

    let mut scores = vec![1.0 / n as f64; n];
    for _ in 0..MAX_ITERATIONS {
        let mut next = vec![0.0f64; n];
        let mut max_diff = 0.0f64;
        for i in 0..n {
            let mut sum = 0.0f64;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let out_weight: f64 = (0..n).filter(|&k| k != j).map(|k| sim[j][k]).sum();
                if out_weight > f64::EPSILON {
                    sum += sim[j][i] * scores[j] / out_weight;
                }
            }
            next[i] = (1.0 - DAMPING) / n as f64 + DAMPING * sum;
            max_diff = max_diff.max((next[i] - scores[i]).abs());
        }
        scores = next;
        if max_diff < CONVERGENCE {
            break;
        }
    }
    scores
}

fn tf_vectors(sentences: &[String]) -> Vec<Vec<f64>> {
    let mut vocab: HashMap<String, usize> = HashMap::new();
    for s in sentences {
        for w in s.split_whitespace() {
            let w = w.to_lowercase();
            let next = vocab.len();
            vocab.entry(w).or_insert(next);
        }
    }
    let dim = vocab.len();
    sentences
        .iter()
        .map(|s| {
            let mut v = vec![0.0f64; dim];
            for w in s.split_whitespace() {
                if let Some(&i) = vocab.get(&w.to_lowercase()) {
                    v[i] += 1.0;
                }
            }
            v
        })
        .collect()
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na <= f64::EPSILON || nb <= f64::EPSILON {
        0.0
    } else {
        dot / (na * nb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Rust is a systems programming language. \
        It focuses on safety and performance. \
        Memory safety is guaranteed at compile time. \
        The borrow checker prevents data races. \
        Garbage collection is not required. \
        Cats are unrelated to programming. \
        Rust programs compile to native code.";

    #[test]
    fn summary_is_bounded_and_in_document_order() {
        let got = TextRankSummarizer.summarize(TEXT, 3).unwrap();
        assert_eq!(got.len(), 3);
        let all = split_sentences(TEXT);
        let positions: Vec<usize> = got
            .iter()
            .map(|s| all.iter().position(|x| x == s).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn short_text_summarizes_to_itself() {
        let got = TextRankSummarizer.summarize("One sentence.", 5).unwrap();
        assert_eq!(got, ["One sentence."]);
    }

    #[test]
    fn empty_text_is_a_summarization_failure() {
        assert!(TextRankSummarizer.summarize("", 5).is_err());
        assert!(TextRankSummarizer.summarize("   ", 5).is_err());
    }
}
