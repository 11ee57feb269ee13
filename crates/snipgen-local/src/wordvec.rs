//! Word-embedding table and Word Mover's Distance.
//!
//! The table loads once at process start from a word2vec text-format
//! file (`<count> <dim>` header, then `word v1 .. vD` per line),
//! optionally gzip-compressed. Vectors are L2-normalized at load, so
//! token-to-token cost is plain Euclidean distance.
//!
//! The metric is the symmetric relaxed WMD: for each side, the
//! nBOW-weighted cost of moving every token to its nearest counterpart
//! on the other side; the reported distance is the larger direction.
//! This is the standard tight lower bound on the exact
//! optimal-transport WMD and preserves its ordering in practice.

use flate2::read::GzDecoder;
use snipgen_core::{DistanceMetric, Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct WordVectors {
    vectors: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl WordVectors {
    /// Load a word2vec text-format table; `.gz` paths are decompressed
    /// on the fly.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::NotConfigured(format!("vectors {}: {e}", path.display())))?;
        let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
        if gzipped {
            Self::read(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::read(BufReader::new(file))
        }
    }

    pub fn read<R: Read>(reader: BufReader<R>) -> Result<Self> {
        let mut lines = reader.lines();
        let header = lines
            .next()
            .transpose()
            .map_err(|e| Error::Distance(format!("vectors: {e}")))?
            .ok_or_else(|| Error::Distance("vectors: empty file".to_string()))?;

        let mut parts = header.split_whitespace();
        let _count: usize = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::Distance("vectors: bad header".to_string()))?;
        let dim: usize = parts
            .next()
            .and_then(|s| s.parse().ok())
            .filter(|d| *d > 0)
            .ok_or_else(|| Error::Distance("vectors: bad header".to_string()))?;

        let mut vectors = HashMap::new();
        for line in lines {
            let line = line.map_err(|e| Error::Distance(format!("vectors: {e}")))?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else { continue };
            let mut v: Vec<f32> = Vec::with_capacity(dim);
            for p in parts {
                match p.parse::<f32>() {
                    Ok(x) => v.push(x),
                    Err(_) => break,
                }
            }
            if v.len() != dim {
                return Err(Error::Distance(format!(
                    "vectors: expected {dim} components for {word:?}, got {}",
                    v.len()
                )));
            }
            normalize(&mut v);
            vectors.insert(word.to_lowercase(), v);
        }

        if vectors.is_empty() {
            return Err(Error::Distance("vectors: no entries".to_string()));
        }
        Ok(Self { vectors, dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// nBOW weights over the in-vocabulary tokens: repeated tokens carry
    /// proportionally more mass, out-of-vocabulary tokens are dropped.
    fn nbow(&self, tokens: &[String]) -> Vec<(&Vec<f32>, f64)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;
        for t in tokens {
            if let Some((word, _)) = self.vectors.get_key_value(t.as_str()) {
                *counts.entry(word.as_str()).or_default() += 1;
                total += 1;
            }
        }
        counts
            .into_iter()
            .map(|(w, c)| (&self.vectors[w], c as f64 / total as f64))
            .collect()
    }
}

fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = (x - y) as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Weighted nearest-neighbor transport cost from `from` onto `to`.
fn relaxed_cost(from: &[(&Vec<f32>, f64)], to: &[(&Vec<f32>, f64)]) -> f64 {
    from.iter()
        .map(|&(v, w)| {
            let nearest = to
                .iter()
                .map(|&(u, _)| euclidean(v, u))
                .fold(f64::INFINITY, f64::min);
            w * nearest
        })
        .sum()
}

impl DistanceMetric for WordVectors {
    fn distance(&self, a: &[String], b: &[String]) -> Result<f64> {
        let wa = self.nbow(a);
        let wb = self.nbow(b);
        if wa.is_empty() || wb.is_empty() {
            return Err(Error::Distance(
                "no in-vocabulary tokens on one side".to_string(),
            ));
        }
        Ok(relaxed_cost(&wa, &wb).max(relaxed_cost(&wb, &wa)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = "4 3\n\
        python 1.0 0.0 0.0\n\
        tutorial 0.9 0.1 0.0\n\
        snake 0.8 0.0 0.2\n\
        banana 0.0 0.0 1.0\n";

    fn table() -> WordVectors {
        WordVectors::read(BufReader::new(FIXTURE.as_bytes())).unwrap()
    }

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn loads_header_and_entries() {
        let t = table();
        assert_eq!(t.dim(), 3);
        assert_eq!(t.len(), 4);
        assert!(t.contains("python"));
        assert!(!t.contains("missing"));
    }

    #[test]
    fn identical_token_sequences_have_zero_distance() {
        let t = table();
        let d = t
            .distance(&toks(&["python", "tutorial"]), &toks(&["python", "tutorial"]))
            .unwrap();
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let t = table();
        let a = toks(&["python", "tutorial"]);
        let b = toks(&["snake", "banana"]);
        let d1 = t.distance(&a, &b).unwrap();
        let d2 = t.distance(&b, &a).unwrap();
        assert!((d1 - d2).abs() < 1e-12);
        assert!(d1 > 0.0);
    }

    #[test]
    fn related_words_are_closer_than_unrelated_ones() {
        let t = table();
        let near = t
            .distance(&toks(&["python"]), &toks(&["snake"]))
            .unwrap();
        let far = t
            .distance(&toks(&["python"]), &toks(&["banana"]))
            .unwrap();
        assert!(near < far);
    }

    #[test]
    fn out_of_vocabulary_tokens_are_dropped() {
        let t = table();
        let d = t
            .distance(&toks(&["python", "zzzz"]), &toks(&["python"]))
            .unwrap();
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn fully_out_of_vocabulary_side_is_undefined() {
        let t = table();
        let err = t
            .distance(&toks(&["zzzz", "..."]), &toks(&["python"]))
            .unwrap_err();
        assert!(matches!(err, Error::Distance(_)));
    }

    #[test]
    fn gzipped_tables_load_too() {
        let mut f = tempfile::Builder::new()
            .suffix(".txt.gz")
            .tempfile()
            .expect("tmp");
        let mut enc =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(FIXTURE.as_bytes()).unwrap();
        f.write_all(&enc.finish().unwrap()).unwrap();
        let t = WordVectors::load(f.path()).expect("load gz");
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn bad_headers_are_rejected() {
        let err = WordVectors::read(BufReader::new("not a header\n".as_bytes())).unwrap_err();
        assert!(matches!(err, Error::Distance(_)));
    }
}
