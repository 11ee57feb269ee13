use crate::{Error, Result, SynonymProvider};
use std::collections::BTreeSet;

/// A parsed search query: lowercase terms in input order, plus the
/// precomputed union of their synonyms.
///
/// The synonym set is computed once per query (not per sentence); the
/// query-independent strategies never consult it.
#[derive(Debug, Clone)]
pub struct Query {
    terms: Vec<String>,
    synonym_set: Vec<String>,
}

impl Query {
    /// Lowercase and whitespace-split `raw`. Empty input is rejected so
    /// downstream "all terms" checks can never be vacuously true.
    pub fn parse(raw: &str) -> Result<Self> {
        let terms: Vec<String> = raw
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if terms.is_empty() {
            return Err(Error::InvalidQuery("query has no terms".to_string()));
        }
        Ok(Self {
            terms,
            synonym_set: Vec::new(),
        })
    }

    /// Attach the union of per-term synonyms, lowercased and de-duplicated.
    /// Terms that are their own synonym add nothing: the plain term checks
    /// already cover them.
    pub fn with_synonyms(mut self, provider: &dyn SynonymProvider) -> Self {
        let mut set: BTreeSet<String> = BTreeSet::new();
        for term in &self.terms {
            for syn in provider.synonyms(term) {
                let syn = syn.to_lowercase();
                if !syn.is_empty() && !self.terms.contains(&syn) {
                    set.insert(syn);
                }
            }
        }
        self.synonym_set = set.into_iter().collect();
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn synonym_set(&self) -> &[String] {
        &self.synonym_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    struct MapSynonyms;

    impl SynonymProvider for MapSynonyms {
        fn synonyms(&self, term: &str) -> BTreeSet<String> {
            match term {
                "python" => ["Serpent", "snake", "python"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                _ => BTreeSet::new(),
            }
        }
    }

    #[test]
    fn parse_lowercases_and_splits() {
        let q = Query::parse("  Python   TUTORIAL ").unwrap();
        assert_eq!(q.terms(), ["python", "tutorial"]);
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(Query::parse("   ").is_err());
        assert!(Query::parse("").is_err());
    }

    #[test]
    fn synonym_set_is_lowercased_and_excludes_query_terms() {
        let q = Query::parse("python tutorial")
            .unwrap()
            .with_synonyms(&MapSynonyms);
        assert_eq!(q.synonym_set(), ["serpent", "snake"]);
    }

    #[test]
    fn out_of_vocabulary_terms_contribute_nothing() {
        let q = Query::parse("qwertyuiop").unwrap().with_synonyms(&MapSynonyms);
        assert!(q.synonym_set().is_empty());
    }
}
