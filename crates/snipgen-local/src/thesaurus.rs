//! File-backed synonym lookup.
//!
//! Loads a WordNet-style export once at startup:
//!
//! ```text
//! # term<TAB>comma-separated synonyms
//! python	serpent,boa_constrictor
//! tutorial	lesson,class
//! ```
//!
//! Underscores and whitespace runs inside a synonym normalize to single
//! spaces, matching how multi-word lemmas are exported.

use snipgen_core::{Error, Result, SynonymProvider};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// Lowercase and collapse `_` and whitespace runs to single spaces.
fn normalize_synonym(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default)]
pub struct FileThesaurus {
    entries: HashMap<String, BTreeSet<String>>,
}

impl FileThesaurus {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::NotConfigured(format!("thesaurus {}: {e}", path.display())))?;
        Ok(Self::parse(&raw))
    }

    fn parse(raw: &str) -> Self {
        let mut entries: HashMap<String, BTreeSet<String>> = HashMap::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((term, rest)) = line.split_once('\t') else {
                continue;
            };
            let term = normalize_synonym(term);
            if term.is_empty() {
                continue;
            }
            let set = entries.entry(term.clone()).or_default();
            for syn in rest.split(',') {
                let syn = normalize_synonym(syn);
                // A term is not its own synonym; plain term matching
                // already covers it.
                if !syn.is_empty() && syn != term {
                    set.insert(syn);
                }
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SynonymProvider for FileThesaurus {
    fn synonyms(&self, term: &str) -> BTreeSet<String> {
        self.entries
            .get(&term.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// Provider with no vocabulary at all: every query degrades to plain
/// term matching. Used when no thesaurus file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyThesaurus;

impl SynonymProvider for EmptyThesaurus {
    fn synonyms(&self, _term: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = "# comment line\n\
        python\tserpent,boa_constrictor,python\n\
        tutorial\tlesson , CLASS\n\
        \n\
        malformed line without tab\n";

    #[test]
    fn parses_terms_and_normalizes_synonyms() {
        let t = FileThesaurus::parse(FIXTURE);
        assert_eq!(t.len(), 2);
        let syns = t.synonyms("python");
        assert!(syns.contains("serpent"));
        assert!(syns.contains("boa constrictor"));
        // Own surface form excluded.
        assert!(!syns.contains("python"));
        assert_eq!(
            t.synonyms("TUTORIAL"),
            BTreeSet::from(["lesson".to_string(), "class".to_string()])
        );
    }

    #[test]
    fn unknown_terms_yield_an_empty_set() {
        let t = FileThesaurus::parse(FIXTURE);
        assert!(t.synonyms("qwertyuiop").is_empty());
    }

    #[test]
    fn load_reads_a_file_and_reports_missing_ones() {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        write!(f, "{FIXTURE}").unwrap();
        let t = FileThesaurus::load(f.path()).expect("load");
        assert_eq!(t.len(), 2);

        let missing = Path::new("/nonexistent/thesaurus.tsv");
        assert!(matches!(
            FileThesaurus::load(missing),
            Err(Error::NotConfigured(_))
        ));
    }

    #[test]
    fn empty_thesaurus_always_returns_nothing() {
        assert!(EmptyThesaurus.synonyms("python").is_empty());
    }
}
