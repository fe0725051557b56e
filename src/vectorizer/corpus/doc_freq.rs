use indexmap::IndexMap;

use crate::vectorizer::term::TermFrequency;

/// Keeps the document count and, per term, the number of documents it occurs in.
/// Base data for the vocabulary filter.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequency {
    /// number of documents added
    doc_num: u64,
    /// documents containing each term
    term_counts: IndexMap<Box<str>, u64>,
}

impl DocumentFrequency {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add a document's distinct terms
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            *self.term_counts.entry(term.as_ref().into()).or_insert(0) += 1;
        }
    }

    /// Add the distinct terms of a document's term frequency
    pub fn add_freq(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for term in freq.term_set_iter() {
            *self.term_counts.entry(term.into()).or_insert(0) += 1;
        }
    }

    /// Get the number of documents
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the number of documents containing the term
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Iterate terms with their document counts, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(term, &count)| (term.as_ref(), count))
    }

    /// Terms whose document count lies in `min_count..=max_count`,
    /// sorted lexicographically
    pub fn terms_within(&self, min_count: u64, max_count: u64) -> Vec<&str> {
        let mut terms: Vec<&str> = self
            .iter()
            .filter(|&(_, count)| count >= min_count && count <= max_count)
            .map(|(term, _)| term)
            .collect();
        terms.sort_unstable();
        terms
    }
}
