pub mod corpus;
pub mod term;
pub mod tokenizer;
pub mod evaluate;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
    config::VocabularyConfig,
    error::{RecommendError, Result},
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        corpus::{doc_freq::DocumentFrequency, Corpus},
        term::TermFrequency,
        tokenizer::{Tokenizer, WordTokenizer},
    },
};

/// Bag-of-words row: term counts over the vocabulary
pub type CountVector = ZeroSpVec<u32>;

/// Count vectors for every corpus position over one shared vocabulary.
/// Built once per corpus and read-only afterwards.
///
/// Positions whose document was skipped (no text) have no row.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatrix {
    /// term -> column, columns in lexicographic term order
    vocabulary: IndexMap<Box<str>, usize>,
    /// one slot per corpus position
    rows: Vec<Option<CountVector>>,
}

impl VectorMatrix {
    /// Number of columns
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of corpus positions, skipped ones included
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.rows.len()
    }

    /// Number of vectorized (non-skipped) documents
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_some()).count()
    }

    /// Row of the document at `index`.
    /// None when out of range or skipped.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&CountVector> {
        self.rows.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_skipped(&self, index: usize) -> bool {
        matches!(self.rows.get(index), Some(None))
    }

    /// Iterate `(position, row)` over vectorized documents
    pub fn rows(&self) -> impl Iterator<Item = (usize, &CountVector)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| row.as_ref().map(|row| (idx, row)))
    }

    pub(crate) fn raw_rows(&self) -> &[Option<CountVector>] {
        &self.rows
    }

    /// Vocabulary terms in column order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(|term| term.as_ref())
    }

    /// Column of a term
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

/// Count Vectorizer
/// Turns a corpus into bag-of-words count vectors.
///
/// The vocabulary is recomputed per corpus: a term is kept only when it
/// occurs in at least `min_df` documents and in no more than
/// `max_df` of the vectorized documents.
#[derive(Debug, Clone)]
pub struct CountVectorizer<T = WordTokenizer>
where
    T: Tokenizer,
{
    config: VocabularyConfig,
    tokenizer: T,
}

impl CountVectorizer<WordTokenizer> {
    pub fn new(config: VocabularyConfig) -> Self {
        Self {
            config,
            tokenizer: WordTokenizer,
        }
    }
}

impl Default for CountVectorizer<WordTokenizer> {
    fn default() -> Self {
        Self::new(VocabularyConfig::default())
    }
}

impl<T> CountVectorizer<T>
where
    T: Tokenizer,
{
    pub fn with_tokenizer(config: VocabularyConfig, tokenizer: T) -> Self {
        Self { config, tokenizer }
    }

    pub fn config(&self) -> &VocabularyConfig {
        &self.config
    }

    /// Build the vector matrix of a corpus
    ///
    /// # Errors
    /// * `DegenerateCorpus` - no document has text, the thresholds
    ///   contradict each other, or the filtered vocabulary is empty
    pub fn build(&self, corpus: &Corpus) -> Result<VectorMatrix> {
        self.config.validate()?;

        let freqs: Vec<Option<TermFrequency>> = corpus
            .documents()
            .par_iter()
            .map(|doc| {
                doc.has_text()
                    .then(|| TermFrequency::from_text(&self.tokenizer, &doc.text))
            })
            .collect();

        let skipped = freqs.iter().filter(|freq| freq.is_none()).count();
        if skipped > 0 {
            warn!(skipped, "documents without text are excluded from vectorization");
        }

        let mut doc_freq = DocumentFrequency::new();
        freqs.iter().flatten().for_each(|freq| doc_freq.add_freq(freq));

        let doc_num = doc_freq.get_doc_num();
        if doc_num == 0 {
            return Err(RecommendError::DegenerateCorpus(
                "no document has text to vectorize".into(),
            ));
        }

        let min_count = self.config.min_df as u64;
        let max_count = (self.config.max_df * doc_num as f64).floor() as u64;
        if max_count < min_count {
            return Err(RecommendError::DegenerateCorpus(format!(
                "max_df {} covers {} of {} documents, fewer than min_df {}",
                self.config.max_df, max_count, doc_num, min_count
            )));
        }

        let vocabulary: IndexMap<Box<str>, usize> = doc_freq
            .terms_within(min_count, max_count)
            .into_iter()
            .enumerate()
            .map(|(col, term)| (Box::from(term), col))
            .collect();
        if vocabulary.is_empty() {
            return Err(RecommendError::DegenerateCorpus(format!(
                "no terms remain after pruning {} candidate terms; lower min_df or raise max_df",
                doc_freq.vocab_size()
            )));
        }

        let dim = vocabulary.len();
        let rows: Vec<Option<CountVector>> = freqs
            .par_iter()
            .map(|freq| freq.as_ref().map(|freq| Self::count_vec(freq, &vocabulary, dim)))
            .collect();

        info!(
            documents = corpus.len(),
            vectorized = doc_num,
            vocab_size = dim,
            "built count vectors"
        );

        Ok(VectorMatrix { vocabulary, rows })
    }

    /// Project a document's term counts onto the vocabulary
    fn count_vec(freq: &TermFrequency, vocabulary: &IndexMap<Box<str>, usize>, dim: usize) -> CountVector {
        let mut cols: Vec<(usize, u32)> = freq
            .iter()
            .filter_map(|(term, count)| vocabulary.get(term).map(|&col| (col, count)))
            .collect();
        cols.sort_unstable_by_key(|&(col, _)| col);

        let mut vec = CountVector::with_len(dim);
        for (col, count) in cols {
            vec.raw_push(col, count);
        }
        vec.shrink_to_fit();
        vec
    }
}
