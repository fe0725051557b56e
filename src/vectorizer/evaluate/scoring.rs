use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::{RecommendError, Result},
    vectorizer::{CountVector, VectorMatrix},
};

/// One ranked document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEntry {
    /// corpus position
    pub index: usize,
    pub score: f64,
}

/// Structure to store ranking results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Create a new Hits instance
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score, ties by ascending index
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|hit| !hit.score.is_nan());
        self.list
            .sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry> {
        self.list.iter()
    }

    /// Corpus positions in ranked order
    pub fn indices(&self) -> Vec<usize> {
        self.list.iter().map(|hit| hit.index).collect()
    }
}

/// Ranks documents by cosine similarity to a reference document
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    /// Rank every vectorized document except `reference` by cosine similarity
    /// to the reference row.
    /// Sorted by descending score, ties broken by ascending index.
    ///
    /// A zero vector on either side scores 0.
    /// A skipped reference ranks like a zero vector.
    ///
    /// # Errors
    /// * `InvalidSelection` - `reference` is not a corpus position
    pub fn rank(reference: usize, matrix: &VectorMatrix) -> Result<Hits> {
        if reference >= matrix.doc_num() {
            return Err(RecommendError::InvalidSelection {
                position: reference,
                len: matrix.doc_num(),
            });
        }
        let start = Instant::now();

        let zero = CountVector::with_len(matrix.vocab_size());
        let target = matrix.row(reference).unwrap_or(&zero);

        let list: Vec<HitEntry> = matrix
            .raw_rows()
            .par_iter()
            .enumerate()
            .filter(|(index, _)| *index != reference)
            .filter_map(|(index, row)| {
                row.as_ref().map(|row| HitEntry {
                    index,
                    score: target.cosine(row),
                })
            })
            .collect();

        let mut hits = Hits::new(list);
        hits.sort_by_score();
        debug!(
            reference,
            ranked = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "ranked documents"
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::VocabularyConfig,
        vectorizer::{
            corpus::{Corpus, Document},
            CountVectorizer,
        },
    };

    fn matrix(texts: &[&str], min_df: usize) -> VectorMatrix {
        let corpus: Corpus = texts.iter().map(|text| Document::new("", *text)).collect();
        CountVectorizer::new(VocabularyConfig { min_df, max_df: 1.0 })
            .build(&corpus)
            .unwrap()
    }

    #[test]
    fn identical_document_ranks_first() {
        let matrix = matrix(
            &[
                "rust borrow checker",
                "rust borrow checker",
                "tomato soup recipe",
                "tomato basil recipe",
                "soup basil garden",
            ],
            2,
        );
        let hits = SimilarityEngine::rank(0, &matrix).unwrap();

        assert_eq!(hits.len(), 4);
        assert!(!hits.indices().contains(&0));
        assert_eq!(hits.list[0].index, 1);
        assert!((hits.list[0].score - 1.0).abs() < 1e-9);
        // the rest share nothing with doc 0
        assert_eq!(&hits.indices()[1..], &[2, 3, 4]);
        assert!(hits.list[1..].iter().all(|hit| hit.score == 0.0));
    }

    #[test]
    fn scores_are_non_increasing() {
        let matrix = matrix(
            &[
                "aa bb cc dd",
                "aa bb cc",
                "aa bb",
                "aa",
                "dd ee",
                "ee ff",
            ],
            1,
        );
        let hits = SimilarityEngine::rank(0, &matrix).unwrap();
        assert!(hits.list.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(hits.indices(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn ties_break_by_ascending_index() {
        let matrix = matrix(&["xx yy", "zz ww", "xx yy", "zz ww", "xx yy"], 1);
        let hits = SimilarityEngine::rank(1, &matrix).unwrap();
        assert_eq!(hits.indices(), vec![3, 0, 2, 4]);
    }

    #[test]
    fn zero_vector_reference_scores_zero() {
        // doc 2 only holds terms that were filtered out
        let matrix = matrix(&["aa bb", "aa bb", "qq", "aa"], 2);
        assert_eq!(matrix.row(2).unwrap().nnz(), 0);
        let hits = SimilarityEngine::rank(2, &matrix).unwrap();
        assert_eq!(hits.indices(), vec![0, 1, 3]);
        assert!(hits.iter().all(|hit| hit.score == 0.0));
    }

    #[test]
    fn skipped_documents_are_not_ranked() {
        let matrix = matrix(&["aa bb", "", "aa bb", "aa"], 2);
        let hits = SimilarityEngine::rank(0, &matrix).unwrap();
        assert_eq!(hits.indices(), vec![2, 3]);

        let hits = SimilarityEngine::rank(1, &matrix).unwrap();
        assert_eq!(hits.indices(), vec![0, 2, 3]);
    }

    #[test]
    fn out_of_range_reference_is_rejected() {
        let matrix = matrix(&["aa bb", "aa bb"], 1);
        let err = SimilarityEngine::rank(2, &matrix).unwrap_err();
        assert_eq!(err, RecommendError::InvalidSelection { position: 2, len: 2 });
    }
}
