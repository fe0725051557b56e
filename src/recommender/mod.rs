pub mod policy;
pub mod session;
pub mod set;

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::{
    config::RecommenderConfig,
    error::{RecommendError, Result},
    recommender::{
        policy::{initial_recommendations, refine},
        session::{SessionMode, SessionState},
        set::{DisplayView, RecommendationSet},
    },
    vectorizer::{
        corpus::{Corpus, Document},
        CountVectorizer, VectorMatrix,
    },
};

/// Recommender
/// Owns one interactive session over a corpus.
///
/// The corpus and its vector matrix are shared read-only through `Arc`,
/// so several sessions can sit on top of one vectorized corpus.
/// The session state and random source belong to this instance alone.
#[derive(Debug)]
pub struct Recommender {
    corpus: Arc<Corpus>,
    matrix: Arc<VectorMatrix>,
    config: RecommenderConfig,
    rng: StdRng,
    session: SessionState,
}

impl Recommender {
    /// Vectorize the corpus and open a session in Initial mode
    ///
    /// # Errors
    /// * `InvalidConfig` - the config does not validate
    /// * `DegenerateCorpus` - the corpus cannot be vectorized
    /// * `InsufficientCorpus` - the corpus is smaller than `initial_size`
    pub fn new(corpus: Arc<Corpus>, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let matrix = CountVectorizer::new(config.vocabulary.clone()).build(&corpus)?;
        Self::with_matrix(corpus, Arc::new(matrix), config)
    }

    /// Open a session over an already built matrix
    pub fn with_matrix(corpus: Arc<Corpus>, matrix: Arc<VectorMatrix>, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        if matrix.doc_num() != corpus.len() {
            return Err(RecommendError::DegenerateCorpus(format!(
                "matrix covers {} documents but the corpus has {}",
                matrix.doc_num(),
                corpus.len()
            )));
        }
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sample = initial_recommendations(config.initial_size, corpus.len(), &mut rng)?;
        Ok(Self {
            corpus,
            matrix,
            config,
            rng,
            session: SessionState::initial(sample),
        })
    }

    #[inline]
    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    /// The full current set
    #[inline]
    pub fn current(&self) -> &RecommendationSet {
        self.session.current()
    }

    #[inline]
    pub fn last_choice(&self) -> Option<usize> {
        self.session.last_choice()
    }

    #[inline]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[inline]
    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    #[inline]
    pub fn matrix(&self) -> &Arc<VectorMatrix> {
        &self.matrix
    }

    #[inline]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Document at a corpus position, for detail display
    #[inline]
    pub fn document(&self, index: usize) -> Option<&Document> {
        self.corpus.get(index)
    }

    /// What the display should show in the current mode
    pub fn display(&self) -> DisplayView<'_> {
        self.session.display(self.config.max_new_recs)
    }

    /// The user picked the item at `position` of the current set.
    /// Recomputes the set around it and moves to Refined.
    ///
    /// # Errors
    /// * `InvalidSelection` - `position` is outside the current set;
    ///   the session is left untouched
    pub fn select(&mut self, position: usize) -> Result<&RecommendationSet> {
        let choice = self
            .session
            .current()
            .get(position)
            .ok_or(RecommendError::InvalidSelection {
                position,
                len: self.session.current().len(),
            })?;
        let set = refine(choice, self.config.top_k, &self.matrix, &mut self.rng)?;
        debug!(position, choice, size = set.len(), "session refined");
        self.session = SessionState::refined(set, choice);
        Ok(self.session.current())
    }

    /// Back to Initial with a fresh random sample
    pub fn reset(&mut self) -> Result<&RecommendationSet> {
        let sample = initial_recommendations(self.config.initial_size, self.corpus.len(), &mut self.rng)?;
        debug!(size = sample.len(), "session reset");
        self.session = SessionState::initial(sample);
        Ok(self.session.current())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::VocabularyConfig;

    fn topic_corpus() -> Arc<Corpus> {
        let topics = [
            "rust compiler borrow checker lifetimes",
            "tomato soup basil recipe kitchen",
            "football league goal season match",
        ];
        let mut docs = Vec::new();
        for i in 0..30 {
            let topic = topics[i % topics.len()];
            docs.push(Document::new(format!("article {i}"), format!("{topic} note{}", i % 5)));
        }
        Arc::new(Corpus::new(docs))
    }

    fn config() -> RecommenderConfig {
        RecommenderConfig {
            initial_size: 12,
            seed: Some(42),
            ..RecommenderConfig::default()
        }
    }

    #[test]
    fn starts_in_initial_mode() {
        let recommender = Recommender::new(topic_corpus(), config()).unwrap();
        assert_eq!(recommender.mode(), SessionMode::Initial);
        assert_eq!(recommender.last_choice(), None);
        assert_eq!(recommender.current().len(), 12);
        assert_eq!(recommender.display().similar.len(), 12);
        assert!(recommender.display().explore.is_empty());
    }

    #[test]
    fn select_refines_around_choice() {
        let mut recommender = Recommender::new(topic_corpus(), config()).unwrap();
        let choice = recommender.current().get(3).unwrap();

        let set = recommender.select(3).unwrap().clone();
        assert_eq!(recommender.mode(), SessionMode::Refined);
        assert_eq!(recommender.last_choice(), Some(choice));
        assert_eq!(set.len(), 10);
        assert!(!set.contains(choice));
        let unique: HashSet<usize> = set.iter().copied().collect();
        assert_eq!(unique.len(), 10);

        // the similar part shares the chosen topic
        assert!(set.core().iter().all(|&i| i % 3 == choice % 3));
        // and the tail does not
        assert!(set.explore().iter().all(|&i| i % 3 != choice % 3));

        let view = recommender.display();
        assert_eq!(view.similar.len(), 8);
        assert_eq!(view.explore.len(), 2);
        assert_eq!(view.explore_offset, 8);
    }

    #[test]
    fn invalid_selection_leaves_session_untouched() {
        let mut recommender = Recommender::new(topic_corpus(), config()).unwrap();
        let before = recommender.session().clone();

        let err = recommender.select(12).unwrap_err();
        assert_eq!(err, RecommendError::InvalidSelection { position: 12, len: 12 });
        assert_eq!(recommender.session(), &before);
    }

    #[test]
    fn selection_chains_and_reset_returns_to_initial() {
        let mut recommender = Recommender::new(topic_corpus(), config()).unwrap();
        recommender.select(0).unwrap();
        let second = recommender.current().get(9).unwrap();
        recommender.select(9).unwrap();
        assert_eq!(recommender.last_choice(), Some(second));

        let sample = recommender.reset().unwrap();
        assert_eq!(sample.len(), 12);
        assert_eq!(recommender.mode(), SessionMode::Initial);
        assert_eq!(recommender.last_choice(), None);
    }

    #[test]
    fn seeded_sessions_repeat() {
        let mut a = Recommender::new(topic_corpus(), config()).unwrap();
        let mut b = Recommender::new(topic_corpus(), config()).unwrap();
        assert_eq!(a.current(), b.current());
        assert_eq!(a.select(1).unwrap(), b.select(1).unwrap());
    }

    #[test]
    fn corpus_smaller_than_sample_is_insufficient() {
        let corpus: Corpus = (0..50)
            .map(|i| Document::new(format!("t{i}"), format!("shared words doc{}", i % 4)))
            .collect();
        let config = RecommenderConfig {
            seed: Some(1),
            ..RecommenderConfig::default()
        };
        let err = Recommender::new(Arc::new(corpus), config).unwrap_err();
        assert_eq!(
            err,
            RecommendError::InsufficientCorpus {
                requested: 101,
                available: 50
            }
        );
    }

    #[test]
    fn degenerate_corpus_is_reported() {
        let corpus: Corpus = (0..5)
            .map(|i| Document::new(format!("t{i}"), format!("unique{i}")))
            .collect();
        let config = RecommenderConfig {
            initial_size: 5,
            ..RecommenderConfig::default()
        };
        let err = Recommender::new(Arc::new(corpus), config).unwrap_err();
        assert!(matches!(err, RecommendError::DegenerateCorpus(_)));
    }

    #[test]
    fn identical_pair_end_to_end() {
        let corpus = Corpus::new(vec![
            Document::new("a", "ownership borrowing lifetimes"),
            Document::new("b", "ownership borrowing lifetimes"),
            Document::new("c", "pasta sauce garlic"),
            Document::new("d", "pasta garlic bread"),
            Document::new("e", "sauce bread oven"),
        ]);
        let config = RecommenderConfig {
            initial_size: 5,
            top_k: 1,
            seed: Some(9),
            vocabulary: VocabularyConfig { min_df: 2, max_df: 1.0 },
            ..RecommenderConfig::default()
        };
        let mut recommender = Recommender::new(Arc::new(corpus), config).unwrap();
        let position = recommender.current().iter().position(|&i| i == 0).unwrap();

        let set = recommender.select(position).unwrap();
        assert_eq!(set.core(), &[1]);
        assert_eq!(set.explore().len(), 2);
        assert!(!set.contains(0));
        assert_eq!(recommender.document(1).unwrap().title, "b");
    }

    #[test]
    fn shared_matrix_must_match_corpus() {
        let corpus = topic_corpus();
        let matrix = CountVectorizer::default().build(&corpus).unwrap();
        let other: Corpus = corpus.iter().take(20).cloned().collect();
        let err = Recommender::with_matrix(Arc::new(other), Arc::new(matrix), config()).unwrap_err();
        assert!(matches!(err, RecommendError::DegenerateCorpus(_)));
    }
}
