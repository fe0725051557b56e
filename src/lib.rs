/// This crate is a content based Article Recommender built on bag-of-words count vectors.
pub mod config;
pub mod error;
pub mod loader;
pub mod recommender;
pub mod utils;
pub mod vectorizer;

/// Recommender
/// The top-level struct of this crate, owning one interactive session.
/// It vectorizes a corpus once, shows a random initial sample, and after each
/// selection recomputes a ranked set of similar articles followed by a small
/// tail of deliberately dissimilar ones.
///
/// Internally, it holds:
/// - A shared `Arc<Corpus>`
/// - A shared `Arc<VectorMatrix>`
/// - The session state (Initial or Refined)
/// - A seedable random source
///
/// The corpus and matrix are read-only and can back several sessions at once.
pub use recommender::Recommender;

/// Session mode and state
/// `SessionMode::Initial` shows the whole random sample,
/// `SessionMode::Refined` shows the similar items followed by the exploration tail.
pub use recommender::session::{SessionMode, SessionState};

/// Recommendation Set and Display View
/// - `RecommendationSet`: ordered corpus positions, similar items first and exploration tail last
/// - `DisplayView`: the part of the set the display shows in the current mode
pub use recommender::set::{DisplayView, RecommendationSet};

/// Stateless recommendation policy
/// - `initial_recommendations`: uniform sample without replacement
/// - `refine`: top-K similar items plus a shuffled bottom-2 tail
pub use recommender::policy::{initial_recommendations, refine};

/// Count Vectorizer and Vector Matrix
/// `CountVectorizer` turns a `Corpus` into a `VectorMatrix` of term counts
/// over a vocabulary filtered by document frequency.
/// The matrix is immutable once built.
pub use vectorizer::{CountVector, CountVectorizer, VectorMatrix};

/// Corpus and Document
/// The ordered article collection. Articles are identified by position.
pub use vectorizer::corpus::{Corpus, Document};

/// Similarity Engine
/// Ranks documents by cosine similarity to a reference document.
/// - `Hits`: ranked list, descending score with ascending index tie-break
/// - `HitEntry`: one ranked document
pub use vectorizer::evaluate::scoring::{HitEntry, Hits, SimilarityEngine};

/// Term Frequency and Tokenizer
pub use vectorizer::term::TermFrequency;
pub use vectorizer::tokenizer::{Tokenizer, WordTokenizer};

pub use config::{RecommenderConfig, VocabularyConfig, EXPLORE_TAIL_LEN};
pub use error::{RecommendError, Result};
