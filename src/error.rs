use thiserror::Error;

/// Errors raised by the recommendation engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendError {
    /// The corpus cannot be vectorized meaningfully.
    /// Fatal for the current corpus.
    #[error("degenerate corpus: {0}")]
    DegenerateCorpus(String),

    /// More items were requested than the corpus holds.
    /// Fatal for initial sampling.
    #[error("insufficient corpus: requested {requested} items but the corpus has {available}")]
    InsufficientCorpus { requested: usize, available: usize },

    /// A caller supplied position or index is out of bounds.
    /// Recoverable, engine state is untouched.
    #[error("invalid selection: {position} is out of range for {len} items")]
    InvalidSelection { position: usize, len: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
