use rand::{seq::SliceRandom, Rng};

use crate::{
    config::EXPLORE_TAIL_LEN,
    error::{RecommendError, Result},
    recommender::set::RecommendationSet,
    vectorizer::{evaluate::scoring::SimilarityEngine, VectorMatrix},
};

/// Draw `n` distinct positions uniformly from `0..corpus_size`
///
/// # Errors
/// * `InsufficientCorpus` - `n > corpus_size`
pub fn initial_recommendations<R>(n: usize, corpus_size: usize, rng: &mut R) -> Result<RecommendationSet>
where
    R: Rng + ?Sized,
{
    if n > corpus_size {
        return Err(RecommendError::InsufficientCorpus {
            requested: n,
            available: corpus_size,
        });
    }
    let indices = rand::seq::index::sample(rng, corpus_size, n).into_vec();
    Ok(RecommendationSet::sample(indices))
}

/// Build a refined set around `reference`.
///
/// The `top_k` most similar documents come first in rank order, followed by
/// the `EXPLORE_TAIL_LEN` least similar ones in shuffled order.
/// When the ranking is too short for both, the tail is taken first and the
/// similar part shrinks, so no position repeats.
/// With two or fewer ranked documents the core is empty and every document,
/// however similar, lands in the tail.
///
/// # Errors
/// * `InvalidSelection` - `reference` is not a corpus position
pub fn refine<R>(reference: usize, top_k: usize, matrix: &VectorMatrix, rng: &mut R) -> Result<RecommendationSet>
where
    R: Rng + ?Sized,
{
    let ranked = SimilarityEngine::rank(reference, matrix)?.indices();

    let tail_len = EXPLORE_TAIL_LEN.min(ranked.len());
    let (head, tail) = ranked.split_at(ranked.len() - tail_len);

    let core: Vec<usize> = head.iter().take(top_k).copied().collect();
    let mut explore = tail.to_vec();
    explore.shuffle(rng);

    Ok(RecommendationSet::refined(core, explore))
}
