/// Ordered list of corpus positions to present.
///
/// A refined set holds the similar items first and the exploration tail
/// last. `explore_start` marks where the tail begins; for an initial
/// sample it equals the length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationSet {
    indices: Vec<usize>,
    explore_start: usize,
}

impl RecommendationSet {
    /// A set with no exploration tail
    pub fn sample(indices: Vec<usize>) -> Self {
        let explore_start = indices.len();
        Self {
            indices,
            explore_start,
        }
    }

    /// Similar items followed by the exploration tail
    pub fn refined(mut core: Vec<usize>, explore: Vec<usize>) -> Self {
        let explore_start = core.len();
        core.extend(explore);
        Self {
            indices: core,
            explore_start,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Corpus position shown at `position`
    #[inline]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Similarity ranked part, or the whole sample
    #[inline]
    pub fn core(&self) -> &[usize] {
        &self.indices[..self.explore_start]
    }

    /// Exploration tail
    #[inline]
    pub fn explore(&self) -> &[usize] {
        &self.indices[self.explore_start..]
    }

    #[inline]
    pub fn explore_start(&self) -> usize {
        self.explore_start
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.indices.iter()
    }
}

/// What the display shows for the current state.
/// Positions refer to the full `RecommendationSet`:
/// `similar[i]` is at position `i`, `explore[i]` at `explore_offset + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayView<'a> {
    pub similar: &'a [usize],
    pub explore: &'a [usize],
    pub explore_offset: usize,
}

impl DisplayView<'_> {
    /// `(position, corpus index)` pairs in display order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.similar
            .iter()
            .copied()
            .enumerate()
            .chain(
                self.explore
                    .iter()
                    .enumerate()
                    .map(move |(i, &index)| (self.explore_offset + i, index)),
            )
    }
}
