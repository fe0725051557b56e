use crate::recommender::set::{DisplayView, RecommendationSet};

/// Display mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Random sample, nothing chosen yet
    Initial,
    /// Similarity driven set around the last choice
    Refined,
}

/// Session state.
/// Only ever replaced as a whole, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    mode: SessionMode,
    current: RecommendationSet,
    last_choice: Option<usize>,
}

impl SessionState {
    pub fn initial(sample: RecommendationSet) -> Self {
        Self {
            mode: SessionMode::Initial,
            current: sample,
            last_choice: None,
        }
    }

    pub fn refined(set: RecommendationSet, choice: usize) -> Self {
        Self {
            mode: SessionMode::Refined,
            current: set,
            last_choice: Some(choice),
        }
    }

    #[inline]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[inline]
    pub fn current(&self) -> &RecommendationSet {
        &self.current
    }

    #[inline]
    pub fn last_choice(&self) -> Option<usize> {
        self.last_choice
    }

    /// Initial shows the whole sample.
    /// Refined shows at most `max_new_recs` similar items plus the whole tail.
    pub fn display(&self, max_new_recs: usize) -> DisplayView<'_> {
        match self.mode {
            SessionMode::Initial => DisplayView {
                similar: self.current.indices(),
                explore: &[],
                explore_offset: self.current.len(),
            },
            SessionMode::Refined => {
                let core = self.current.core();
                DisplayView {
                    similar: &core[..core.len().min(max_new_recs)],
                    explore: self.current.explore(),
                    explore_offset: self.current.explore_start(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_display_shows_everything() {
        let state = SessionState::initial(RecommendationSet::sample((0..12).collect()));
        let view = state.display(8);
        assert_eq!(view.similar.len(), 12);
        assert!(view.explore.is_empty());
        assert_eq!(state.last_choice(), None);
    }

    #[test]
    fn refined_display_truncates_core_and_keeps_tail() {
        let set = RecommendationSet::refined((10..20).collect(), vec![30, 31]);
        let state = SessionState::refined(set, 5);
        let view = state.display(8);
        assert_eq!(view.similar, &[10, 11, 12, 13, 14, 15, 16, 17]);
        assert_eq!(view.explore, &[30, 31]);
        assert_eq!(view.explore_offset, 10);
        assert_eq!(state.mode(), SessionMode::Refined);
        assert_eq!(state.last_choice(), Some(5));
    }
}
