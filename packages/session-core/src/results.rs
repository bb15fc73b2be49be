//! Verdicts grouped by learning mode
//!
//! A fixed table keyed by [`ModeCode`], one `word_id → WordVerdict` map per mode.
//! Modes that are unselected or have no verdicts yet hold `None`.

use std::collections::BTreeMap;

use crate::types::{ModeCode, WordId, WordVerdict};

/// Verdicts of one mode
pub type VerdictMap = BTreeMap<WordId, WordVerdict>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeResults {
    slots: [Option<VerdictMap>; 5],
}

impl ModeResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self, code: ModeCode) -> Option<&VerdictMap> {
        self.slots[code.index()].as_ref()
    }

    pub fn get(&self, code: ModeCode, word_id: WordId) -> Option<&WordVerdict> {
        self.mode(code).and_then(|map| map.get(&word_id))
    }

    /// Writes a verdict; an existing one is kept
    ///
    /// Returns whether anything was written.
    pub fn record_first(&mut self, code: ModeCode, word_id: WordId, verdict: WordVerdict) -> bool {
        let map = self.slots[code.index()].get_or_insert_with(VerdictMap::new);
        if map.contains_key(&word_id) {
            return false;
        }
        map.insert(word_id, verdict);
        true
    }

    /// Whole-mode write (match-pairs)
    pub fn replace_mode(&mut self, code: ModeCode, map: VerdictMap) {
        self.slots[code.index()] = Some(map);
    }

    /// Number of modes holding verdicts
    pub fn mode_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the mode has a verdict for every given word
    pub fn covers<'a>(&self, code: ModeCode, word_ids: impl IntoIterator<Item = &'a WordId>) -> bool {
        match self.mode(code) {
            Some(map) => word_ids.into_iter().all(|id| map.contains_key(id)),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModeCode, &VerdictMap)> {
        ModeCode::ALL
            .into_iter()
            .filter_map(move |code| self.mode(code).map(|map| (code, map)))
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_verdict_wins() {
        let mut results = ModeResults::new();
        assert!(results.record_first(ModeCode::MakeWord, 1, WordVerdict::answered(false)));
        assert!(!results.record_first(ModeCode::MakeWord, 1, WordVerdict::answered(true)));
        assert_eq!(
            results.get(ModeCode::MakeWord, 1),
            Some(&WordVerdict::answered(false))
        );
    }

    #[test]
    fn test_modes_are_independent() {
        let mut results = ModeResults::new();
        results.record_first(ModeCode::WordToTranslation, 1, WordVerdict::seen());
        assert!(results.get(ModeCode::TranslationToWord, 1).is_none());
        assert_eq!(results.mode_count(), 1);
    }

    #[test]
    fn test_covers_requires_every_word() {
        let mut results = ModeResults::new();
        results.record_first(ModeCode::SelectCorrectAnswer, 1, WordVerdict::answered(true));
        assert!(results.covers(ModeCode::SelectCorrectAnswer, &[1]));
        assert!(!results.covers(ModeCode::SelectCorrectAnswer, &[1, 2]));
        assert!(!results.covers(ModeCode::MatchPairs, &[1]));
    }

    #[test]
    fn test_replace_and_clear() {
        let mut results = ModeResults::new();
        let mut map = VerdictMap::new();
        map.insert(5, WordVerdict::answered(false));
        results.replace_mode(ModeCode::MatchPairs, map);
        assert_eq!(results.iter().count(), 1);

        results.clear();
        assert_eq!(results.mode_count(), 0);
    }
}
