//! Cross-mode result aggregation
//!
//! A word is correct only when every selected mode judged it correct.
//! A missing verdict in any mode counts as wrong.

use crate::results::ModeResults;
use crate::types::{ModeCode, Word, WordId, WordResult};

/// Correct in every mode; missing entries fail
pub fn is_correct_in_all_modes(word_id: WordId, modes: &[ModeCode], results: &ModeResults) -> bool {
    modes.iter().all(|&code| {
        results
            .get(code, word_id)
            .map(|verdict| verdict.is_correct)
            .unwrap_or(false)
    })
}

/// One result per word, in batch order
pub fn aggregate(words: &[Word], modes: &[ModeCode], results: &ModeResults) -> Vec<WordResult> {
    words
        .iter()
        .map(|word| WordResult {
            word_id: word.id,
            is_correct: is_correct_in_all_modes(word.id, modes, results),
        })
        .collect()
}

/// Every (mode, word) pair has a verdict
pub fn is_fully_covered(words: &[Word], modes: &[ModeCode], results: &ModeResults) -> bool {
    modes
        .iter()
        .all(|&code| results.covers(code, words.iter().map(|w| &w.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordVerdict;

    fn words() -> Vec<Word> {
        vec![
            Word::new(10, "a", "1"),
            Word::new(20, "b", "2"),
            Word::new(30, "c", "3"),
        ]
    }

    #[test]
    fn test_all_modes_must_agree() {
        let modes = [ModeCode::SelectCorrectAnswer, ModeCode::MakeWord];
        let mut results = ModeResults::new();
        for id in [10, 20, 30] {
            results.record_first(ModeCode::SelectCorrectAnswer, id, WordVerdict::answered(true));
        }
        results.record_first(ModeCode::MakeWord, 10, WordVerdict::answered(true));
        results.record_first(ModeCode::MakeWord, 20, WordVerdict::answered(false));
        results.record_first(ModeCode::MakeWord, 30, WordVerdict::answered(true));

        let aggregated = aggregate(&words(), &modes, &results);
        let flags: Vec<_> = aggregated.iter().map(|r| r.is_correct).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_missing_entry_counts_as_incorrect() {
        let modes = [ModeCode::WordToTranslation, ModeCode::MatchPairs];
        let mut results = ModeResults::new();
        results.record_first(ModeCode::WordToTranslation, 10, WordVerdict::seen());

        assert!(!is_correct_in_all_modes(10, &modes, &results));
        assert!(!is_fully_covered(&words(), &modes, &results));
    }

    #[test]
    fn test_order_follows_batch() {
        let modes = [ModeCode::WordToTranslation];
        let results = ModeResults::new();
        let ids: Vec<_> = aggregate(&words(), &modes, &results)
            .into_iter()
            .map(|r| r.word_id)
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
