//! Match-pairs board
//!
//! Left column holds the words in batch order, right column the translations
//! shuffled once per pass. A left pick followed by a right pick either
//! matches (both leave the board) or mismatches (both ids become sticky
//! errors, the left pick stays active for a retry).

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{MatchedPair, Word, WordId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairItem {
    pub id: WordId,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    /// Unknown or already matched item, or no left pick yet
    Ignored,
    /// Left item is now the active pick
    Selected(WordId),
    Mismatch { left: WordId, right: WordId },
    Matched(MatchedPair),
    /// The last pair was matched; carries every pair in match order
    AllMatched(Vec<MatchedPair>),
}

/// Which half of a pair the user is expected to pick next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairStep {
    ChooseWord,
    ChooseTranslation,
}

#[derive(Clone, Debug)]
pub struct MatchPairsBoard {
    left: Vec<PairItem>,
    right: Vec<PairItem>,
    selected_left: Option<WordId>,
    errored: HashSet<WordId>,
    matched: Vec<MatchedPair>,
    completion_emitted: bool,
}

impl MatchPairsBoard {
    pub fn new<R: Rng + ?Sized>(words: &[Word], rng: &mut R) -> Self {
        let left = words
            .iter()
            .map(|w| PairItem {
                id: w.id,
                text: w.word.clone(),
            })
            .collect();
        let mut right: Vec<PairItem> = words
            .iter()
            .map(|w| PairItem {
                id: w.id,
                text: w.translation.clone(),
            })
            .collect();
        right.shuffle(rng);

        Self {
            left,
            right,
            selected_left: None,
            errored: HashSet::new(),
            matched: Vec::new(),
            completion_emitted: false,
        }
    }

    fn is_matched(&self, id: WordId) -> bool {
        self.matched.iter().any(|p| p.id == id)
    }

    pub fn remaining_left(&self) -> impl Iterator<Item = &PairItem> {
        self.left.iter().filter(move |item| !self.is_matched(item.id))
    }

    pub fn remaining_right(&self) -> impl Iterator<Item = &PairItem> {
        self.right.iter().filter(move |item| !self.is_matched(item.id))
    }

    pub fn selected_left(&self) -> Option<WordId> {
        self.selected_left
    }

    pub fn step(&self) -> PairStep {
        if self.selected_left.is_some() {
            PairStep::ChooseTranslation
        } else {
            PairStep::ChooseWord
        }
    }

    pub fn has_ever_errored(&self, id: WordId) -> bool {
        self.errored.contains(&id)
    }

    pub fn matched(&self) -> &[MatchedPair] {
        &self.matched
    }

    /// `(matched, total)` for the progress line
    pub fn progress(&self) -> (usize, usize) {
        (self.matched.len(), self.left.len())
    }

    pub fn is_complete(&self) -> bool {
        !self.left.is_empty() && self.matched.len() == self.left.len()
    }

    pub fn select_left(&mut self, id: WordId) -> PairOutcome {
        if self.is_matched(id) || !self.left.iter().any(|item| item.id == id) {
            return PairOutcome::Ignored;
        }
        self.selected_left = Some(id);
        PairOutcome::Selected(id)
    }

    /// "Change" button: drop the active left pick
    pub fn clear_selection(&mut self) {
        self.selected_left = None;
    }

    pub fn select_right(&mut self, id: WordId) -> PairOutcome {
        let Some(left) = self.selected_left else {
            return PairOutcome::Ignored;
        };
        if self.is_matched(id) || !self.right.iter().any(|item| item.id == id) {
            return PairOutcome::Ignored;
        }

        if left != id {
            self.errored.insert(left);
            self.errored.insert(id);
            return PairOutcome::Mismatch { left, right: id };
        }

        let pair = MatchedPair {
            id,
            has_error: self.errored.contains(&id),
        };
        self.matched.push(pair);
        self.selected_left = None;

        if self.is_complete() && !self.completion_emitted {
            self.completion_emitted = true;
            return PairOutcome::AllMatched(self.matched.clone());
        }
        PairOutcome::Matched(pair)
    }
}
