//! Make-word mode
//!
//! The word is split into shuffled letters that fill the slots left to right:
//! - a right letter fills the leftmost empty slot and leaves the pool
//! - a wrong letter bumps the error count (capped at 3) and places nothing
//! - tapping a filled slot returns its letter to the pool, which is reshuffled
//!
//! The board completes once every slot is filled; errors only affect the verdict.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::MAKE_WORD_ERROR_LIMIT;

/// One letter; `id` is its position in the word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
    pub id: usize,
    pub ch: char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterOutcome {
    /// Placed into the given slot
    Placed { slot: usize },
    /// Does not fit the next slot
    Wrong { errors: u32 },
    /// The last slot was filled
    Completed { is_correct: bool, errors: u32 },
    /// Board finished or letter not in the pool
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotOutcome {
    Returned(Letter),
    Ignored,
}

#[derive(Clone, Debug)]
pub struct MakeWordBoard {
    target: Vec<char>,
    slots: Vec<Option<Letter>>,
    pool: Vec<Letter>,
    errors: u32,
    completed: bool,
}

impl MakeWordBoard {
    pub fn new<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Self {
        let target: Vec<char> = word.chars().collect();
        let mut pool: Vec<Letter> = target
            .iter()
            .enumerate()
            .map(|(id, &ch)| Letter { id, ch })
            .collect();
        pool.shuffle(rng);

        Self {
            slots: vec![None; target.len()],
            // nothing to fill
            completed: target.is_empty(),
            target,
            pool,
            errors: 0,
        }
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn slots(&self) -> &[Option<Letter>] {
        &self.slots
    }

    pub fn pool(&self) -> &[Letter] {
        &self.pool
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Verdict once complete: correct with fewer than 3 errors
    pub fn verdict(&self) -> Option<bool> {
        self.completed.then(|| self.errors < MAKE_WORD_ERROR_LIMIT)
    }

    /// Pick a letter from the pool
    pub fn pick(&mut self, letter_id: usize) -> LetterOutcome {
        if self.completed {
            return LetterOutcome::Ignored;
        }
        let Some(pool_index) = self.pool.iter().position(|l| l.id == letter_id) else {
            return LetterOutcome::Ignored;
        };
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            return LetterOutcome::Ignored;
        };

        let letter = self.pool[pool_index];
        if letter.ch != self.target[slot] {
            self.errors = (self.errors + 1).min(MAKE_WORD_ERROR_LIMIT);
            return LetterOutcome::Wrong {
                errors: self.errors,
            };
        }

        self.pool.remove(pool_index);
        self.slots[slot] = Some(letter);

        if self.slots.iter().all(Option::is_some) {
            self.completed = true;
            return LetterOutcome::Completed {
                is_correct: self.errors < MAKE_WORD_ERROR_LIMIT,
                errors: self.errors,
            };
        }

        LetterOutcome::Placed { slot }
    }

    /// Return a placed letter to the pool
    pub fn return_slot<R: Rng + ?Sized>(&mut self, slot: usize, rng: &mut R) -> SlotOutcome {
        if self.completed {
            return SlotOutcome::Ignored;
        }
        let Some(letter) = self.slots.get_mut(slot).and_then(Option::take) else {
            return SlotOutcome::Ignored;
        };

        self.pool.push(letter);
        self.pool.shuffle(rng);
        SlotOutcome::Returned(letter)
    }
}
