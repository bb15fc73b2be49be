//! Per-mode interaction state
//!
//! One variant per learning-mode contract, each holding only what its
//! scorer needs for the current pass. The orchestrator rebuilds the driver
//! on every mode entry, which is what clears per-mode caches.

use rand::Rng;

use crate::make_word::MakeWordBoard;
use crate::match_pairs::MatchPairsBoard;
use crate::options::OptionCache;
use crate::types::{ModeCode, Word};

/// Which side of the card faces the user first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardDirection {
    WordFirst,
    TranslationFirst,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFaces<'a> {
    pub front: &'a str,
    pub back: &'a str,
    pub flipped: bool,
}

#[derive(Clone, Debug)]
pub enum ModeDriver {
    FlipCard {
        direction: CardDirection,
        flipped: bool,
    },
    SelectCorrectAnswer {
        options: OptionCache,
    },
    MakeWord {
        board: Option<MakeWordBoard>,
    },
    MatchPairs {
        board: MatchPairsBoard,
    },
}

impl ModeDriver {
    /// Fresh state for a mode pass over `words`
    pub fn enter<R: Rng + ?Sized>(code: ModeCode, words: &[Word], rng: &mut R) -> Self {
        match code {
            ModeCode::WordToTranslation => ModeDriver::FlipCard {
                direction: CardDirection::WordFirst,
                flipped: false,
            },
            ModeCode::TranslationToWord => ModeDriver::FlipCard {
                direction: CardDirection::TranslationFirst,
                flipped: false,
            },
            ModeCode::SelectCorrectAnswer => ModeDriver::SelectCorrectAnswer {
                options: OptionCache::new(),
            },
            ModeCode::MakeWord => ModeDriver::MakeWord { board: None },
            ModeCode::MatchPairs => ModeDriver::MatchPairs {
                board: MatchPairsBoard::new(words, rng),
            },
        }
    }

    /// Prepare the interaction for `word`, which just became current
    pub fn present<R: Rng + ?Sized>(&mut self, word: &Word, words: &[Word], rng: &mut R) {
        match self {
            ModeDriver::FlipCard { flipped, .. } => *flipped = false,
            ModeDriver::SelectCorrectAnswer { options } => {
                options.get_or_generate(word, words, rng);
            }
            ModeDriver::MakeWord { board } => *board = Some(MakeWordBoard::new(&word.word, rng)),
            ModeDriver::MatchPairs { .. } => {}
        }
    }

    pub fn faces<'a>(&self, word: &'a Word) -> Option<CardFaces<'a>> {
        let ModeDriver::FlipCard { direction, flipped } = self else {
            return None;
        };
        let (front, back) = match direction {
            CardDirection::WordFirst => (word.word.as_str(), word.translation.as_str()),
            CardDirection::TranslationFirst => (word.translation.as_str(), word.word.as_str()),
        };
        Some(CardFaces {
            front,
            back,
            flipped: *flipped,
        })
    }

    pub fn flip(&mut self) -> Option<bool> {
        match self {
            ModeDriver::FlipCard { flipped, .. } => {
                *flipped = !*flipped;
                Some(*flipped)
            }
            _ => None,
        }
    }

    pub fn option_cache(&self) -> Option<&OptionCache> {
        match self {
            ModeDriver::SelectCorrectAnswer { options } => Some(options),
            _ => None,
        }
    }

    pub fn make_word_board(&self) -> Option<&MakeWordBoard> {
        match self {
            ModeDriver::MakeWord { board } => board.as_ref(),
            _ => None,
        }
    }

    pub fn make_word_board_mut(&mut self) -> Option<&mut MakeWordBoard> {
        match self {
            ModeDriver::MakeWord { board } => board.as_mut(),
            _ => None,
        }
    }

    pub fn match_board(&self) -> Option<&MatchPairsBoard> {
        match self {
            ModeDriver::MatchPairs { board } => Some(board),
            _ => None,
        }
    }

    pub fn match_board_mut(&mut self) -> Option<&mut MatchPairsBoard> {
        match self {
            ModeDriver::MatchPairs { board } => Some(board),
            _ => None,
        }
    }
}
