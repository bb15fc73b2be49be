//! Multi-mode session orchestrator
//!
//! Walks `modes × words` in row-major order: every word of mode 0, then
//! every word of mode 1, and so on. Each (mode, word) pair receives exactly
//! one verdict. Between two modes the orchestrator parks in a transitioning
//! state until the caller redeems the [`TransitionTicket`] it handed out,
//! which lets the caller own the delay (and cancel it).
//!
//! Words and modes are fixed at start; only the two cursors, the results
//! and the per-mode driver change afterwards.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, is_fully_covered};
use crate::make_word::{LetterOutcome, MakeWordBoard, SlotOutcome};
use crate::match_pairs::{MatchPairsBoard, PairOutcome};
use crate::mode::{CardFaces, ModeDriver};
use crate::results::{ModeResults, VerdictMap};
use crate::types::{
    Contract, LearningLog, LearningMode, MatchedPair, ModeCode, VocabularyId, Word, WordId,
    WordResult, WordVerdict,
};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("No words to learn in this vocabulary")]
    NoWords,
    #[error("Please select at least one learning mode")]
    NoModes,
}

/// Handed out when the last word of a non-final mode is done
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTicket {
    pub session_id: u64,
    pub to_mode_index: usize,
    pub next_mode: LearningMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Precondition unmet, or transitioning / finished
    Ignored,
    NextWord { word_index: usize },
    Transition(TransitionTicket),
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    InMode { mode_index: usize, word_index: usize },
    Transitioning { to_mode_index: usize },
    AllModesCompleted,
}

/// Header data: "Mode i/n: name" and "k / N"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub mode_index: usize,
    pub total_modes: usize,
    pub mode_name: String,
    pub word_index: usize,
    pub total_words: usize,
    /// Match-pairs shows all words at once and hides the counter
    pub show_word_counter: bool,
}

#[derive(Debug)]
pub struct SessionOrchestrator {
    session_id: u64,
    words: Vec<Word>,
    modes: Vec<LearningMode>,
    current_mode_index: usize,
    current_word_index: usize,
    results: ModeResults,
    is_transitioning: bool,
    all_modes_completed: bool,
    aggregated: bool,
    driver: ModeDriver,
    rng: ChaCha8Rng,
}

impl SessionOrchestrator {
    /// Start a session; modes are ordered by ascending id, duplicates dropped
    pub fn start(words: Vec<Word>, modes: Vec<LearningMode>) -> Result<Self, SetupError> {
        Self::start_with_rng(words, modes, ChaCha8Rng::from_entropy())
    }

    /// Same as [`start`](Self::start) with reproducible shuffles (for testing)
    pub fn start_with_seed(
        words: Vec<Word>,
        modes: Vec<LearningMode>,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::start_with_rng(words, modes, ChaCha8Rng::seed_from_u64(seed))
    }

    fn start_with_rng(
        words: Vec<Word>,
        mut modes: Vec<LearningMode>,
        mut rng: ChaCha8Rng,
    ) -> Result<Self, SetupError> {
        if modes.is_empty() {
            return Err(SetupError::NoModes);
        }
        if words.is_empty() {
            return Err(SetupError::NoWords);
        }

        modes.sort_by_key(|m| m.id);
        let mut seen = HashSet::new();
        modes.retain(|m| seen.insert(m.code));

        let driver = ModeDriver::enter(modes[0].code, &words, &mut rng);
        let session_id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);

        let mut orchestrator = Self {
            session_id,
            words,
            modes,
            current_mode_index: 0,
            current_word_index: 0,
            results: ModeResults::new(),
            is_transitioning: false,
            all_modes_completed: false,
            aggregated: false,
            driver,
            rng,
        };
        orchestrator.present_current();

        info!(
            session_id,
            words = orchestrator.words.len(),
            modes = ?orchestrator.mode_codes(),
            "learning session started"
        );
        Ok(orchestrator)
    }

    // ==================== Accessors ====================

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn modes(&self) -> &[LearningMode] {
        &self.modes
    }

    pub fn mode_codes(&self) -> Vec<ModeCode> {
        self.modes.iter().map(|m| m.code).collect()
    }

    pub fn current_mode(&self) -> &LearningMode {
        &self.modes[self.current_mode_index]
    }

    pub fn current_word(&self) -> &Word {
        &self.words[self.current_word_index]
    }

    pub fn current_mode_index(&self) -> usize {
        self.current_mode_index
    }

    pub fn current_word_index(&self) -> usize {
        self.current_word_index
    }

    pub fn results(&self) -> &ModeResults {
        &self.results
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn all_modes_completed(&self) -> bool {
        self.all_modes_completed
    }

    pub fn stage(&self) -> Stage {
        if self.all_modes_completed {
            Stage::AllModesCompleted
        } else if self.is_transitioning {
            Stage::Transitioning {
                to_mode_index: self.current_mode_index + 1,
            }
        } else {
            Stage::InMode {
                mode_index: self.current_mode_index,
                word_index: self.current_word_index,
            }
        }
    }

    pub fn progress(&self) -> Progress {
        let mode = self.current_mode();
        Progress {
            mode_index: self.current_mode_index,
            total_modes: self.modes.len(),
            mode_name: mode.name.clone(),
            word_index: self.current_word_index,
            total_words: self.words.len(),
            show_word_counter: mode.code.contract() != Contract::PairMatching,
        }
    }

    pub fn current_verdict(&self) -> Option<&WordVerdict> {
        self.results
            .get(self.current_mode().code, self.current_word().id)
    }

    pub fn card_faces(&self) -> Option<CardFaces<'_>> {
        self.driver.faces(self.current_word())
    }

    pub fn current_options(&self) -> Option<&[String]> {
        self.driver.option_cache()?.get(self.current_word().id)
    }

    pub fn make_word_board(&self) -> Option<&MakeWordBoard> {
        self.driver.make_word_board()
    }

    pub fn match_board(&self) -> Option<&MatchPairsBoard> {
        self.driver.match_board()
    }

    fn is_locked(&self) -> bool {
        self.is_transitioning || self.all_modes_completed
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_locked()
            && self.current_mode().code.has_linear_navigation()
            && self.current_word_index > 0
    }

    /// Quiz modes must be answered before moving on
    pub fn is_next_disabled(&self) -> bool {
        if self.is_locked() {
            return true;
        }
        match self.current_mode().code.contract() {
            Contract::FlipCard => false,
            Contract::PairMatching => true,
            Contract::MultipleChoice | Contract::LetterAssembly => self
                .current_verdict()
                .map_or(true, |verdict| !verdict.is_answered),
        }
    }

    // ==================== Navigation ====================

    /// User is done with the current word
    pub fn advance(&mut self) -> Advance {
        if self.is_locked() {
            debug!(session_id = self.session_id, "advance ignored while locked");
            return Advance::Ignored;
        }

        let code = self.current_mode().code;
        let word_id = self.current_word().id;
        if code.allows_passive_advance() {
            self.results.record_first(code, word_id, WordVerdict::seen());
        } else if code.contract() == Contract::PairMatching
            || self.results.get(code, word_id).is_none()
        {
            return Advance::Ignored;
        }

        self.step_forward()
    }

    /// Back one word inside the current mode
    pub fn retreat(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current_word_index -= 1;
        self.present_current();
        true
    }

    /// Redeem the ticket from [`Advance::Transition`] once the delay elapsed
    ///
    /// Stale tickets (other session, already redeemed) are rejected.
    pub fn complete_transition(&mut self, ticket: &TransitionTicket) -> bool {
        if !self.is_transitioning
            || ticket.session_id != self.session_id
            || ticket.to_mode_index != self.current_mode_index + 1
        {
            debug!(
                session_id = self.session_id,
                ticket_session = ticket.session_id,
                "stale transition ticket ignored"
            );
            return false;
        }

        self.current_mode_index = ticket.to_mode_index;
        self.current_word_index = 0;
        self.driver = ModeDriver::enter(self.modes[self.current_mode_index].code, &self.words, &mut self.rng);
        self.is_transitioning = false;
        self.present_current();

        info!(
            session_id = self.session_id,
            mode = %self.current_mode().code,
            mode_index = self.current_mode_index,
            "entered next learning mode"
        );
        true
    }

    fn step_forward(&mut self) -> Advance {
        if self.current_word_index + 1 < self.words.len() {
            self.current_word_index += 1;
            self.present_current();
            return Advance::NextWord {
                word_index: self.current_word_index,
            };
        }
        self.finish_mode()
    }

    fn finish_mode(&mut self) -> Advance {
        let next = self.current_mode_index + 1;
        if next < self.modes.len() {
            self.is_transitioning = true;
            let next_mode = self.modes[next].clone();
            info!(
                session_id = self.session_id,
                next_mode = %next_mode.code,
                "mode finished, transitioning"
            );
            return Advance::Transition(TransitionTicket {
                session_id: self.session_id,
                to_mode_index: next,
                next_mode,
            });
        }

        self.all_modes_completed = true;
        info!(session_id = self.session_id, "all learning modes completed");
        Advance::Completed
    }

    fn present_current(&mut self) {
        let word = &self.words[self.current_word_index];
        self.driver.present(word, &self.words, &mut self.rng);

        // an empty word's board is complete on creation
        if let Some(is_correct) = self.driver.make_word_board().and_then(MakeWordBoard::verdict) {
            let (code, word_id) = (self.current_mode().code, self.current_word().id);
            self.results
                .record_first(code, word_id, WordVerdict::answered(is_correct));
        }
    }

    // ==================== Scoring ====================

    /// Quiz verdict for the current word; the first one sticks
    pub fn record_verdict(&mut self, word_id: WordId, verdict: WordVerdict) -> bool {
        if self.is_locked() {
            return false;
        }
        let code = self.current_mode().code;
        if code.contract() == Contract::PairMatching {
            return false;
        }
        if word_id != self.current_word().id {
            warn!(
                session_id = self.session_id,
                word_id,
                current = self.current_word().id,
                "verdict for a word that is not being presented"
            );
            return false;
        }
        self.results.record_first(code, word_id, verdict)
    }

    /// Whole-mode verdicts from match-pairs; runs the end-of-mode logic
    pub fn record_batch_verdicts(&mut self, pairs: &[MatchedPair]) -> Advance {
        if self.is_locked() {
            return Advance::Ignored;
        }
        let code = self.current_mode().code;
        if code.contract() != Contract::PairMatching || self.results.mode(code).is_some() {
            return Advance::Ignored;
        }

        let known: HashSet<WordId> = self.words.iter().map(|w| w.id).collect();
        let map: VerdictMap = pairs
            .iter()
            .filter(|pair| known.contains(&pair.id))
            .map(|pair| (pair.id, WordVerdict::answered(!pair.has_error)))
            .collect();
        self.results.replace_mode(code, map);

        self.finish_mode()
    }

    pub fn flip_card(&mut self) -> Option<bool> {
        if self.is_locked() {
            return None;
        }
        self.driver.flip()
    }

    /// Multiple choice pick; `None` when the option is unknown or already answered
    pub fn select_answer(&mut self, option: &str) -> Option<WordVerdict> {
        if self.is_locked() {
            return None;
        }
        let word = self.current_word();
        let offered = self
            .current_options()?
            .iter()
            .any(|candidate| candidate == option);
        if !offered {
            return None;
        }

        let word_id = word.id;
        let verdict = WordVerdict::selected(option, option == word.translation);
        self.record_verdict(word_id, verdict.clone())
            .then_some(verdict)
    }

    pub fn pick_letter(&mut self, letter_id: usize) -> LetterOutcome {
        if self.is_locked() {
            return LetterOutcome::Ignored;
        }
        let Some(board) = self.driver.make_word_board_mut() else {
            return LetterOutcome::Ignored;
        };

        let outcome = board.pick(letter_id);
        if let LetterOutcome::Completed { is_correct, errors } = outcome {
            let word_id = self.current_word().id;
            debug!(session_id = self.session_id, word_id, errors, "word assembled");
            self.record_verdict(word_id, WordVerdict::answered(is_correct));
        }
        outcome
    }

    pub fn return_letter(&mut self, slot: usize) -> SlotOutcome {
        if self.is_locked() {
            return SlotOutcome::Ignored;
        }
        match self.driver.make_word_board_mut() {
            Some(board) => board.return_slot(slot, &mut self.rng),
            None => SlotOutcome::Ignored,
        }
    }

    pub fn select_left(&mut self, word_id: WordId) -> PairOutcome {
        if self.is_locked() {
            return PairOutcome::Ignored;
        }
        match self.driver.match_board_mut() {
            Some(board) => board.select_left(word_id),
            None => PairOutcome::Ignored,
        }
    }

    pub fn clear_pair_selection(&mut self) {
        if let Some(board) = self.driver.match_board_mut() {
            board.clear_selection();
        }
    }

    /// Right-column pick; the final match submits the mode and advances
    pub fn select_right(&mut self, word_id: WordId) -> (PairOutcome, Advance) {
        if self.is_locked() {
            return (PairOutcome::Ignored, Advance::Ignored);
        }
        let Some(board) = self.driver.match_board_mut() else {
            return (PairOutcome::Ignored, Advance::Ignored);
        };

        let outcome = board.select_right(word_id);
        let advance = match &outcome {
            PairOutcome::AllMatched(pairs) => self.record_batch_verdicts(pairs),
            _ => Advance::Ignored,
        };
        (outcome, advance)
    }

    // ==================== Aggregation ====================

    /// Per-word verdicts across all modes; yields `Some` exactly once
    pub fn take_results(&mut self) -> Option<Vec<WordResult>> {
        if !self.all_modes_completed || self.aggregated {
            return None;
        }
        self.aggregated = true;

        let codes = self.mode_codes();
        if !is_fully_covered(&self.words, &codes, &self.results) {
            warn!(
                session_id = self.session_id,
                "results incomplete, missing entries count as incorrect"
            );
        }
        Some(aggregate(&self.words, &codes, &self.results))
    }

    pub fn take_learning_log(&mut self, vocabulary_id: VocabularyId) -> Option<LearningLog> {
        let words = self.take_results()?;
        Some(LearningLog {
            vocabulary_id,
            learning_mode_ids: self.modes.iter().map(|m| m.id).collect(),
            words,
        })
    }
}
