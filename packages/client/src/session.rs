//! Async learning-session controller
//!
//! Owns the [`SessionOrchestrator`] behind a mutex, loads the word batch,
//! runs the delayed mode transition as a spawned task, and submits the
//! learning log once every mode is done. Submission is best effort: a
//! failure only adds a warning to the completion summary.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use serde::Serialize;
use slovo_core::{
    Advance, LetterOutcome, PairOutcome, Progress, SessionOrchestrator, SetupError, SlotOutcome,
    Stage, TransitionTicket, VocabularyId, WordId, WordVerdict,
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, LearningApi};
use crate::config::ClientConfig;
use crate::setup::StartRequest;

#[derive(Debug, Error)]
pub enum StartError {
    #[error("Please select a vocabulary")]
    NoVocabularySelected,
    #[error("Please select at least one learning mode")]
    NoModesSelected,
    #[error("No words in this vocabulary")]
    EmptyVocabulary,
    #[error("Failed to load words: {0}")]
    Fetch(#[from] ApiError),
    #[error("A learning session is already running")]
    AlreadyActive,
    #[error("Session setup was cancelled")]
    Cancelled,
}

impl From<SetupError> for StartError {
    fn from(err: SetupError) -> Self {
        match err {
            SetupError::NoWords => StartError::EmptyVocabulary,
            SetupError::NoModes => StartError::NoModesSelected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    SettingUp,
    InMode { mode_index: usize, word_index: usize },
    Transitioning { to_mode_index: usize },
    AllModesCompleted,
    Submitting,
    Completed { log_saved: bool },
}

/// Shown on the completion screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub total_words: usize,
    /// Words correct in every selected mode
    pub correct_words: usize,
    pub log_saved: bool,
    pub warning: Option<String>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Next,
    Previous,
    Exit,
}

impl KeyCommand {
    /// Arrow keys navigate, Escape exits; nothing fires while typing
    pub fn from_key(key: &str, focus_in_text_field: bool) -> Option<Self> {
        if focus_in_text_field {
            return None;
        }
        match key {
            "ArrowRight" => Some(KeyCommand::Next),
            "ArrowLeft" => Some(KeyCommand::Previous),
            "Escape" => Some(KeyCommand::Exit),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub transition_delay: Duration,
    pub shuffle_words: bool,
}

impl From<&ClientConfig> for SessionSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            transition_delay: config.transition_delay,
            shuffle_words: config.shuffle_words,
        }
    }
}

#[derive(Default)]
struct SessionState {
    /// Bumped on start and exit; async continuations from an older value are dropped
    generation: u64,
    setting_up: bool,
    vocabulary_id: Option<VocabularyId>,
    orchestrator: Option<SessionOrchestrator>,
    submitting: bool,
    summary: Option<CompletionSummary>,
}

impl SessionState {
    fn is_busy(&self) -> bool {
        self.setting_up || self.orchestrator.is_some() || self.summary.is_some()
    }

    fn phase(&self) -> SessionPhase {
        if let Some(summary) = &self.summary {
            return SessionPhase::Completed {
                log_saved: summary.log_saved,
            };
        }
        if self.submitting {
            return SessionPhase::Submitting;
        }
        match &self.orchestrator {
            Some(orchestrator) => match orchestrator.stage() {
                Stage::InMode {
                    mode_index,
                    word_index,
                } => SessionPhase::InMode {
                    mode_index,
                    word_index,
                },
                Stage::Transitioning { to_mode_index } => {
                    SessionPhase::Transitioning { to_mode_index }
                }
                Stage::AllModesCompleted => SessionPhase::AllModesCompleted,
            },
            None if self.setting_up => SessionPhase::SettingUp,
            None => SessionPhase::Idle,
        }
    }
}

pub struct LearningSession<A> {
    api: A,
    settings: SessionSettings,
    state: Arc<Mutex<SessionState>>,
    transition_task: Mutex<Option<JoinHandle<()>>>,
}

impl<A: LearningApi> LearningSession<A> {
    pub fn new(api: A, settings: SessionSettings) -> Self {
        Self {
            api,
            settings,
            state: Arc::new(Mutex::new(SessionState::default())),
            transition_task: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ==================== View ====================

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase()
    }

    pub fn with_orchestrator<R>(&self, f: impl FnOnce(&SessionOrchestrator) -> R) -> Option<R> {
        self.state.lock().orchestrator.as_ref().map(f)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.with_orchestrator(SessionOrchestrator::progress)
    }

    pub fn can_go_previous(&self) -> bool {
        self.with_orchestrator(SessionOrchestrator::can_go_previous)
            .unwrap_or(false)
    }

    pub fn is_next_disabled(&self) -> bool {
        self.with_orchestrator(SessionOrchestrator::is_next_disabled)
            .unwrap_or(true)
    }

    pub fn summary(&self) -> Option<CompletionSummary> {
        self.state.lock().summary.clone()
    }

    // ==================== Lifecycle ====================

    /// Setup errors block the start and leave no partial session behind
    pub async fn start(&self, request: StartRequest) -> Result<(), StartError> {
        let vocabulary_id = request
            .vocabulary_id
            .ok_or(StartError::NoVocabularySelected)?;
        if request.modes.is_empty() {
            return Err(StartError::NoModesSelected);
        }

        let generation = {
            let mut state = self.state.lock();
            if state.is_busy() {
                return Err(StartError::AlreadyActive);
            }
            state.generation += 1;
            state.setting_up = true;
            state.generation
        };

        let word_count = request.word_count.max(1);
        let fetched = self.api.fetch_words(vocabulary_id, word_count).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(vocabulary_id, "session exited while words were loading");
            return Err(StartError::Cancelled);
        }
        state.setting_up = false;

        let mut words = fetched.map_err(|err| {
            warn!(vocabulary_id, error = %err, "failed to load words");
            StartError::Fetch(err)
        })?;
        if self.settings.shuffle_words {
            words.shuffle(&mut rand::thread_rng());
        }
        words.truncate(word_count as usize);

        let orchestrator = SessionOrchestrator::start(words, request.modes)?;
        state.vocabulary_id = Some(vocabulary_id);
        state.orchestrator = Some(orchestrator);
        Ok(())
    }

    /// Leave the session from any phase; a pending transition is cancelled
    pub fn exit(&self) {
        if let Some(handle) = self.transition_task.lock().take() {
            handle.abort();
        }
        let mut state = self.state.lock();
        let generation = state.generation + 1;
        *state = SessionState {
            generation,
            ..SessionState::default()
        };
        info!("learning session exited");
    }

    // ==================== Navigation ====================

    pub async fn next(&self) -> Advance {
        let advance = self
            .with_orchestrator_mut(SessionOrchestrator::advance)
            .unwrap_or(Advance::Ignored);
        self.follow(&advance).await;
        advance
    }

    pub fn previous(&self) -> bool {
        self.with_orchestrator_mut(SessionOrchestrator::retreat)
            .unwrap_or(false)
    }

    pub async fn handle_key(&self, key: &str, focus_in_text_field: bool) -> Option<KeyCommand> {
        let command = KeyCommand::from_key(key, focus_in_text_field)?;
        match command {
            KeyCommand::Next => {
                self.next().await;
            }
            KeyCommand::Previous => {
                self.previous();
            }
            KeyCommand::Exit => self.exit(),
        }
        Some(command)
    }

    // ==================== Answers ====================

    pub fn flip_card(&self) -> Option<bool> {
        self.with_orchestrator_mut(SessionOrchestrator::flip_card)
            .flatten()
    }

    pub fn select_answer(&self, option: &str) -> Option<WordVerdict> {
        self.with_orchestrator_mut(|o| o.select_answer(option))
            .flatten()
    }

    pub fn pick_letter(&self, letter_id: usize) -> LetterOutcome {
        self.with_orchestrator_mut(|o| o.pick_letter(letter_id))
            .unwrap_or(LetterOutcome::Ignored)
    }

    pub fn return_letter(&self, slot: usize) -> SlotOutcome {
        self.with_orchestrator_mut(|o| o.return_letter(slot))
            .unwrap_or(SlotOutcome::Ignored)
    }

    pub fn select_left(&self, word_id: WordId) -> PairOutcome {
        self.with_orchestrator_mut(|o| o.select_left(word_id))
            .unwrap_or(PairOutcome::Ignored)
    }

    pub fn clear_pair_selection(&self) {
        self.with_orchestrator_mut(SessionOrchestrator::clear_pair_selection);
    }

    /// The last match ends the mode without a "next" press
    pub async fn select_right(&self, word_id: WordId) -> PairOutcome {
        let (outcome, advance) = self
            .with_orchestrator_mut(|o| o.select_right(word_id))
            .unwrap_or((PairOutcome::Ignored, Advance::Ignored));
        self.follow(&advance).await;
        outcome
    }

    // ==================== Internals ====================

    fn with_orchestrator_mut<R>(&self, f: impl FnOnce(&mut SessionOrchestrator) -> R) -> Option<R> {
        self.state.lock().orchestrator.as_mut().map(f)
    }

    async fn follow(&self, advance: &Advance) {
        match advance {
            Advance::Transition(ticket) => self.schedule_transition(ticket.clone()),
            Advance::Completed => self.submit().await,
            Advance::Ignored | Advance::NextWord { .. } => {}
        }
    }

    fn schedule_transition(&self, ticket: TransitionTicket) {
        let shared = Arc::clone(&self.state);
        let delay = self.settings.transition_delay;
        info!(
            next_mode = %ticket.next_mode.code,
            delay_ms = delay.as_millis() as u64,
            "scheduling mode transition"
        );

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.lock();
            if let Some(orchestrator) = state.orchestrator.as_mut() {
                orchestrator.complete_transition(&ticket);
            }
        });

        if let Some(previous) = self.transition_task.lock().replace(handle) {
            previous.abort();
        }
    }

    async fn submit(&self) {
        let (generation, log) = {
            let mut state = self.state.lock();
            let Some(vocabulary_id) = state.vocabulary_id else {
                return;
            };
            let Some(log) = state
                .orchestrator
                .as_mut()
                .and_then(|o| o.take_learning_log(vocabulary_id))
            else {
                return;
            };
            state.submitting = true;
            (state.generation, log)
        };

        let (log_saved, warning) = match self.api.submit_learning_log(&log).await {
            Ok(()) => {
                info!(
                    vocabulary_id = log.vocabulary_id,
                    words = log.words.len(),
                    correct = log.correct_count(),
                    "learning log saved"
                );
                (true, None)
            }
            Err(err) => {
                warn!(error = %err, "failed to save learning log");
                (false, Some(format!("Progress could not be saved: {err}")))
            }
        };

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!("session exited during log submission");
            return;
        }
        state.submitting = false;
        state.summary = Some(CompletionSummary {
            total_words: log.words.len(),
            correct_words: log.correct_count(),
            log_saved,
            warning,
            finished_at: Utc::now(),
        });
    }
}

impl<A> Drop for LearningSession<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.transition_task.get_mut().take() {
            handle.abort();
        }
    }
}
