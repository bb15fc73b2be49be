//! # slovo-core - multi-mode vocabulary drill engine
//!
//! The pure logic of a learning session, with no network or UI:
//!
//! - **Orchestration** - walks `modes × words` row by row, with a transition between modes
//! - **Scoring** - verdict rules for flip cards, multiple choice, make-word and match-pairs
//! - **Aggregation** - a word is correct only if correct in every mode; missing verdicts fail
//!
//! ## Modules
//!
//! - [`orchestrator`] - session state machine (cursor, transition tickets, results)
//! - [`mode`] - per-mode interaction state
//! - [`options`] - multiple-choice options and their cache
//! - [`make_word`] - letter assembly board
//! - [`match_pairs`] - pair matching board
//! - [`results`] - verdicts stored per mode
//! - [`aggregate`] - cross-mode aggregation
//! - [`languages`] - language codes and display names
//! - [`types`] - shared types and constants
//!
//! ## Example
//!
//! ```rust
//! use slovo_core::{Advance, LearningMode, ModeCode, SessionOrchestrator, Word};
//!
//! let words = vec![Word::new(1, "Hund", "dog"), Word::new(2, "Katze", "cat")];
//! let modes = vec![LearningMode::new(1, ModeCode::WordToTranslation, "Word → Translation")];
//!
//! let mut session = SessionOrchestrator::start(words, modes).unwrap();
//! assert_eq!(session.advance(), Advance::NextWord { word_index: 1 });
//! assert_eq!(session.advance(), Advance::Completed);
//!
//! let results = session.take_results().unwrap();
//! assert!(results.iter().all(|r| r.is_correct));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod types;
pub mod languages;
pub mod results;
pub mod options;
pub mod make_word;
pub mod match_pairs;
pub mod mode;
pub mod aggregate;
pub mod orchestrator;

// ============================================================================
// Re-exports
// ============================================================================

/// All public types
pub use types::*;

pub use aggregate::{aggregate, is_correct_in_all_modes, is_fully_covered};
pub use languages::language_name;
pub use make_word::{Letter, LetterOutcome, MakeWordBoard, SlotOutcome};
pub use match_pairs::{MatchPairsBoard, PairItem, PairOutcome, PairStep};
pub use mode::{CardDirection, CardFaces, ModeDriver};
pub use options::{generate_options, OptionCache};
pub use orchestrator::{Advance, Progress, SessionOrchestrator, SetupError, Stage, TransitionTicket};
pub use results::{ModeResults, VerdictMap};
