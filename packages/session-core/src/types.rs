//! Common Types and Constants
//!
//! Shared data structures used by the orchestrator, the scorers and the
//! aggregator. Field names follow the backend's JSON contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::languages::language_name;

// ==================== Constants ====================

/// Wrong letter placements tolerated before a make-word answer counts as incorrect
pub const MAKE_WORD_ERROR_LIMIT: u32 = 3;

/// Upper bound on distractors offered next to the correct translation
pub const MAX_WRONG_OPTIONS: usize = 3;

pub type WordId = i64;
pub type ModeId = i64;
pub type VocabularyId = i64;

// ==================== Vocabulary ====================

/// A named word collection for one source → target language pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub id: VocabularyId,
    pub name: String,
    pub language_from: String,
    pub language_to: String,
}

impl Vocabulary {
    /// Display label used by the vocabulary picker, e.g. `Films (English → Russian)`
    pub fn label(&self) -> String {
        format!(
            "{} ({} → {})",
            self.name,
            language_name(&self.language_from),
            language_name(&self.language_to)
        )
    }
}

// ==================== Words ====================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    #[default]
    New,
    Learning,
    Learned,
}

/// Immutable snapshot of a backend word entity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub status: WordStatus,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Word {
    pub fn new(id: WordId, word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id,
            word: word.into(),
            translation: translation.into(),
            status: WordStatus::New,
            context: None,
            examples: Vec::new(),
        }
    }
}

// ==================== Learning Modes ====================

/// How a mode collects its verdicts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contract {
    /// Two-sided card, no right/wrong signal
    FlipCard,
    /// One option out of several
    MultipleChoice,
    /// Letter-by-letter assembly into slots
    LetterAssembly,
    /// All word ↔ translation pairs at once
    PairMatching,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeCode {
    WordToTranslation,
    TranslationToWord,
    SelectCorrectAnswer,
    MatchPairs,
    MakeWord,
}

impl ModeCode {
    pub const ALL: [ModeCode; 5] = [
        ModeCode::WordToTranslation,
        ModeCode::TranslationToWord,
        ModeCode::SelectCorrectAnswer,
        ModeCode::MatchPairs,
        ModeCode::MakeWord,
    ];

    /// Dense index, used as the slot in [`crate::ModeResults`]
    pub const fn index(self) -> usize {
        match self {
            ModeCode::WordToTranslation => 0,
            ModeCode::TranslationToWord => 1,
            ModeCode::SelectCorrectAnswer => 2,
            ModeCode::MatchPairs => 3,
            ModeCode::MakeWord => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ModeCode::WordToTranslation => "word-to-translation",
            ModeCode::TranslationToWord => "translation-to-word",
            ModeCode::SelectCorrectAnswer => "select-correct-answer",
            ModeCode::MatchPairs => "match-pairs",
            ModeCode::MakeWord => "make-word",
        }
    }

    pub const fn contract(self) -> Contract {
        match self {
            ModeCode::WordToTranslation | ModeCode::TranslationToWord => Contract::FlipCard,
            ModeCode::SelectCorrectAnswer => Contract::MultipleChoice,
            ModeCode::MakeWord => Contract::LetterAssembly,
            ModeCode::MatchPairs => Contract::PairMatching,
        }
    }

    /// Flip cards may be advanced without an explicit judgement
    pub const fn allows_passive_advance(self) -> bool {
        matches!(self.contract(), Contract::FlipCard)
    }

    /// Whether the user can step back to the previous word
    pub const fn has_linear_navigation(self) -> bool {
        matches!(
            self.contract(),
            Contract::FlipCard | Contract::MultipleChoice
        )
    }
}

impl fmt::Display for ModeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown learning mode code: {0}")]
pub struct UnknownModeCode(pub String);

impl FromStr for ModeCode {
    type Err = UnknownModeCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownModeCode(s.to_string()))
    }
}

/// Reference data from the mode registry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningMode {
    pub id: ModeId,
    pub code: ModeCode,
    pub name: String,
}

impl LearningMode {
    pub fn new(id: ModeId, code: ModeCode, name: impl Into<String>) -> Self {
        Self {
            id,
            code,
            name: name.into(),
        }
    }
}

// ==================== Verdicts ====================

/// Outcome of one (mode, word) pair
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordVerdict {
    pub is_correct: bool,
    pub is_answered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_answer: Option<String>,
}

impl WordVerdict {
    pub fn answered(is_correct: bool) -> Self {
        Self {
            is_correct,
            is_answered: true,
            selected_answer: None,
        }
    }

    /// Flip card advanced without a judgement: seen, assumed correct
    pub fn seen() -> Self {
        Self::answered(true)
    }

    pub fn selected(answer: impl Into<String>, is_correct: bool) -> Self {
        Self {
            is_correct,
            is_answered: true,
            selected_answer: Some(answer.into()),
        }
    }
}

/// One matched pair from the match-pairs board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPair {
    pub id: WordId,
    /// Sticky: the word took part in at least one mismatch during the pass
    pub has_error: bool,
}

/// Aggregated per-word outcome as sent in the learning log
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResult {
    pub word_id: WordId,
    pub is_correct: bool,
}

/// Payload of `POST /api/v1/learning-logs`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningLog {
    pub vocabulary_id: VocabularyId,
    pub learning_mode_ids: Vec<ModeId>,
    pub words: Vec<WordResult>,
}

impl LearningLog {
    pub fn correct_count(&self) -> usize {
        self.words.iter().filter(|w| w.is_correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_code_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ModeCode::SelectCorrectAnswer).unwrap();
        assert_eq!(json, "\"select-correct-answer\"");

        let parsed: ModeCode = serde_json::from_str("\"make-word\"").unwrap();
        assert_eq!(parsed, ModeCode::MakeWord);
    }

    #[test]
    fn test_mode_code_from_str_round_trips_as_str() {
        for code in ModeCode::ALL {
            assert_eq!(code.as_str().parse::<ModeCode>().unwrap(), code);
        }
        assert!("flash-cards".parse::<ModeCode>().is_err());
    }

    #[test]
    fn test_mode_indices_are_dense() {
        let mut seen = [false; 5];
        for code in ModeCode::ALL {
            seen[code.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_navigation_capabilities() {
        assert!(ModeCode::WordToTranslation.allows_passive_advance());
        assert!(!ModeCode::SelectCorrectAnswer.allows_passive_advance());
        assert!(ModeCode::SelectCorrectAnswer.has_linear_navigation());
        assert!(!ModeCode::MatchPairs.has_linear_navigation());
        assert!(!ModeCode::MakeWord.has_linear_navigation());
    }

    #[test]
    fn test_word_deserializes_with_missing_optional_fields() {
        let word: Word =
            serde_json::from_str(r#"{"id": 7, "word": "casa", "translation": "house"}"#).unwrap();
        assert_eq!(word.status, WordStatus::New);
        assert!(word.context.is_none());
        assert!(word.examples.is_empty());
    }

    #[test]
    fn test_learning_log_wire_format() {
        let log = LearningLog {
            vocabulary_id: 3,
            learning_mode_ids: vec![1, 4],
            words: vec![WordResult {
                word_id: 10,
                is_correct: false,
            }],
        };
        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["vocabulary_id"], 3);
        assert_eq!(value["learning_mode_ids"][1], 4);
        assert_eq!(value["words"][0]["word_id"], 10);
        assert_eq!(value["words"][0]["is_correct"], false);
    }

    #[test]
    fn test_vocabulary_label() {
        let vocab = Vocabulary {
            id: 1,
            name: "Films".into(),
            language_from: "en".into(),
            language_to: "ru".into(),
        };
        assert_eq!(vocab.label(), "Films (English → Russian)");
    }
}
