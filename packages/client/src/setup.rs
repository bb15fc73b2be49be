//! Setup screen state: vocabulary picker, mode toggles and word count

use slovo_core::{LearningMode, ModeId, Vocabulary, VocabularyId};

use crate::api::{ApiError, LearningApi};

/// Everything [`LearningSession::start`](crate::session::LearningSession::start) needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartRequest {
    pub vocabulary_id: Option<VocabularyId>,
    pub modes: Vec<LearningMode>,
    pub word_count: u32,
}

#[derive(Clone, Debug)]
pub struct SetupForm {
    vocabularies: Vec<Vocabulary>,
    available_modes: Vec<LearningMode>,
    selected_vocabulary: Option<VocabularyId>,
    selected_modes: Vec<LearningMode>,
    word_count_input: String,
    default_word_count: u32,
}

impl SetupForm {
    pub fn new(default_word_count: u32) -> Self {
        let default_word_count = default_word_count.max(1);
        Self {
            vocabularies: Vec::new(),
            available_modes: Vec::new(),
            selected_vocabulary: None,
            selected_modes: Vec::new(),
            word_count_input: default_word_count.to_string(),
            default_word_count,
        }
    }

    /// Fetches vocabularies and modes concurrently
    pub async fn load<A: LearningApi>(api: &A, default_word_count: u32) -> Result<Self, ApiError> {
        let (vocabularies, modes) =
            tokio::try_join!(api.fetch_vocabularies(), api.fetch_learning_modes())?;
        let mut form = Self::new(default_word_count);
        form.set_vocabularies(vocabularies);
        form.set_available_modes(modes);
        Ok(form)
    }

    // ==================== Vocabulary ====================

    /// First vocabulary becomes the default selection
    pub fn set_vocabularies(&mut self, vocabularies: Vec<Vocabulary>) {
        let still_present = self
            .selected_vocabulary
            .is_some_and(|id| vocabularies.iter().any(|v| v.id == id));
        if !still_present {
            self.selected_vocabulary = vocabularies.first().map(|v| v.id);
        }
        self.vocabularies = vocabularies;
    }

    /// `(id, label)` pairs for the picker
    pub fn vocabulary_options(&self) -> Vec<(VocabularyId, String)> {
        self.vocabularies.iter().map(|v| (v.id, v.label())).collect()
    }

    pub fn select_vocabulary(&mut self, id: VocabularyId) -> bool {
        if !self.vocabularies.iter().any(|v| v.id == id) {
            return false;
        }
        self.selected_vocabulary = Some(id);
        true
    }

    pub fn selected_vocabulary(&self) -> Option<VocabularyId> {
        self.selected_vocabulary
    }

    // ==================== Modes ====================

    pub fn set_available_modes(&mut self, mut modes: Vec<LearningMode>) {
        modes.sort_by_key(|m| m.id);
        self.selected_modes
            .retain(|selected| modes.iter().any(|m| m.id == selected.id));
        self.available_modes = modes;
    }

    pub fn available_modes(&self) -> &[LearningMode] {
        &self.available_modes
    }

    /// Returns whether the mode is selected afterwards
    pub fn toggle_mode(&mut self, mode_id: ModeId) -> bool {
        if let Some(pos) = self.selected_modes.iter().position(|m| m.id == mode_id) {
            self.selected_modes.remove(pos);
            return false;
        }
        let Some(mode) = self.available_modes.iter().find(|m| m.id == mode_id) else {
            return false;
        };
        self.selected_modes.push(mode.clone());
        self.selected_modes.sort_by_key(|m| m.id);
        true
    }

    pub fn is_mode_selected(&self, mode_id: ModeId) -> bool {
        self.selected_modes.iter().any(|m| m.id == mode_id)
    }

    pub fn selected_modes(&self) -> &[LearningMode] {
        &self.selected_modes
    }

    // ==================== Word count ====================

    /// Raw keystrokes; validated on blur
    pub fn set_word_count_input(&mut self, input: impl Into<String>) {
        self.word_count_input = input.into();
    }

    pub fn word_count_input(&self) -> &str {
        &self.word_count_input
    }

    /// Blur: normalise the input to a valid count
    pub fn commit_word_count(&mut self) -> u32 {
        let count = self.word_count();
        self.word_count_input = count.to_string();
        count
    }

    /// Empty or unparsable input means the default; anything below 1 becomes 1
    pub fn word_count(&self) -> u32 {
        match self.word_count_input.trim().parse::<i64>() {
            Ok(n) if n < 1 => 1,
            Ok(n) => u32::try_from(n).unwrap_or(u32::MAX),
            Err(_) => self.default_word_count,
        }
    }

    pub fn can_start(&self) -> bool {
        self.selected_vocabulary.is_some() && !self.selected_modes.is_empty()
    }

    pub fn start_request(&self) -> StartRequest {
        StartRequest {
            vocabulary_id: self.selected_vocabulary,
            modes: self.selected_modes.clone(),
            word_count: self.word_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slovo_core::ModeCode;

    fn vocab(id: VocabularyId, name: &str) -> Vocabulary {
        Vocabulary {
            id,
            name: name.to_string(),
            language_from: "en".to_string(),
            language_to: "ru".to_string(),
        }
    }

    fn modes() -> Vec<LearningMode> {
        vec![
            LearningMode::new(3, ModeCode::SelectCorrectAnswer, "Select"),
            LearningMode::new(1, ModeCode::WordToTranslation, "Word → Translation"),
            LearningMode::new(5, ModeCode::MakeWord, "Make word"),
        ]
    }

    #[test]
    fn test_first_vocabulary_selected_by_default() {
        let mut form = SetupForm::new(10);
        assert!(form.selected_vocabulary().is_none());
        form.set_vocabularies(vec![vocab(4, "Films"), vocab(7, "Travel")]);
        assert_eq!(form.selected_vocabulary(), Some(4));
        assert_eq!(
            form.vocabulary_options()[0].1,
            "Films (English → Russian)"
        );

        assert!(form.select_vocabulary(7));
        assert!(!form.select_vocabulary(99));
        assert_eq!(form.selected_vocabulary(), Some(7));
    }

    #[test]
    fn test_mode_toggle_keeps_id_order() {
        let mut form = SetupForm::new(10);
        form.set_available_modes(modes());
        assert!(form.toggle_mode(5));
        assert!(form.toggle_mode(1));
        assert!(form.toggle_mode(3));
        let ids: Vec<_> = form.selected_modes().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);

        assert!(!form.toggle_mode(3));
        assert!(!form.is_mode_selected(3));
        assert!(!form.toggle_mode(42));
    }

    #[test]
    fn test_word_count_on_blur() {
        let mut form = SetupForm::new(10);
        form.set_word_count_input("0");
        assert_eq!(form.commit_word_count(), 1);
        assert_eq!(form.word_count_input(), "1");

        form.set_word_count_input("");
        assert_eq!(form.commit_word_count(), 10);

        form.set_word_count_input("abc");
        assert_eq!(form.commit_word_count(), 10);

        form.set_word_count_input(" 25 ");
        assert_eq!(form.commit_word_count(), 25);

        form.set_word_count_input("-3");
        assert_eq!(form.word_count(), 1);
    }

    #[test]
    fn test_start_requires_vocabulary_and_mode() {
        let mut form = SetupForm::new(10);
        form.set_available_modes(modes());
        assert!(!form.can_start());
        form.set_vocabularies(vec![vocab(1, "Basics")]);
        assert!(!form.can_start());
        form.toggle_mode(1);
        assert!(form.can_start());

        let request = form.start_request();
        assert_eq!(request.vocabulary_id, Some(1));
        assert_eq!(request.word_count, 10);
        assert_eq!(request.modes.len(), 1);
    }
}
