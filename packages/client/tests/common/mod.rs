#![allow(dead_code)]

use std::time::Duration;

use parking_lot::Mutex;
use slovo_client::{ApiError, LearningApi, SessionSettings};
use slovo_core::{LearningLog, LearningMode, ModeCode, Vocabulary, VocabularyId, Word};

pub const TRANSITION_DELAY: Duration = Duration::from_millis(1500);

pub fn words(n: i64) -> Vec<Word> {
    (1..=n)
        .map(|i| Word::new(i, format!("word{i}"), format!("translation{i}")))
        .collect()
}

pub fn mode(code: ModeCode) -> LearningMode {
    LearningMode::new(code.index() as i64 + 1, code, code.as_str())
}

pub fn settings() -> SessionSettings {
    SessionSettings {
        transition_delay: TRANSITION_DELAY,
        shuffle_words: false,
    }
}

pub fn server_error() -> ApiError {
    ApiError::HttpStatus {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

/// In-memory backend that records every call
#[derive(Default)]
pub struct FakeApi {
    pub vocabularies: Vec<Vocabulary>,
    pub modes: Vec<LearningMode>,
    pub words: Vec<Word>,
    pub fail_words: bool,
    pub fail_submit: bool,
    /// Applied to `fetch_words` and `submit_learning_log`
    pub latency: Option<Duration>,
    pub word_requests: Mutex<Vec<(VocabularyId, u32)>>,
    pub submitted: Mutex<Vec<LearningLog>>,
}

impl FakeApi {
    pub fn with_words(words: Vec<Word>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    pub fn failing_words(mut self) -> Self {
        self.fail_words = true;
        self
    }

    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn slow(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn wait(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    pub fn submitted(&self) -> Vec<LearningLog> {
        self.submitted.lock().clone()
    }

    pub fn word_requests(&self) -> Vec<(VocabularyId, u32)> {
        self.word_requests.lock().clone()
    }
}

impl LearningApi for FakeApi {
    async fn fetch_vocabularies(&self) -> Result<Vec<Vocabulary>, ApiError> {
        Ok(self.vocabularies.clone())
    }

    async fn fetch_words(&self, vocabulary_id: VocabularyId, limit: u32) -> Result<Vec<Word>, ApiError> {
        self.word_requests.lock().push((vocabulary_id, limit));
        self.wait().await;
        if self.fail_words {
            return Err(server_error());
        }
        Ok(self.words.clone())
    }

    async fn fetch_learning_modes(&self) -> Result<Vec<LearningMode>, ApiError> {
        Ok(self.modes.clone())
    }

    async fn submit_learning_log(&self, log: &LearningLog) -> Result<(), ApiError> {
        self.wait().await;
        self.submitted.lock().push(log.clone());
        if self.fail_submit {
            return Err(server_error());
        }
        Ok(())
    }
}
