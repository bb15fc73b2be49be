use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use slovo_core::{LearningLog, LearningMode, ModeCode, ModeId, Vocabulary, VocabularyId, Word};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Backend collaborators of a learning session
pub trait LearningApi: Send + Sync {
    fn fetch_vocabularies(&self) -> impl Future<Output = Result<Vec<Vocabulary>, ApiError>> + Send;

    fn fetch_words(
        &self,
        vocabulary_id: VocabularyId,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Word>, ApiError>> + Send;

    fn fetch_learning_modes(
        &self,
    ) -> impl Future<Output = Result<Vec<LearningMode>, ApiError>> + Send;

    fn submit_learning_log(
        &self,
        log: &LearningLog,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Mode registry row; codes this client does not know are skipped
#[derive(Debug, Deserialize)]
struct RawLearningMode {
    id: ModeId,
    code: String,
    name: String,
}

#[derive(Clone)]
pub struct HttpLearningApi {
    base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl HttpLearningApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.api_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self {
            base_url,
            access_token: config.access_token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.access_token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let resp = self.authorize(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::HttpStatus { status, body });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let body = self.send(self.client.get(self.url(path))).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl LearningApi for HttpLearningApi {
    async fn fetch_vocabularies(&self) -> Result<Vec<Vocabulary>, ApiError> {
        self.get_json("/api/v1/vocabularies").await
    }

    async fn fetch_words(&self, vocabulary_id: VocabularyId, limit: u32) -> Result<Vec<Word>, ApiError> {
        self.get_json(&format!("/api/v1/vocabularies/{vocabulary_id}/words?limit={limit}"))
            .await
    }

    async fn fetch_learning_modes(&self) -> Result<Vec<LearningMode>, ApiError> {
        let raw: Vec<RawLearningMode> = self.get_json("/api/v1/learning-modes").await?;
        Ok(raw
            .into_iter()
            .filter_map(|mode| match mode.code.parse::<ModeCode>() {
                Ok(code) => Some(LearningMode::new(mode.id, code, mode.name)),
                Err(err) => {
                    warn!(mode_id = mode.id, error = %err, "skipping unsupported learning mode");
                    None
                }
            })
            .collect())
    }

    async fn submit_learning_log(&self, log: &LearningLog) -> Result<(), ApiError> {
        debug!(
            vocabulary_id = log.vocabulary_id,
            words = log.words.len(),
            "POST learning log"
        );
        self.send(self.client.post(self.url("/api/v1/learning-logs")).json(log))
            .await?;
        Ok(())
    }
}
