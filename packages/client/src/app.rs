//! Client entry point: config, logging and the HTTP backend wired together

use tracing::info;

use crate::api::{ApiError, HttpLearningApi};
use crate::config::ClientConfig;
use crate::logging::{init_tracing, FileLogGuard};
use crate::session::{LearningSession, SessionSettings};
use crate::setup::SetupForm;

pub struct SlovoClient {
    config: ClientConfig,
    api: HttpLearningApi,
    _log_guard: Option<FileLogGuard>,
}

impl SlovoClient {
    /// Reads `.env` and the environment, then installs the tracing subscriber
    pub fn bootstrap() -> Result<Self, ApiError> {
        let config = ClientConfig::load();
        let log_guard = init_tracing(&config);
        Ok(Self {
            _log_guard: log_guard,
            ..Self::with_config(config)?
        })
    }

    /// No global subscriber is touched
    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let api = HttpLearningApi::new(&config)?;
        info!(
            api_url = %api.base_url(),
            file_logs = config.file_logs,
            "slovo client ready"
        );
        Ok(Self {
            config,
            api,
            _log_guard: None,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &HttpLearningApi {
        &self.api
    }

    pub async fn setup_form(&self) -> Result<SetupForm, ApiError> {
        SetupForm::load(&self.api, self.config.default_word_count).await
    }

    pub fn new_session(&self) -> LearningSession<HttpLearningApi> {
        LearningSession::new(self.api.clone(), SessionSettings::from(&self.config))
    }
}
