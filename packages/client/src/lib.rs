//! # slovo-client - learning session client
//!
//! The I/O half on top of [`slovo_core`]:
//!
//! - [`app`] - entry point wiring config, logging and the backend
//! - [`config`] - environment configuration
//! - [`logging`] - tracing setup (stdout plus an optional rolling file)
//! - [`api`] - backend REST interface (words, modes, learning logs)
//! - [`setup`] - setup screen state (vocabulary, modes, word count)
//! - [`session`] - async session controller (transition timer, log submission)

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod session;
pub mod setup;

pub use api::{ApiError, HttpLearningApi, LearningApi};
pub use app::SlovoClient;
pub use config::ClientConfig;
pub use logging::{init_tracing, try_init_tracing, FileLogGuard};
pub use session::{
    CompletionSummary, KeyCommand, LearningSession, SessionPhase, SessionSettings, StartError,
};
pub use setup::{SetupForm, StartRequest};
