use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_TRANSITION_DELAY_MS: u64 = 1_500;
const DEFAULT_WORD_COUNT: u32 = 10;
const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub access_token: Option<String>,
    pub request_timeout: Duration,
    pub transition_delay: Duration,
    pub default_word_count: u32,
    pub shuffle_words: bool,
    pub log_level: String,
    /// Daily rolling `slovo.<date>.log` files under `log_dir`
    pub file_logs: bool,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            transition_delay: Duration::from_millis(DEFAULT_TRANSITION_DELAY_MS),
            default_word_count: DEFAULT_WORD_COUNT,
            shuffle_words: true,
            log_level: "info".to_string(),
            file_logs: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl ClientConfig {
    /// Reads `.env` first, then the process environment
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Invalid or blank values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let api_url = get("SLOVO_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);
        let access_token = get("SLOVO_ACCESS_TOKEN").map(|t| t.trim().to_string());
        let request_timeout = get("SLOVO_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);
        let transition_delay = get("SLOVO_TRANSITION_DELAY_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.transition_delay);
        let default_word_count = get("SLOVO_DEFAULT_WORD_COUNT")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(defaults.default_word_count);
        let shuffle_words = get("SLOVO_SHUFFLE_WORDS")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.shuffle_words);
        let log_level = get("RUST_LOG").unwrap_or(defaults.log_level);
        let file_logs = get("SLOVO_FILE_LOGS")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.file_logs);
        let log_dir = get("SLOVO_LOG_DIR")
            .map(|dir| PathBuf::from(dir.trim()))
            .unwrap_or(defaults.log_dir);

        Self {
            api_url,
            access_token,
            request_timeout,
            transition_delay,
            default_word_count,
            shuffle_words,
            log_level,
            file_logs,
            log_dir,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_url, "http://localhost:8000");
        assert!(config.access_token.is_none());
        assert_eq!(config.transition_delay, Duration::from_millis(1500));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.default_word_count, 10);
        assert!(config.shuffle_words);
        assert_eq!(config.log_level, "info");
        assert!(!config.file_logs);
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SLOVO_API_URL", "https://api.example.com/"),
            ("SLOVO_ACCESS_TOKEN", " secret "),
            ("SLOVO_TRANSITION_DELAY_MS", "250"),
            ("SLOVO_DEFAULT_WORD_COUNT", "25"),
            ("SLOVO_SHUFFLE_WORDS", "off"),
            ("RUST_LOG", "debug"),
            ("SLOVO_FILE_LOGS", "1"),
            ("SLOVO_LOG_DIR", "/var/log/slovo"),
        ]);
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert_eq!(config.transition_delay, Duration::from_millis(250));
        assert_eq!(config.default_word_count, 25);
        assert!(!config.shuffle_words);
        assert_eq!(config.log_level, "debug");
        assert!(config.file_logs);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/slovo"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("SLOVO_ACCESS_TOKEN", "   "),
            ("SLOVO_REQUEST_TIMEOUT_MS", "soon"),
            ("SLOVO_DEFAULT_WORD_COUNT", "0"),
            ("SLOVO_SHUFFLE_WORDS", "maybe"),
        ]);
        assert!(config.access_token.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.default_word_count, 10);
        assert!(config.shuffle_words);
    }
}
