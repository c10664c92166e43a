use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDRESS: &str = "wss://localhost:8765";

/// Initial reconnect delay; doubled on every failed attempt.
pub const MIN_RETRY: Duration = Duration::from_millis(1000);
/// Reconnect delay ceiling.
pub const MAX_RETRY: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub address: String,
    pub min_retry: Duration,
    pub max_retry: Duration,
    pub cookie_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.into(),
            min_retry: MIN_RETRY,
            max_retry: MAX_RETRY,
            cookie_file: default_cookie_file(),
        }
    }
}

/// `~/.cache/meetup-maker/cookies.json`, falling back to the working
/// directory when no home directory is available.
pub fn default_cookie_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".cache")
            .join("meetup-maker")
            .join("cookies.json"),
        None => PathBuf::from("cookies.json"),
    }
}
