use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::client::error::ClientResult;

pub const EMAIL_COOKIE: &str = "email";
pub const TOKEN_COOKIE: &str = "token";

const COOKIE_TTL_DAYS: i64 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Cookie {
    value: String,
    expires: DateTime<Utc>,
}

/// File-backed stand-in for the browser cookie store: named values with a
/// fixed expiry, persisted as JSON so a returning user can be offered
/// re-login across runs.
#[derive(Debug)]
pub struct CookieJar {
    path: PathBuf,
    cookies: HashMap<String, Cookie>,
}

impl CookieJar {
    /// Loads the jar from disk. A missing or unreadable file yields an empty
    /// jar; stale state is never worth failing startup over.
    pub fn load(path: &Path) -> Self {
        let cookies = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(cookies) => cookies,
                Err(err) => {
                    warn!("Discarding unreadable cookie file {}: {}", path.display(), err);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path: path.to_owned(),
            cookies,
        }
    }

    /// Returns the cookie value if present and not yet expired.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .get(name)
            .filter(|cookie| cookie.expires > Utc::now())
            .map(|cookie| cookie.value.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.cookies.insert(
            name.to_owned(),
            Cookie {
                value: value.to_owned(),
                expires: Utc::now() + Duration::days(COOKIE_TTL_DAYS),
            },
        );
    }

    pub fn remove(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    /// Writes the jar back to disk, dropping expired entries on the way out.
    pub fn store(&mut self) -> ClientResult<()> {
        let now = Utc::now();
        self.cookies.retain(|_, cookie| cookie.expires > now);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.cookies)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut jar = CookieJar::load(&dir.path().join("cookies.json"));

        jar.set(EMAIL_COOKIE, "x@y.com");
        assert_eq!(jar.get(EMAIL_COOKIE), Some("x@y.com"));
        assert_eq!(jar.get(TOKEN_COOKIE), None);
    }

    #[test]
    fn expired_cookies_are_invisible() {
        let dir = tempfile::tempdir().unwrap();
        let mut jar = CookieJar::load(&dir.path().join("cookies.json"));

        jar.set(TOKEN_COOKIE, "T");
        jar.cookies.get_mut(TOKEN_COOKIE).unwrap().expires = Utc::now() - Duration::hours(1);
        assert_eq!(jar.get(TOKEN_COOKIE), None);
    }

    #[test]
    fn persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let mut jar = CookieJar::load(&path);
        jar.set(EMAIL_COOKIE, "x@y.com");
        jar.set(TOKEN_COOKIE, "T");
        jar.store().unwrap();

        let jar = CookieJar::load(&path);
        assert_eq!(jar.get(EMAIL_COOKIE), Some("x@y.com"));
        assert_eq!(jar.get(TOKEN_COOKIE), Some("T"));
    }

    #[test]
    fn corrupt_file_yields_an_empty_jar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "not json").unwrap();

        let jar = CookieJar::load(&path);
        assert_eq!(jar.get(EMAIL_COOKIE), None);
    }

    #[test]
    fn remove_deletes_the_cookie() {
        let dir = tempfile::tempdir().unwrap();
        let mut jar = CookieJar::load(&dir.path().join("cookies.json"));

        jar.set(TOKEN_COOKIE, "T");
        jar.remove(TOKEN_COOKIE);
        assert_eq!(jar.get(TOKEN_COOKIE), None);
    }
}
