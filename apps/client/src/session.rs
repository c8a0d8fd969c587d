//! Admin session gate for the client tools.
//!
//! This is a convenience gate only: it decides whether to show admin
//! commands, it never authorizes anything. Writes still need the server's
//! bearer token.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use portfolio_content::secrets_match;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    admin_auth: bool,
    admin_auth_time: u64,
}

#[derive(Debug, Clone)]
pub struct AdminSession {
    password: String,
    /// Unix millis of the last successful login.
    logged_in_at: Option<u64>,
    ttl: Duration,
}

impl AdminSession {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            logged_in_at: None,
            ttl: SESSION_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn login(&mut self, password: &str) -> bool {
        self.login_at(password, now_millis())
    }

    pub fn login_at(&mut self, password: &str, now_ms: u64) -> bool {
        if secrets_match(password, &self.password) {
            self.logged_in_at = Some(now_ms);
            true
        } else {
            false
        }
    }

    pub fn logout(&mut self) {
        self.logged_in_at = None;
    }

    pub fn is_authenticated(&mut self) -> bool {
        self.is_authenticated_at(now_millis())
    }

    /// An expired session is cleared, so it stays logged out afterwards.
    pub fn is_authenticated_at(&mut self, now_ms: u64) -> bool {
        let Some(logged_in_at) = self.logged_in_at else {
            return false;
        };
        let ttl_ms = u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX);
        if now_ms.saturating_sub(logged_in_at) < ttl_ms {
            true
        } else {
            self.logged_in_at = None;
            false
        }
    }

    /// Restores a session previously written by [`AdminSession::save`].
    /// A missing or unreadable file yields a logged-out session.
    pub fn load(path: &Path, password: impl Into<String>) -> Self {
        let mut session = Self::new(password);
        let stored = std::fs::read(path)
            .ok()
            .and_then(|raw| serde_json::from_slice::<StoredSession>(&raw).ok());
        if let Some(stored) = stored.filter(|s| s.admin_auth) {
            session.logged_in_at = Some(stored.admin_auth_time);
        }
        session
    }

    /// Persists the session, or removes the file when logged out.
    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        match self.logged_in_at {
            Some(admin_auth_time) => {
                let stored = StoredSession {
                    admin_auth: true,
                    admin_auth_time,
                };
                std::fs::write(path, serde_json::to_vec(&stored)?)?;
            }
            None => match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}

/// Gate for admin commands: fails unless the session stored at `path` is
/// still valid. An expired session file is removed.
pub fn require_session(path: &Path, password: impl Into<String>) -> Result<AdminSession, ClientError> {
    require_session_at(path, password, now_millis())
}

pub fn require_session_at(
    path: &Path,
    password: impl Into<String>,
    now_ms: u64,
) -> Result<AdminSession, ClientError> {
    let mut session = AdminSession::load(path, password);
    if !session.is_authenticated_at(now_ms) {
        session.save(path)?;
        return Err(ClientError::SessionRequired);
    }
    Ok(session)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: u64 = 60 * 60 * 1000;

    #[test]
    fn test_wrong_password_rejected() {
        let mut session = AdminSession::new("hunter2");
        assert!(!session.login_at("hunter3", 0));
        assert!(!session.is_authenticated_at(1));
    }

    #[test]
    fn test_session_valid_within_an_hour() {
        let mut session = AdminSession::new("hunter2");
        assert!(session.login_at("hunter2", 1_000));
        assert!(session.is_authenticated_at(1_000 + HOUR_MS - 1));
    }

    #[test]
    fn test_session_expires_and_stays_cleared() {
        let mut session = AdminSession::new("hunter2");
        session.login_at("hunter2", 0);
        assert!(!session.is_authenticated_at(HOUR_MS));
        assert!(!session.is_authenticated_at(1));
    }

    #[test]
    fn test_logout_clears_session() {
        let mut session = AdminSession::new("hunter2");
        session.login_at("hunter2", 0);
        session.logout();
        assert!(!session.is_authenticated_at(1));
    }

    #[test]
    fn test_custom_ttl() {
        let mut session = AdminSession::new("pw").with_ttl(Duration::from_secs(1));
        session.login_at("pw", 0);
        assert!(session.is_authenticated_at(999));
        assert!(!session.is_authenticated_at(1_000));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = AdminSession::new("pw");
        session.login_at("pw", 5_000);
        session.save(&path).unwrap();

        let mut restored = AdminSession::load(&path, "pw");
        assert!(restored.is_authenticated_at(6_000));

        restored.logout();
        restored.save(&path).unwrap();
        assert!(!path.exists());
        assert!(!AdminSession::load(&path, "pw").is_authenticated_at(6_000));
    }

    #[test]
    fn test_require_session_without_login_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let err = require_session_at(&path, "pw", 1_000).unwrap_err();
        assert!(matches!(err, ClientError::SessionRequired));
    }

    #[test]
    fn test_require_session_accepts_live_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = AdminSession::new("pw");
        session.login_at("pw", 1_000);
        session.save(&path).unwrap();

        assert!(require_session_at(&path, "pw", 1_000 + HOUR_MS - 1).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_require_session_removes_expired_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = AdminSession::new("pw");
        session.login_at("pw", 1_000);
        session.save(&path).unwrap();

        let err = require_session_at(&path, "pw", 1_000 + HOUR_MS).unwrap_err();
        assert!(matches!(err, ClientError::SessionRequired));
        assert!(!path.exists());
    }
}
