//! Auth client and session handling
//!
//! Talks to the hosted backend's session endpoints:
//! password login (`/auth/v1/token?grant_type=password`), token refresh
//! (`grant_type=refresh_token`), and best-effort logout. The resulting
//! `Session` is persisted as JSON next to the config file, so the CLI
//! stays signed in between invocations. The session also carries the
//! `last_reconciled` month marker the dashboard hands to the reconciler.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::data_dir;
use crate::error::{Error, Result};
use crate::period::Month;

/// Refresh this long before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;

/// An authenticated backend session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
    /// Month the reconciler last ran for in this session, if any
    #[serde(default)]
    pub last_reconciled: Option<Month>,
}

impl Session {
    /// Whether the access token is expired (or about to be)
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// Load a session from disk. `Ok(None)` if no session file exists.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        let session = serde_json::from_str(&text)?;
        Ok(Some(session))
    }

    /// Persist the session to disk, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Remove the session file if present
    pub fn delete(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Default location of the session file
pub fn default_session_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("session.json"))
}

/// Response from the token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

/// Error body the auth service returns on bad credentials
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(alias = "msg")]
    error_description: Option<String>,
}

/// Client for the backend's auth service
pub struct AuthClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn token_url(&self, grant_type: &str) -> String {
        format!("{}/auth/v1/token?grant_type={}", self.base_url, grant_type)
    }

    /// Sign in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .http
            .post(self.token_url("password"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        self.session_from_response(response, None).await
    }

    /// Exchange the refresh token for a new session.
    /// The `last_reconciled` marker carries over.
    pub async fn refresh(&self, session: &Session) -> Result<Session> {
        debug!("refreshing session for {}", session.user_id);
        let response = self
            .http
            .post(self.token_url("refresh_token"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "refresh_token": session.refresh_token }))
            .send()
            .await?;

        self.session_from_response(response, session.last_reconciled)
            .await
    }

    /// Revoke the session on the backend. Best-effort: a failure is logged
    /// and swallowed so logout always clears local state.
    pub async fn logout(&self, session: &Session) {
        let result = self
            .http
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await;
        if let Err(e) = result {
            warn!("Failed to revoke session on backend: {}", e);
        }
    }

    async fn session_from_response(
        &self,
        response: reqwest::Response,
        last_reconciled: Option<Month>,
    ) -> Result<Session> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let description = serde_json::from_str::<AuthErrorBody>(&text)
                .ok()
                .and_then(|b| b.error_description)
                .unwrap_or(text);
            return Err(Error::Auth(format!("{} ({})", description, status)));
        }

        let token: TokenResponse = response.json().await?;
        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user_id: token.user.id,
            email: token.user.email,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
            last_reconciled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            user_id: "user-1".to_string(),
            email: Some("a@b.c".to_string()),
            expires_at,
            last_reconciled: Some("2026-08".parse().unwrap()),
        }
    }

    #[test]
    fn test_is_expired() {
        assert!(session(Utc::now() - Duration::hours(1)).is_expired());
        // Inside the refresh margin counts as expired
        assert!(session(Utc::now() + Duration::seconds(10)).is_expired());
        assert!(!session(Utc::now() + Duration::hours(1)).is_expired());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let original = session(Utc::now() + Duration::hours(1));
        original.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap().unwrap();
        assert_eq!(loaded.access_token, original.access_token);
        assert_eq!(loaded.user_id, original.user_id);
        assert_eq!(loaded.last_reconciled, original.last_reconciled);

        Session::delete(&path).unwrap();
        assert!(Session::load(&path).unwrap().is_none());
        // Deleting twice is fine
        Session::delete(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::load(&dir.path().join("nope.json"))
            .unwrap()
            .is_none());
    }
}
