//! Session context
//!
//! Holds the bearer token and the signed-in user, persisted as a JSON file so
//! a restarted client picks up where it left off. Login and register save,
//! logout clears.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::client::RegisterRequest;
use shared::models::UserInfo;

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

/// Persisted token + user pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: UserInfo,
}

/// JSON file holding at most one [`StoredSession`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        Self {
            path: base_path.into().join(filename),
        }
    }

    pub fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Missing or unreadable files both mean "no session"
    pub fn load(&self) -> Option<StoredSession> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Explicit replacement for ambient token storage.
///
/// Code that talks to the server asks the context for a [`HttpClient`]
/// instead of reading a global token.
#[derive(Debug)]
pub struct SessionContext {
    config: ClientConfig,
    store: SessionStore,
    current: Option<StoredSession>,
}

impl SessionContext {
    /// Restore whatever session the store holds
    pub fn load(config: ClientConfig, store: SessionStore) -> Self {
        let current = store.load();
        if let Some(session) = &current {
            tracing::info!(user_id = %session.user.id, "Restored saved session");
        }
        Self {
            config,
            store,
            current,
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<&UserInfo> {
        let response = self.anonymous_client()?.login(email, password).await?;
        self.start(StoredSession {
            token: response.token,
            user: response.user,
        })
    }

    pub async fn register(&mut self, request: &RegisterRequest) -> ClientResult<&UserInfo> {
        let response = self.anonymous_client()?.register(request).await?;
        self.start(StoredSession {
            token: response.token,
            user: response.user,
        })
    }

    /// Drop the session in memory and on disk
    pub fn logout(&mut self) -> ClientResult<()> {
        self.current = None;
        self.store.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Client carrying the bearer token
    pub fn client(&self) -> ClientResult<HttpClient> {
        let token = self.token().ok_or(ClientError::NotLoggedIn)?;
        Ok(self.anonymous_client()?.with_token(token))
    }

    /// Tokens expire without refresh: a 401 ends the session.
    ///
    /// Returns whether the session was cleared.
    pub fn invalidate_if_unauthorized(&mut self, err: &ClientError) -> ClientResult<bool> {
        if self.current.is_some() && err.is_unauthorized() {
            tracing::warn!("Token rejected by server, clearing session");
            self.logout()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn anonymous_client(&self) -> ClientResult<HttpClient> {
        self.config.build_http_client()
    }

    fn start(&mut self, session: StoredSession) -> ClientResult<&UserInfo> {
        self.store.save(&session)?;
        tracing::info!(user_id = %session.user.id, role = %session.user.role, "Session started");
        Ok(&self.current.insert(session).user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn session() -> StoredSession {
        StoredSession {
            token: "tok".to_string(),
            user: UserInfo {
                id: "user:ada".to_string(),
                name: "Ada".to_string(),
                email: "ada@campus.edu".to_string(),
                role: Role::Student,
                university_id: Some("UNI-STD-0001".to_string()),
                is_active: true,
            },
        }
    }

    #[test]
    fn store_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested"), "session.json");
        assert!(store.load().is_none());

        store.save(&session()).unwrap();
        assert_eq!(store.load(), Some(session()));

        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path(), "session.json");
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn context_restores_and_logs_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path(), "session.json");
        store.save(&session()).unwrap();

        let mut ctx = SessionContext::load(ClientConfig::default(), store.clone());
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.token(), Some("tok"));
        assert_eq!(ctx.user().map(|u| u.role), Some(Role::Student));
        assert_eq!(ctx.client().unwrap().token(), Some("tok"));

        ctx.logout().unwrap();
        assert!(!ctx.is_authenticated());
        assert!(matches!(ctx.client(), Err(ClientError::NotLoggedIn)));
        assert!(store.load().is_none());
    }

    #[test]
    fn unauthorized_response_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path(), "session.json");
        store.save(&session()).unwrap();
        let mut ctx = SessionContext::load(ClientConfig::default(), store);

        let forbidden = ClientError::Api {
            status: 403,
            message: None,
        };
        assert!(!ctx.invalidate_if_unauthorized(&forbidden).unwrap());
        assert!(ctx.is_authenticated());

        let expired = ClientError::Api {
            status: 401,
            message: Some("Invalid or expired token".to_string()),
        };
        assert!(ctx.invalidate_if_unauthorized(&expired).unwrap());
        assert!(!ctx.is_authenticated());
    }
}
