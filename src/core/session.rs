//! # Session
//!
//! Who is using the app right now. The session is an explicit object owned
//! by `App` and handed to whatever needs it; there is no global lookup.
//!
//! Only the bearer token is persisted, in `~/.fuelog/token`. A stored token
//! means "logged in": there is no expiry, refresh or revocation.
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info, warn};

use crate::backend::{AuthBackend, BackendError, User};

/// Persistence for the bearer token.
pub trait TokenStore: Send + Sync {
    fn get_token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> io::Result<()>;
    fn clear_token(&self) -> io::Result<()>;
}

/// Token kept in a plain file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `~/.fuelog/token`.
    pub fn default_location() -> io::Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        Ok(Self::new(home.join(".fuelog").join("token")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn set_token(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, token)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn clear_token(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Token held in memory only.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.slot().clone()
    }

    fn set_token(&self, token: &str) -> io::Result<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> io::Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[derive(Debug)]
pub enum SessionError {
    Backend(BackendError),
    Storage(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Backend(e) => write!(f, "authentication failed: {e}"),
            SessionError::Storage(e) => write!(f, "token storage error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// The user assumed when a stored token is found at startup.
pub fn demo_user() -> User {
    User {
        id: "1".to_string(),
        name: "Demo User".to_string(),
        email: "user@example.com".to_string(),
    }
}

pub struct SessionContext {
    store: Box<dyn TokenStore>,
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
}

impl SessionContext {
    /// Restores the session from `store`.
    pub fn init(store: Box<dyn TokenStore>) -> Self {
        let token = store.get_token();
        let user = token.as_ref().map(|_| demo_user());
        if token.is_some() {
            info!("Restored session from stored token");
        } else {
            debug!("No stored token, starting anonymous");
        }
        Self {
            store,
            user,
            token,
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }

    pub async fn login(
        &mut self,
        auth: &dyn AuthBackend,
        email: &str,
        password: &str,
    ) -> Result<&User, SessionError> {
        self.begin_auth();
        let result = auth.login(email, password).await;
        self.finish_auth(result)
    }

    pub async fn register(
        &mut self,
        auth: &dyn AuthBackend,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&User, SessionError> {
        self.begin_auth();
        let result = auth.register(name, email, password).await;
        self.finish_auth(result)
    }

    pub fn begin_auth(&mut self) {
        self.is_loading = true;
    }

    /// Completes a login or register call. On failure the session keeps
    /// its previous identity.
    pub fn finish_auth(
        &mut self,
        result: Result<crate::backend::AuthResponse, BackendError>,
    ) -> Result<&User, SessionError> {
        self.is_loading = false;
        let response = result.map_err(|e| {
            warn!("Authentication failed: {}", e);
            SessionError::Backend(e)
        })?;
        self.store
            .set_token(&response.token)
            .map_err(SessionError::Storage)?;
        info!("Signed in as {}", response.user.email);
        self.token = Some(response.token);
        Ok(self.user.insert(response.user))
    }

    /// Forgets the user and removes the stored token.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.token = None;
        self.store.clear_token().map_err(SessionError::Storage)?;
        info!("Logged out");
        Ok(())
    }

    /// Drops in-memory identity; the stored token survives for next start.
    pub fn teardown(&mut self) {
        self.user = None;
        self.token = None;
        self.is_loading = false;
    }
}
