// Session module - holds and persists the authentication token
//
// The token is opaque: it is stored exactly as the server issued it and sent
// back verbatim. Persistence mirrors browser local storage: a small JSON
// object on disk with the token under a well-known key. Clearing the session
// removes the whole file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Key under which the token is persisted
pub const TOKEN_KEY: &str = "token";

/// Errors raised while persisting the session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove session file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage for the opaque session token
///
/// Implementations must be cheap to read: the API client calls `token()` on
/// every authenticated request.
pub trait SessionStore: Send + Sync {
    /// Current token, if a session exists
    fn token(&self) -> Option<String>;

    /// Store a new token, replacing any existing one
    fn set_token(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the session. Safe to call when no session exists.
    fn clear(&self) -> Result<(), SessionError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Session store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        *lock(&self.token) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *lock(&self.token) = None;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

/// On-disk layout: `{ "token": "..." }`
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Session store persisted to a JSON file
///
/// The file is read once on open and cached; writes go through to disk
/// immediately so the session survives restarts.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: Mutex<Option<String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading any persisted token
    ///
    /// A missing file means no session. An unreadable or corrupt file is
    /// logged and treated the same way; the next login overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = read_token(&path);
        tracing::debug!(
            path = %path.display(),
            has_token = token.is_some(),
            "Session store opened"
        );
        Self {
            path,
            cached: Mutex::new(token),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, token: &str) -> Result<(), SessionError> {
        let stored = StoredSession {
            token: Some(token.to_string()),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        // Write then rename so a crash never leaves a half-written token
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|source| SessionError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        lock(&self.cached).clone()
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        // Cache first: the in-process session stays valid even if disk fails
        *lock(&self.cached) = Some(token.to_string());
        self.write(token)
    }

    fn clear(&self) -> Result<(), SessionError> {
        *lock(&self.cached) = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn read_token(path: &Path) -> Option<String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Cannot read session file: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<StoredSession>(&contents) {
        Ok(stored) => stored.token,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Ignoring corrupt session file: {}", e);
            None
        }
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_and_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.token(), None);

        store.set_token("abc").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.token(), None);

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileSessionStore::open(&path);
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.token(), None);
        store.set_token("opaque.jwt.value").unwrap();

        let reopened = FileSessionStore::open(&path);
        assert_eq!(reopened.token().as_deref(), Some("opaque.jwt.value"));

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[TOKEN_KEY], "opaque.jwt.value");
    }

    #[test]
    fn file_store_clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = FileSessionStore::open(&path);
        store.set_token("t").unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.token(), None);

        store.clear().unwrap();
        assert_eq!(FileSessionStore::open(&path).token(), None);
    }

    #[test]
    fn corrupt_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileSessionStore::open(&path);
        assert_eq!(store.token(), None);

        // Next login overwrites the corrupt file
        store.set_token("fresh").unwrap();
        assert_eq!(FileSessionStore::open(&path).token().as_deref(), Some("fresh"));
    }
}
