//! Persistent storage for the session's bearer token.
//!
//! The backend hands out exactly one bearer token per session; this module
//! owns where it lives between runs. Storage is best-effort by contract:
//! a failing disk never takes the application down, it only means the next
//! start begins signed out.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Storage for a single bearer token, last-write-wins.
///
/// [`Session`](crate::Session) is the only writer during normal operation:
/// it calls [`set`](Self::set) after a successful login or email
/// verification and [`clear`](Self::clear) on logout or when a restored
/// token is rejected by the backend.
///
/// Implementations must not validate token contents; the token is opaque.
pub trait TokenStore {
    /// Returns the stored token, or `None` if no token is stored or the
    /// storage cannot be read.
    fn get(&self) -> Option<String>;

    /// Stores a token, replacing any previous one.
    fn set(&mut self, token: &str);

    /// Removes the stored token. Clearing an empty store is a no-op.
    fn clear(&mut self);
}

/// A [`TokenStore`] backed by a single file.
///
/// The file plays the role a browser's local storage plays for the web
/// front end: one well-known location, one opaque string. All I/O is
/// synchronous and best-effort; failures are logged at `warn` level and
/// otherwise swallowed.
///
/// # Example
/// ```rust
/// use reviewhub_rs::{FileTokenStore, TokenStore};
///
/// let dir = std::env::temp_dir().join("reviewhub-doc");
/// let mut store = FileTokenStore::new(dir.join("token"));
/// store.set("tok1");
/// assert_eq!(store.get().as_deref(), Some("tok1"));
/// store.clear();
/// assert_eq!(store.get(), None);
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store persisting to the given file path.
    ///
    /// The file and its parent directories are created lazily on the first
    /// [`set`](TokenStore::set).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();

        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set(&mut self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), %error, "failed to create token store directory");
                return;
            }
        }

        if let Err(error) = fs::write(&self.path, token) {
            warn!(path = %self.path.display(), %error, "failed to persist token");
        }
    }

    fn clear(&mut self) {
        if let Err(error) = fs::remove_file(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %error, "failed to clear stored token");
            }
        }
    }
}

/// An in-process [`TokenStore`], for tests and embedders that handle
/// persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token, as if a previous session
    /// had persisted it.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }

    fn set(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
