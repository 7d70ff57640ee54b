//! Auth context shared by the client and every admin screen.
//!
//! The token lives behind a [`TokenStore`] whose only operations are read,
//! write and clear. [`Session`] is the cheap, cloneable handle injected into
//! [`crate::ApiClient`] and the screens; nothing else looks the token up.

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;

use crate::error::ApiError;

/// Persisted storage for the bearer token.
pub trait TokenStore: Send + Sync + fmt::Debug {
    fn read(&self) -> Option<String>;

    fn write(&self, token: &str) -> Result<(), ApiError>;

    fn clear(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn write(&self, token: &str) -> Result<(), ApiError> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        *self.token.write() = None;
        Ok(())
    }
}

/// Token kept in a plain file so it survives between CLI invocations.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                (!token.is_empty()).then(|| token.to_string())
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("failed to read token file {}: {err}", self.path.display());
                None
            },
        }
    }

    fn write(&self, token: &str) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                ApiError::io(format!("failed to create {}", parent.display()), err)
            })?;
        }
        write_private(&self.path, token).map_err(|err| {
            ApiError::io(format!("failed to write token to {}", self.path.display()), err)
        })
    }

    fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApiError::io(
                format!("failed to remove token file {}", self.path.display()),
                err,
            )),
        }
    }
}

/// Owner-only on Unix, including a file left behind with wider permissions.
#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// Result of the session guard run when an admin screen mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
}

#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Current token, read from the store on every call.
    pub fn token(&self) -> Option<String> {
        self.store.read()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn login(&self, token: &str) -> Result<(), ApiError> {
        self.store.write(token)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.store.clear()
    }

    /// No expiry check happens here; the server decides whether the token
    /// is still valid.
    pub fn guard(&self) -> Access {
        if self.is_authenticated() {
            Access::Granted
        } else {
            Access::RedirectToLogin
        }
    }
}
