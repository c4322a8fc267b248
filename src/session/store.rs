//! Persistent credential storage

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Bearer token and refresh token of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

/// Where credentials survive between runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<Credentials>>;
    async fn save(&self, credentials: &Credentials) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<Credentials>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(credentials) => Ok(Some(credentials)),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                    Ok(None)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(credentials)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for tests and short-lived embedders
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<Credentials>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Mutex::new(Some(credentials)),
        }
    }

    /// Snapshot of what is currently stored
    pub fn snapshot(&self) -> Option<Credentials> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, value: Option<Credentials>) {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.snapshot())
    }

    async fn save(&self, credentials: &Credentials) -> Result<()> {
        self.set(Some(credentials.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.set(None);
        Ok(())
    }
}

#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    async fn load(&self) -> Result<Option<Credentials>> {
        (**self).load().await
    }

    async fn save(&self, credentials: &Credentials) -> Result<()> {
        (**self).save(credentials).await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
}
