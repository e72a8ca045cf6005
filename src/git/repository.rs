use git2::Repository;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{AppError, Result};

/// Read-only handle onto one repository, opened once at startup.
///
/// `git2::Repository` is `Send` but not `Sync`, so access goes through a
/// mutex; nothing request-specific is ever stored here.
pub struct GitRepository {
    repo: Mutex<Repository>,
    pub path: String,
}

impl GitRepository {
    /// Open the repository at `path`.
    ///
    /// When `GIT_DIR` is set the standard git environment variables decide
    /// which repository is opened. Otherwise the repository is discovered by
    /// walking up from `path` until a `.git` directory is found.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let repo = if std::env::var_os("GIT_DIR").is_some() {
            Repository::open_from_env()
        } else {
            Repository::discover(&path)
        }
        .map_err(|_| AppError::RepoNotFound(path_str.clone()))?;

        tracing::info!("Opened git repository at: {}", repo.path().display());

        Ok(Self {
            repo: Mutex::new(repo),
            path: path_str,
        })
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&repo)
    }
}

pub type SharedRepo = Arc<GitRepository>;
