//! Persisted authentication session
//!
//! Holds the bearer token and the signed-in user between runs. Callers load
//! the session once and pass the user and token explicitly from there on.

use crate::error::{AppError, AppResult};
use crate::models::{Session, User};
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when nobody is signed in.
    pub fn load(&self) -> AppResult<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let session: Session = serde_json::from_str(&contents).map_err(|e| {
            AppError::parse(format!(
                "session file {} is corrupt: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        info!("Session saved for user '{}'", session.user.name);
        Ok(())
    }

    /// Replaces the stored user and keeps the token.
    pub fn update_user(&self, user: User) -> AppResult<Session> {
        let current = self
            .load()?
            .ok_or_else(|| AppError::auth("cannot update user: not signed in"))?;
        let session = Session::new(current.token, user);
        self.save(&session)?;
        Ok(session)
    }

    /// Signs out. A missing file is not an error.
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
