//! Session persistence in a JSON file, so consecutive commands share a login.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use api::session::SessionPersistence;
use api::types::Session;

pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Clone, Debug)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionPersistence for FilePersistence {
    fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        if let Err(e) = write_session(&self.path, session) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write session file");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to remove session file"),
        }
    }
}

fn write_session(path: &Path, session: &Session) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(session).map_err(io::Error::other)?;
    fs::write(path, raw)
}

/// `$HOME/.instashare/session.json`, or the working directory without a home.
pub fn default_session_path(home: Option<&str>) -> PathBuf {
    match home.filter(|h| !h.trim().is_empty()) {
        Some(home) => Path::new(home).join(".instashare").join(SESSION_FILE_NAME),
        None => PathBuf::from(".instashare").join(SESSION_FILE_NAME),
    }
}
