use crate::models::{AppResult, CookieSnapshot};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_COOKIE_PATH: &str = "cookies.json";

/// Session cookies persisted between runs. No locking: one process at a time.
#[derive(Debug, Clone)]
pub struct CookieCache {
    path: PathBuf,
}

impl CookieCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no snapshot has been written yet.
    pub fn load(&self) -> AppResult<Option<CookieSnapshot>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    pub fn save(&self, cookies: &CookieSnapshot) -> AppResult<()> {
        let content = serde_json::to_string(cookies)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Default for CookieCache {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_PATH)
    }
}
