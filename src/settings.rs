use crate::models::{AppResult, Credentials};
use crate::services::{DEFAULT_BASE_URL, DEFAULT_COOKIE_PATH};
use crate::utils::validate_url;
use config::{Config, Environment};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "WARGEAR";

/// Runtime settings. `user` and `pass` come from `WARGEAR_USER` / `WARGEAR_PASS`
/// and have no default.
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub user: String,
    pub pass: String,
    pub base_url: String,
    pub cookie_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> AppResult<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_environment(environment: Environment) -> AppResult<Self> {
        let settings: Settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("cookie_path", DEFAULT_COOKIE_PATH)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        validate_url(&settings.base_url)?;
        Ok(settings)
    }

    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        cookie_path: Option<PathBuf>,
    ) -> AppResult<Self> {
        if let Some(base_url) = base_url {
            validate_url(&base_url)?;
            self.base_url = base_url;
        }
        if let Some(cookie_path) = cookie_path {
            self.cookie_path = cookie_path;
        }
        Ok(self)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.user.clone(), self.pass.clone())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("cookie_path", &self.cookie_path)
            .finish()
    }
}
