use crate::models::{AppResult, Credentials};
use crate::services::{CookieCache, WargearClient};
use tracing::debug;

/// Gets a `WargearClient` into a logged-in state, reusing cached cookies when present.
pub struct AuthService {
    cookie_cache: CookieCache,
}

impl AuthService {
    pub fn new(cookie_cache: CookieCache) -> Self {
        Self { cookie_cache }
    }

    pub fn cookie_cache(&self) -> &CookieCache {
        &self.cookie_cache
    }

    /// A cached snapshot is trusted as-is. Otherwise logs in and caches the new cookies.
    /// Login success is not verified, but a login that yields no cookies is not cached.
    pub async fn authorize(
        &self,
        client: &WargearClient,
        credentials: &Credentials,
    ) -> AppResult<()> {
        if let Some(cookies) = self.cookie_cache.load()? {
            debug!(path = %self.cookie_cache.path().display(), "Loading cookies from disk.");
            client.load_cookies(&cookies);
            return Ok(());
        }

        debug!(username = %credentials.username, "Authorizing");
        let issued = client.login(credentials).await?;

        let mut cookies = client.export_cookies();
        cookies.merge(issued);
        if cookies.is_empty() {
            debug!("Login returned no cookies; nothing cached");
            return Ok(());
        }
        self.cookie_cache.save(&cookies)?;
        debug!(count = cookies.len(), "Saved session cookies");
        Ok(())
    }
}
