use crate::models::{AppError, AppResult, CookieSnapshot, Credentials};
use crate::services::ProfilePage;
use crate::utils::validate_url;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://www.wargear.net";

const LOGIN_PATH: &str = "/player/login";
const GAME_LIST_PATH: &str = "/rest/GetGameList/my";

/// HTTP session against the Wargear site. Cookies set by the server are kept in
/// `cookie_jar` for the lifetime of the client.
pub struct WargearClient {
    client: Client,
    anonymous: Client,
    cookie_jar: Arc<Jar>,
    base_url: Url,
}

impl WargearClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        validate_url(base_url)?;
        let base_url =
            Url::parse(base_url).map_err(|_| AppError::InvalidUrl(base_url.to_string()))?;

        let cookie_jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()?;

        Ok(Self {
            client,
            anonymous: Client::new(),
            cookie_jar,
            base_url,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Cached cookies are site-wide, whatever path originally set them.
    pub fn load_cookies(&self, cookies: &CookieSnapshot) {
        for (name, value) in cookies.iter() {
            self.cookie_jar
                .add_cookie_str(&format!("{}={}; Path=/", name, value), &self.base_url);
        }
    }

    /// Cookies the jar would send to the site root or to the login page.
    pub fn export_cookies(&self) -> CookieSnapshot {
        let mut cookies = CookieSnapshot::new();
        let login_url = self.base_url.join(LOGIN_PATH).ok();
        for url in std::iter::once(&self.base_url).chain(login_url.as_ref()) {
            if let Some(header) = self.cookie_jar.cookies(url) {
                if let Ok(header) = header.to_str() {
                    cookies.merge(CookieSnapshot::from_cookie_header(header));
                }
            }
        }
        cookies
    }

    /// Seeds the session with the login page, then posts the login form.
    ///
    /// Returns every cookie set by either response, regardless of its `Path`.
    /// The response is not inspected: a rejected login still returns `Ok`.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<CookieSnapshot> {
        let url = self.endpoint(LOGIN_PATH);
        let mut issued = CookieSnapshot::new();

        let page = self.client.get(&url).send().await?;
        collect_set_cookies(page.headers(), &mut issued);

        let response = self
            .client
            .post(&url)
            .form(&credentials.login_form())
            .send()
            .await?;
        collect_set_cookies(response.headers(), &mut issued);

        debug!(status = %response.status(), issued = issued.len(), "login form submitted");
        Ok(issued)
    }

    /// Raw body of `/rest/GetGameList/my`; the caller is expected to have authorized first.
    pub async fn fetch_game_list(&self, username: &str) -> AppResult<Value> {
        let response = self
            .client
            .get(self.endpoint(GAME_LIST_PATH))
            .query(&[("viewselector", "Live"), ("player", username)])
            .send()
            .await?;

        let games = response.json::<Value>().await?;
        Ok(games)
    }

    /// Fetches a public profile page without the session cookies.
    pub async fn fetch_profile(&self, player: &str) -> AppResult<ProfilePage> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["players", "info", player]);

        let content = self.anonymous.get(url).send().await?.text().await?;
        Ok(ProfilePage(content))
    }
}

fn collect_set_cookies(headers: &HeaderMap, cookies: &mut CookieSnapshot) {
    for value in headers.get_all(SET_COOKIE) {
        if let Ok(value) = value.to_str() {
            cookies.add_set_cookie(value);
        }
    }
}
