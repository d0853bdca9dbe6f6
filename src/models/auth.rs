use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Form body for `POST /player/login`.
    pub fn login_form(&self) -> [(&'static str, &str); 5] {
        [
            ("uid", ""),
            ("username", &self.username),
            ("password", &self.password),
            ("cookie_setting", "autologin"),
            ("loginbtn", "loginbtn"),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Cookie name to value, as persisted in the cookie cache file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieSnapshot(pub serde_json::Map<String, serde_json::Value>);

impl CookieSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0
            .insert(name.into(), serde_json::Value::String(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(name, value)` pairs; non-string values are rendered as JSON.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> {
        self.0.iter().map(|(name, value)| {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.as_str(), value)
        })
    }

    /// Records the `name=value` pair of a `Set-Cookie` header, ignoring its attributes.
    pub fn add_set_cookie(&mut self, header: &str) {
        let pair = header.split(';').next().and_then(|pair| pair.split_once('='));
        if let Some((name, value)) = pair {
            let name = name.trim();
            if !name.is_empty() {
                self.insert(name, value.trim());
            }
        }
    }

    /// Adds every cookie of `other`, replacing values for names already present.
    pub fn merge(&mut self, other: CookieSnapshot) {
        self.0.extend(other.0);
    }

    /// Parses a `Cookie` request header value (`a=1; b=2`).
    pub fn from_cookie_header(header: &str) -> Self {
        let mut snapshot = Self::new();
        for pair in header.split(';') {
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    snapshot.insert(name, value.trim());
                }
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_parsing() {
        let snapshot = CookieSnapshot::from_cookie_header("PHPSESSID=abc123; wg_auto=xyz");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("PHPSESSID"), Some("abc123"));
        assert_eq!(snapshot.get("wg_auto"), Some("xyz"));
    }

    #[test]
    fn test_cookie_header_keeps_equals_in_value() {
        let snapshot = CookieSnapshot::from_cookie_header("token=a=b==");
        assert_eq!(snapshot.get("token"), Some("a=b=="));
    }

    #[test]
    fn test_set_cookie_attributes_are_ignored() {
        let mut snapshot = CookieSnapshot::new();
        snapshot.add_set_cookie("PHPSESSID=fresh; path=/player; HttpOnly");
        snapshot.add_set_cookie("wg_auto=1");
        snapshot.add_set_cookie("; Secure");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("PHPSESSID"), Some("fresh"));
        assert_eq!(snapshot.get("wg_auto"), Some("1"));
    }

    #[test]
    fn test_merge_prefers_newer_values() {
        let mut jar = CookieSnapshot::from_cookie_header("PHPSESSID=old; seed=1");
        jar.merge(CookieSnapshot::from_cookie_header("PHPSESSID=new"));
        assert_eq!(jar.get("PHPSESSID"), Some("new"));
        assert_eq!(jar.get("seed"), Some("1"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("alice", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_login_form_fields() {
        let creds = Credentials::new("alice", "hunter2");
        let form = creds.login_form();
        assert_eq!(form[0], ("uid", ""));
        assert_eq!(form[1], ("username", "alice"));
        assert_eq!(form[2], ("password", "hunter2"));
        assert_eq!(form[3], ("cookie_setting", "autologin"));
        assert_eq!(form[4], ("loginbtn", "loginbtn"));
    }
}
