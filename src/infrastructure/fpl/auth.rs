use crate::domain::error::DomainError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, COOKIE, ORIGIN, REFERER};
use std::time::Duration;
use tracing::debug;

pub const LOGIN_URL: &str = "https://users.premierleague.com/accounts/login/";
const SITE_URL: &str = "https://fantasy.premierleague.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// One way of obtaining an authenticated HTTP client. Strategies are tried
/// in order; the first whose client passes the account probe wins.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Email/password form login; the server sets session cookies.
    Login {
        email: String,
        password: String,
        login_url: String,
    },
    /// Cookie header copied from a logged-in browser.
    Cookie {
        cookie: String,
        /// Also send the cookie's `access_token` as a bearer token.
        bearer: bool,
    },
}

impl AuthStrategy {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        AuthStrategy::Login {
            email: email.into(),
            password: password.into(),
            login_url: LOGIN_URL.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthStrategy::Login { .. } => "login",
            AuthStrategy::Cookie { .. } => "cookie",
        }
    }

    /// Build a client carrying this strategy's credentials. Does not check
    /// that the credentials are accepted by the game API.
    pub async fn acquire(&self, timeout: Duration) -> Result<reqwest::Client, DomainError> {
        match self {
            AuthStrategy::Login {
                email,
                password,
                login_url,
            } => {
                let client = reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .cookie_store(true)
                    .timeout(timeout)
                    .default_headers(api_headers())
                    .build()
                    .map_err(|e| DomainError::Config(e.to_string()))?;

                let form = [
                    ("login", email.as_str()),
                    ("password", password.as_str()),
                    ("app", "plfpl-web"),
                    ("redirect_uri", "https://fantasy.premierleague.com/a/login"),
                ];
                let resp = client
                    .post(login_url)
                    .form(&form)
                    .send()
                    .await
                    .map_err(|e| DomainError::Transport(format!("login request failed: {e}")))?;
                let status = resp.status();
                debug!(%status, "Login response");
                if !status.is_success() {
                    return Err(DomainError::Unauthorized(format!(
                        "login returned {status}"
                    )));
                }
                Ok(client)
            }
            AuthStrategy::Cookie { cookie, bearer } => {
                let mut headers = api_headers();
                let value = HeaderValue::from_str(cookie.trim())
                    .map_err(|e| DomainError::Config(format!("invalid cookie: {e}")))?;
                headers.insert(COOKIE, value);
                if *bearer {
                    if let Some(token) = access_token(cookie) {
                        let value = HeaderValue::from_str(&format!("Bearer {token}"))
                            .map_err(|e| DomainError::Config(format!("invalid access token: {e}")))?;
                        headers.insert(AUTHORIZATION, value);
                    }
                }
                reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .timeout(timeout)
                    .default_headers(headers)
                    .build()
                    .map_err(|e| DomainError::Config(e.to_string()))
            }
        }
    }
}

fn api_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE_URL));
    headers.insert(
        REFERER,
        HeaderValue::from_static("https://fantasy.premierleague.com/my-team"),
    );
    headers
}

/// Value of the `access_token` cookie in a `name=value; name=value` header.
pub fn access_token(cookie: &str) -> Option<&str> {
    cookie.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("access_token")
            .then(|| value.trim())
            .filter(|v| !v.is_empty())
    })
}
