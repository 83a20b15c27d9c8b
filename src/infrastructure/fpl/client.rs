use super::auth::AuthStrategy;
use super::wire::{
    BootstrapStatic, LineupPayload, MyTeam, PublicPicks, TransferPayload, WireFixture,
    WireTransfer,
};
use crate::domain::entities::league::{Fixture, LeagueData};
use crate::domain::entities::roster::{AccountId, AccountSnapshot, TransferRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::game_api::GameApi;
use crate::domain::values::game_rules::GameRules;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::lineup::LineupMutation;
use crate::domain::values::transfer::TransferRequest;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://fantasy.premierleague.com/api";

/// Backoff for GET requests. Mutations are never retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): base, 2x base, 4x base...
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

#[derive(Debug, Clone)]
pub struct FplConfig {
    pub base_url: String,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    /// Needed to read chip names in account responses.
    pub rules: GameRules,
}

impl Default for FplConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(30),
            rules: GameRules::default(),
        }
    }
}

pub struct FplClient {
    config: FplConfig,
    public: reqwest::Client,
    session: Option<reqwest::Client>,
    session_strategy: Option<&'static str>,
}

impl FplClient {
    /// Client with public access only.
    pub fn new(config: FplConfig) -> Self {
        let public = reqwest::Client::builder()
            .user_agent("squadpilot/0.1")
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self {
            config,
            public,
            session: None,
            session_strategy: None,
        }
    }

    /// Try each strategy in order, probing it against the account's team
    /// endpoint. Ends without a session if none works; that is not an error.
    pub async fn connect(config: FplConfig, strategies: &[AuthStrategy], account: AccountId) -> Self {
        let mut client = Self::new(config);
        for strategy in strategies {
            let candidate = match strategy.acquire(client.config.timeout).await {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "Authentication strategy failed");
                    continue;
                }
            };
            let probe: Result<MyTeam, DomainError> = client
                .get_json(&candidate, &format!("my-team/{account}/"), &[])
                .await;
            match probe {
                Ok(_) => {
                    info!(strategy = strategy.name(), "Authenticated session established");
                    client.session = Some(candidate);
                    client.session_strategy = Some(strategy.name());
                    return client;
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "Session probe failed")
                }
            }
        }
        if !strategies.is_empty() {
            warn!("No authentication strategy succeeded");
        }
        client
    }

    /// Name of the strategy that produced the session, if any.
    pub fn session_strategy(&self) -> Option<&str> {
        self.session_strategy
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn session(&self) -> Result<&reqwest::Client, DomainError> {
        self.session
            .as_ref()
            .ok_or_else(|| DomainError::Unauthorized("no authenticated session".into()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DomainError> {
        let url = self.url(path);
        let attempts = self.config.retry.attempts.max(1);
        let mut last_error = String::new();

        for attempt in 0..attempts {
            if attempt > 0 {
                tokio::time::sleep(self.config.retry.delay(attempt - 1)).await;
            }
            let resp = match client.get(&url).query(query).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = format!("GET {path}: {e}");
                    warn!(attempt, error = %e, %path, "Request failed");
                    continue;
                }
            };

            let status = resp.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                last_error = format!("GET {path} returned {status}");
                warn!(attempt, %status, %path, "Retryable response");
                continue;
            }
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(DomainError::Unauthorized(format!("GET {path} returned {status}")));
            }
            if status == StatusCode::NOT_FOUND {
                return Err(DomainError::NotFound(format!("GET {path}")));
            }
            if !status.is_success() {
                return Err(DomainError::Transport(format!("GET {path} returned {status}")));
            }

            debug!(%path, %status, "GET ok");
            return resp
                .json::<T>()
                .await
                .map_err(|e| DomainError::Parse(format!("GET {path}: {e}")));
        }

        Err(DomainError::Transport(format!(
            "{last_error} (after {attempts} attempts)"
        )))
    }

    /// Single attempt. A 4xx other than auth failures is the remote refusing
    /// the change and carries the response body as the reason.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        referer: &str,
        body: &B,
    ) -> Result<(), DomainError> {
        let resp = self
            .session()?
            .post(self.url(path))
            .header(reqwest::header::REFERER, referer)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("POST {path}: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            debug!(%path, %status, "POST ok");
            return Ok(());
        }
        let text = resp.text().await.unwrap_or_default();
        let detail = if text.is_empty() {
            status.to_string()
        } else {
            format!("{status}: {}", truncate(&text, 500))
        };
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(DomainError::Unauthorized(format!("POST {path}: {detail}")))
            }
            s if s.is_client_error() => Err(DomainError::RemoteRejected(detail)),
            _ => Err(DomainError::Transport(format!("POST {path}: {detail}"))),
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[async_trait]
impl GameApi for FplClient {
    fn name(&self) -> &str {
        "fpl"
    }

    fn has_session(&self) -> bool {
        self.session.is_some()
    }

    async fn fetch_league_data(&self) -> Result<LeagueData, DomainError> {
        let bootstrap: BootstrapStatic =
            self.get_json(&self.public, "bootstrap-static/", &[]).await?;
        Ok(bootstrap.into_league())
    }

    async fn fetch_fixtures(&self, gameweek: Gameweek) -> Result<Vec<Fixture>, DomainError> {
        let fixtures: Vec<WireFixture> = self
            .get_json(
                &self.public,
                "fixtures/",
                &[("event", gameweek.value().to_string())],
            )
            .await?;
        Ok(fixtures.into_iter().map(WireFixture::into_fixture).collect())
    }

    async fn fetch_roster(&self, account: AccountId) -> Result<AccountSnapshot, DomainError> {
        let team: MyTeam = self
            .get_json(self.session()?, &format!("my-team/{account}/"), &[])
            .await?;
        Ok(team.into_snapshot(&self.config.rules))
    }

    async fn fetch_public_roster(
        &self,
        account: AccountId,
        gameweek: Gameweek,
    ) -> Result<AccountSnapshot, DomainError> {
        let path = format!("entry/{account}/event/{}/picks/", gameweek.value());
        let picks: PublicPicks = self.get_json(&self.public, &path, &[]).await?;
        Ok(picks.into_snapshot())
    }

    async fn fetch_transfer_history(
        &self,
        account: AccountId,
    ) -> Result<Vec<TransferRecord>, DomainError> {
        let rows: Vec<WireTransfer> = self
            .get_json(self.session()?, &format!("entry/{account}/transfers/"), &[])
            .await?;
        Ok(rows.into_iter().filter_map(WireTransfer::into_record).collect())
    }

    async fn submit_transfers(
        &self,
        account: AccountId,
        gameweek: Gameweek,
        transfers: &[TransferRequest],
        chip: Option<&str>,
        commit: bool,
    ) -> Result<(), DomainError> {
        let payload = TransferPayload {
            entry: account,
            event: gameweek.value(),
            transfers,
            chip,
            confirmed: commit,
        };
        self.post_json(
            "transfers/",
            "https://fantasy.premierleague.com/transfers",
            &payload,
        )
        .await
    }

    async fn submit_lineup(
        &self,
        account: AccountId,
        lineup: &LineupMutation,
    ) -> Result<(), DomainError> {
        let payload = LineupPayload {
            picks: &lineup.picks,
            chip: lineup.chip.as_deref(),
        };
        self.post_json(
            &format!("my-team/{account}/"),
            "https://fantasy.premierleague.com/my-team",
            &payload,
        )
        .await
    }
}
