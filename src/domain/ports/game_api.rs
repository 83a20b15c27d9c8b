use crate::domain::entities::league::{Fixture, LeagueData};
use crate::domain::entities::roster::{AccountId, AccountSnapshot, TransferRecord};
use crate::domain::error::DomainError;
use crate::domain::values::gameweek::Gameweek;
use crate::domain::values::lineup::LineupMutation;
use crate::domain::values::transfer::TransferRequest;
use async_trait::async_trait;

/// Remote game service: public reads, account reads, and the two mutations.
///
/// Implementations own transport concerns (auth, retries on reads, timeouts).
/// They must surface a refused mutation as [`DomainError::RemoteRejected`] and
/// a network failure as [`DomainError::Transport`], and must never retry a
/// mutation on their own.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Adapter name for logging
    fn name(&self) -> &str;

    /// Whether account-scoped calls can be made. Without a session the
    /// pipeline runs in advisory mode.
    fn has_session(&self) -> bool;

    async fn fetch_league_data(&self) -> Result<LeagueData, DomainError>;

    async fn fetch_fixtures(&self, gameweek: Gameweek) -> Result<Vec<Fixture>, DomainError>;

    /// Authenticated roster with prices, bank and chip availability.
    async fn fetch_roster(&self, account: AccountId) -> Result<AccountSnapshot, DomainError>;

    /// Publicly visible picks for a past gameweek. No prices or account state.
    async fn fetch_public_roster(
        &self,
        account: AccountId,
        gameweek: Gameweek,
    ) -> Result<AccountSnapshot, DomainError>;

    async fn fetch_transfer_history(
        &self,
        account: AccountId,
    ) -> Result<Vec<TransferRecord>, DomainError>;

    /// Submit a transfer batch. With `commit == false` the remote only checks
    /// the batch and changes nothing.
    async fn submit_transfers(
        &self,
        account: AccountId,
        gameweek: Gameweek,
        transfers: &[TransferRequest],
        chip: Option<&str>,
        commit: bool,
    ) -> Result<(), DomainError>;

    async fn submit_lineup(
        &self,
        account: AccountId,
        lineup: &LineupMutation,
    ) -> Result<(), DomainError>;
}
