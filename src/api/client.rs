use log::{info, warn};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::models::{ClubId, OpponentStats, PartnerStats, Player, PlayerStats, RankHistory};
use super::player_id::IntoPlayerId;
use super::urls;
use crate::config::ApiSettings;
use crate::errors::ApiResult;
use crate::http::HttpClient;

const USER_AGENT: &str = "SpiralStats/0.1";
const TIMEOUT_SECS: u64 = 30;

/// Construction options for [`SpiralClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// e.g. "http://localhost:8000"; trailing slashes are dropped
    pub base_url: String,
    /// Sent on every request, overriding the defaults
    pub headers: Vec<(String, String)>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: Vec::new(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ApiSettings> for ClientOptions {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            user_agent: settings.user_agent.to_string(),
            timeout: settings.timeout(),
            ..Self::new(settings.base_url.clone())
        }
    }
}

/// Read-only client for the Spiral OpenSkill stats API
#[derive(Debug, Clone)]
pub struct SpiralClient {
    base_url: String,
    http: HttpClient,
}

impl SpiralClient {
    pub fn new(options: ClientOptions) -> ApiResult<Self> {
        let base_url = urls::normalize_base_url(&options.base_url)?;
        let http = HttpClient::new(&options.user_agent, options.timeout, &options.headers)?;
        info!("Stats API client targeting {}", base_url);
        Ok(Self { base_url, http })
    }

    pub fn from_settings(settings: &ApiSettings) -> ApiResult<Self> {
        Self::new(ClientOptions::from(settings))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /players
    pub async fn get_people(&self, cancel: &CancellationToken) -> ApiResult<Vec<Player>> {
        self.request(&urls::players_path(), cancel).await
    }

    /// GET /rank_history/{player_id}
    pub async fn get_rank_history(
        &self,
        player_id: impl IntoPlayerId,
        cancel: &CancellationToken,
    ) -> ApiResult<RankHistory> {
        let player_id = player_id.into_player_id("get_rank_history")?;
        self.request(&urls::rank_history_path(player_id), cancel).await
    }

    /// GET /player_stats/{player_id}
    pub async fn get_player_stats(
        &self,
        player_id: impl IntoPlayerId,
        cancel: &CancellationToken,
    ) -> ApiResult<PlayerStats> {
        let player_id = player_id.into_player_id("get_player_stats")?;
        self.request(&urls::player_stats_path(player_id), cancel).await
    }

    /// GET /partner_stats/{player_id}?club_id=
    pub async fn get_partner_stats(
        &self,
        player_id: impl IntoPlayerId,
        club_id: Option<ClubId>,
        cancel: &CancellationToken,
    ) -> ApiResult<PartnerStats> {
        let player_id = player_id.into_player_id("get_partner_stats")?;
        self.request(&urls::partner_stats_path(player_id, club_id), cancel)
            .await
    }

    /// GET /opponent_stats/{player_id}?club_id=
    pub async fn get_opponent_stats(
        &self,
        player_id: impl IntoPlayerId,
        club_id: Option<ClubId>,
        cancel: &CancellationToken,
    ) -> ApiResult<OpponentStats> {
        let player_id = player_id.into_player_id("get_opponent_stats")?;
        self.request(&urls::opponent_stats_path(player_id, club_id), cancel)
            .await
    }

    // --- Helper Methods ---

    async fn request<T: DeserializeOwned>(&self, path: &str, cancel: &CancellationToken) -> ApiResult<T> {
        let url = self.build_url(path);

        let result = match self.http.get(&url, cancel).await {
            Ok(response) => response.error_for_status().and_then(|r| r.decode()),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            if !e.is_cancelled() {
                warn!("GET {} failed: {}", url, e);
            }
        }
        result
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;

    #[test]
    fn test_empty_base_url_fails_fast() {
        let err = SpiralClient::new(ClientOptions::new("")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument { .. }));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = SpiralClient::new(ClientOptions::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.build_url("/players"), "http://localhost:8000/players");
    }

    #[test]
    fn test_options_from_settings() {
        let settings = ApiSettings {
            base_url: "http://stats.local".to_string(),
            user_agent: "agent",
            timeout_secs: 3,
        };
        let options = ClientOptions::from(&settings);

        assert_eq!(options.base_url, "http://stats.local");
        assert_eq!(options.user_agent, "agent");
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert!(options.headers.is_empty());
    }
}
