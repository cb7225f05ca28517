use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::api::{
    ClubId, IntoPlayerId, OpponentStats, PartnerStats, PlayerId, PlayerStats, RankHistory, SpiralClient,
};
use crate::chart::{Band, EpochMillis, TimeWindow, WindowSelector, derive_bands_with};
use crate::config::{AppConfig, ChartSettings};
use crate::domain::{Latest, RequestToken};
use crate::errors::ApiResult;

/// Everything shown for one selected player, fetched together
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub player_id: PlayerId,
    pub club_id: Option<ClubId>,
    pub history: RankHistory,
    pub bands: Vec<Band>,
    pub stats: PlayerStats,
    pub partners: PartnerStats,
    pub opponents: OpponentStats,
}

impl PlayerSnapshot {
    /// Issue the four lookups concurrently and derive the skill bands
    pub async fn fetch(
        client: &SpiralClient,
        player_id: PlayerId,
        club_id: Option<ClubId>,
        band_z: f64,
        cancel: &CancellationToken,
    ) -> ApiResult<Self> {
        let (history, stats, partners, opponents) = tokio::try_join!(
            client.get_rank_history(player_id, cancel),
            client.get_player_stats(player_id, cancel),
            client.get_partner_stats(player_id, club_id, cancel),
            client.get_opponent_stats(player_id, club_id, cancel),
        )?;
        let bands = derive_bands_with(&history.history, band_z);

        Ok(Self {
            player_id,
            club_id,
            history,
            bands,
            stats,
            partners,
            opponents,
        })
    }

    pub fn timestamps_ms(&self) -> Vec<EpochMillis> {
        self.bands.iter().map(Band::timestamp_ms).collect()
    }
}

/// Single-player page state: latest snapshot plus the skill chart window.
///
/// [`PlayerDashboard::select_player`] holds the dashboard for the whole
/// fetch. Callers that keep the dashboard responsive while a player loads
/// split it up: [`PlayerDashboard::begin_selection`], then
/// [`PlayerSnapshot::fetch`] with the returned token, then
/// [`PlayerDashboard::apply`]. A newer selection cancels the older fetch,
/// and `apply` refuses any result that still arrives under an older token.
pub struct PlayerDashboard {
    client: SpiralClient,
    chart: ChartSettings,
    snapshot: Latest<PlayerSnapshot>,
    window: WindowSelector,
    in_flight: Option<CancellationToken>,
}

impl PlayerDashboard {
    pub fn new(client: SpiralClient, config: &AppConfig) -> Self {
        Self {
            client,
            chart: config.chart.clone(),
            snapshot: Latest::new(),
            window: WindowSelector::new(&config.chart),
            in_flight: None,
        }
    }

    /// Start a new selection, cancelling whatever the previous one still has in flight
    pub fn begin_selection(&mut self) -> (RequestToken, CancellationToken) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        (self.snapshot.begin(), cancel)
    }

    /// Store a fetched snapshot unless a newer selection was made meanwhile.
    /// The same player refreshed keeps its window (re-anchored); another
    /// player starts from the full span.
    pub fn apply(&mut self, token: RequestToken, snapshot: PlayerSnapshot) -> bool {
        let same_player = self
            .snapshot
            .get()
            .is_some_and(|current| current.player_id == snapshot.player_id);
        let timestamps = snapshot.timestamps_ms();

        if !self.snapshot.apply(token, snapshot) {
            return false;
        }

        if same_player {
            self.window.reanchor(&timestamps);
        } else {
            self.window.load(&timestamps);
        }
        true
    }

    pub async fn select_player(&mut self, player_id: impl IntoPlayerId, club_id: Option<ClubId>) -> Result<bool> {
        let player_id = player_id.into_player_id("select_player")?;
        let (token, cancel) = self.begin_selection();
        info!("Loading player {}", player_id);

        let snapshot = PlayerSnapshot::fetch(&self.client, player_id, club_id, self.chart.band_z, &cancel)
            .await
            .with_context(|| format!("Failed to load player {}", player_id))?;

        info!(
            "Player {}: {} rated matches, {} partners, {} opponents",
            player_id,
            snapshot.history.history.len(),
            snapshot.partners.partners.len(),
            snapshot.opponents.opponents.len()
        );
        Ok(self.apply(token, snapshot))
    }

    pub fn snapshot(&self) -> Option<&PlayerSnapshot> {
        self.snapshot.get()
    }

    pub fn window(&self) -> TimeWindow {
        self.window.window()
    }

    pub fn adjust_window_start(&mut self, start: EpochMillis) -> TimeWindow {
        self.window.adjust_start(start)
    }

    pub fn adjust_window_end(&mut self, end: EpochMillis) -> TimeWindow {
        self.window.adjust_end(end)
    }

    /// Bands inside the current window
    pub fn visible_bands(&self) -> Vec<&Band> {
        match self.snapshot.get() {
            Some(snapshot) => self.window.visible(&snapshot.bands, Band::timestamp_ms),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientOptions, RankHistoryEntry};
    use crate::config::DAY_MS;
    use chrono::{DateTime, NaiveDateTime};

    const T0: EpochMillis = 1_740_000_000_000;

    fn datetime(ms: EpochMillis) -> NaiveDateTime {
        DateTime::from_timestamp_millis(ms).unwrap().naive_utc()
    }

    fn snapshot(player_id: PlayerId, stamps: &[EpochMillis]) -> PlayerSnapshot {
        let history = RankHistory {
            player_id,
            history: stamps
                .iter()
                .enumerate()
                .map(|(i, &ms)| RankHistoryEntry {
                    club_id: Some(1),
                    match_id: i as i64,
                    date: None,
                    start_time: None,
                    datetime: datetime(ms),
                    winner: i % 2 == 0,
                    mu: 25.0 + i as f64,
                    sigma: 5.0,
                })
                .collect(),
        };
        let bands = crate::chart::derive_bands(&history.history);

        PlayerSnapshot {
            player_id,
            club_id: None,
            history,
            bands,
            stats: PlayerStats {
                player_id,
                average_points_difference: 1.0,
                total_matches: stamps.len() as i64,
                wins: 1,
            },
            partners: PartnerStats {
                player_id,
                club_id: None,
                partners: vec![],
            },
            opponents: OpponentStats {
                player_id,
                club_id: None,
                opponents: vec![],
            },
        }
    }

    fn dashboard() -> PlayerDashboard {
        let client = SpiralClient::new(ClientOptions::new("http://localhost:8000")).unwrap();
        PlayerDashboard::new(client, &AppConfig::default())
    }

    #[test]
    fn test_new_player_resets_window() {
        let mut dashboard = dashboard();
        let (token, _) = dashboard.begin_selection();

        assert!(dashboard.apply(token, snapshot(1, &[T0, T0 + 10 * DAY_MS])));
        assert_eq!(dashboard.window(), TimeWindow::new(T0, T0 + 10 * DAY_MS));
        assert_eq!(dashboard.visible_bands().len(), 2);
    }

    #[test]
    fn test_refresh_of_same_player_reanchors() {
        let mut dashboard = dashboard();
        let (token, _) = dashboard.begin_selection();
        dashboard.apply(token, snapshot(1, &[T0, T0 + 10 * DAY_MS]));
        dashboard.adjust_window_start(T0 + 4 * DAY_MS);

        let (token, _) = dashboard.begin_selection();
        dashboard.apply(token, snapshot(1, &[T0, T0 + 5 * DAY_MS, T0 + 12 * DAY_MS]));
        assert_eq!(dashboard.window(), TimeWindow::new(T0 + 4 * DAY_MS, T0 + 10 * DAY_MS));
        assert_eq!(dashboard.visible_bands().len(), 1);

        let (token, _) = dashboard.begin_selection();
        dashboard.apply(token, snapshot(2, &[T0, T0 + 12 * DAY_MS]));
        assert_eq!(dashboard.window(), TimeWindow::new(T0, T0 + 12 * DAY_MS));
    }

    #[test]
    fn test_stale_selection_is_ignored() {
        let mut dashboard = dashboard();
        let (first, first_cancel) = dashboard.begin_selection();
        let (second, _) = dashboard.begin_selection();

        assert!(first_cancel.is_cancelled());
        assert!(dashboard.apply(second, snapshot(2, &[T0])));
        assert!(!dashboard.apply(first, snapshot(1, &[T0, T0 + DAY_MS])));
        assert_eq!(dashboard.snapshot().unwrap().player_id, 2);
    }

    #[test]
    fn test_empty_history_uses_default_window() {
        let mut dashboard = dashboard();
        let (token, _) = dashboard.begin_selection();
        dashboard.apply(token, snapshot(3, &[]));

        let chart = ChartSettings::default();
        assert_eq!(
            dashboard.window(),
            TimeWindow::new(chart.default_window_start_ms, chart.default_window_end_ms)
        );
        assert!(dashboard.visible_bands().is_empty());
    }
}
