use anyhow::{Context, Result};
use log::{info, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::api::{PlayerId, SpiralClient};
use crate::chart::{DensitySamples, DomainHint, ensure_sampleable_with, sample_densities_with};
use crate::config::{AppConfig, ChartSettings};
use crate::domain::{Latest, RequestToken};
use crate::errors::{ApiError, ApiResult, ComputationError};
use crate::rating::{RankEstimate, combine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::One, Team::Two];

    pub fn seats(self) -> [Seat; 2] {
        match self {
            Team::One => [Seat::TeamOneFirst, Seat::TeamOneSecond],
            Team::Two => [Seat::TeamTwoFirst, Seat::TeamTwoSecond],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::One => "Team 1",
            Team::Two => "Team 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    TeamOneFirst,
    TeamOneSecond,
    TeamTwoFirst,
    TeamTwoSecond,
}

impl Seat {
    pub const ALL: [Seat; 4] = [
        Seat::TeamOneFirst,
        Seat::TeamOneSecond,
        Seat::TeamTwoFirst,
        Seat::TeamTwoSecond,
    ];

    fn index(self) -> usize {
        match self {
            Seat::TeamOneFirst => 0,
            Seat::TeamOneSecond => 1,
            Seat::TeamTwoFirst => 2,
            Seat::TeamTwoSecond => 3,
        }
    }

    pub fn team(self) -> Team {
        match self {
            Seat::TeamOneFirst | Seat::TeamOneSecond => Team::One,
            Seat::TeamTwoFirst | Seat::TeamTwoSecond => Team::Two,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Seat::TeamOneFirst | Seat::TeamTwoFirst => "Player 1",
            Seat::TeamOneSecond | Seat::TeamTwoSecond => "Player 2",
        }
    }
}

/// A seat whose rank lookup failed; the seat keeps whatever it showed before the lookup
#[derive(Debug)]
pub struct SeatFailure {
    pub seat: Seat,
    pub player_id: PlayerId,
    pub error: ApiError,
}

#[derive(Debug, Default)]
struct SeatState {
    player: Option<PlayerId>,
    rank: Latest<RankEstimate>,
}

/// Two-versus-two matchup: per-seat estimates, team estimates and the
/// density curves comparing them
pub struct Matchmaker {
    client: SpiralClient,
    chart: ChartSettings,
    prior: RankEstimate,
    seats: [SeatState; 4],
}

impl Matchmaker {
    pub fn new(client: SpiralClient, config: &AppConfig) -> Self {
        Self {
            client,
            chart: config.chart.clone(),
            prior: RankEstimate::prior(&config.rating),
            seats: Default::default(),
        }
    }

    pub fn player(&self, seat: Seat) -> Option<PlayerId> {
        self.seats[seat.index()].player
    }

    /// Seat estimate, or the prior while none has been loaded
    pub fn rank(&self, seat: Seat) -> RankEstimate {
        self.seats[seat.index()]
            .rank
            .get()
            .copied()
            .unwrap_or(self.prior)
    }

    pub fn team_rank(&self, team: Team) -> RankEstimate {
        let [first, second] = team.seats();
        combine(self.rank(first), self.rank(second))
    }

    /// Seat a player (or empty the seat); results for earlier picks become
    /// stale. A different occupant starts from the prior until its rank arrives.
    pub fn begin_seat(&mut self, seat: Seat, player: Option<PlayerId>) -> RequestToken {
        let state = &mut self.seats[seat.index()];
        if player.is_none() || state.player != player {
            state.rank.clear();
        }
        state.player = player;
        state.rank.begin()
    }

    /// Store a looked-up estimate; a player without history is shown with the prior
    pub fn apply_rank(&mut self, seat: Seat, token: RequestToken, rank: Option<RankEstimate>) -> bool {
        let state = &mut self.seats[seat.index()];
        match rank {
            Some(rank) => state.rank.apply(token, rank),
            None if state.rank.is_current(token) => {
                state.rank.clear();
                true
            }
            None => false,
        }
    }

    /// Seat all four players and look their ranks up concurrently,
    /// applying each as soon as it completes
    pub async fn load(&mut self, players: [Option<PlayerId>; 4], cancel: &CancellationToken) -> Result<Vec<SeatFailure>> {
        let mut lookups = JoinSet::new();

        for (seat, player) in Seat::ALL.into_iter().zip(players) {
            let token = self.begin_seat(seat, player);
            let Some(player_id) = player else {
                continue;
            };

            let client = self.client.clone();
            let cancel = cancel.clone();
            lookups.spawn(async move {
                let rank = fetch_latest_rank(&client, player_id, &cancel).await;
                (seat, player_id, token, rank)
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = lookups.join_next().await {
            let (seat, player_id, token, rank) = joined.context("Rank lookup task failed")?;
            match rank {
                Ok(rank) => {
                    if self.apply_rank(seat, token, rank) {
                        info!("{} {}: player {} rated {:?}", seat.team().label(), seat.label(), player_id, rank);
                    }
                }
                Err(error) => {
                    warn!("Rank lookup for player {} failed: {}", player_id, error);
                    failures.push(SeatFailure {
                        seat,
                        player_id,
                        error,
                    });
                }
            }
        }

        Ok(failures)
    }

    /// Density curves of both team estimates on a shared axis starting at zero
    pub fn comparison(&self) -> Result<DensitySamples, ComputationError> {
        let ranks: Vec<_> = Team::ALL.iter().map(|&team| self.team_rank(team)).collect();
        self.sample(&ranks)
    }

    pub fn seat_curve(&self, seat: Seat) -> Result<DensitySamples, ComputationError> {
        self.sample(&[self.rank(seat)])
    }

    fn sample(&self, ranks: &[RankEstimate]) -> Result<DensitySamples, ComputationError> {
        let hint = Some(DomainHint::from_min(0.0));
        ensure_sampleable_with(ranks, hint, self.chart.domain_sigmas)?;
        Ok(sample_densities_with(
            ranks,
            hint,
            self.chart.sample_count,
            self.chart.domain_sigmas,
        ))
    }
}

/// Estimate after the player's most recent match, `None` without history
pub async fn fetch_latest_rank(
    client: &SpiralClient,
    player_id: PlayerId,
    cancel: &CancellationToken,
) -> ApiResult<Option<RankEstimate>> {
    let history = client.get_rank_history(player_id, cancel).await?;
    Ok(history.latest_estimate())
}
