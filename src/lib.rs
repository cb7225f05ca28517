pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod rating;
pub mod report;
pub mod services;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use tokio_util::sync::CancellationToken;

use crate::api::{IntoPlayerId, PlayerId, SpiralClient};
use crate::chart::EpochMillis;
use crate::cli::Command;
use crate::config::{AppConfig, DAY_MS};
use crate::services::dashboard::PlayerDashboard;
use crate::services::matchmaker::Matchmaker;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_players() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let client = SpiralClient::from_settings(&config.api)?;
        let players = client
            .get_people(&CancellationToken::new())
            .await
            .context("Failed to load players")?;
        report::print_players(&players);
        Ok::<(), anyhow::Error>(())
    })
}

pub fn handle_player(
    player_id: f64,
    club_id: Option<i64>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let client = SpiralClient::from_settings(&config.api)?;
        let mut dashboard = PlayerDashboard::new(client, &config);

        dashboard.select_player(player_id, club_id).await?;
        if let Some(from) = from {
            dashboard.adjust_window_start(day_start_ms(from));
        }
        if let Some(to) = to {
            dashboard.adjust_window_end(day_start_ms(to) + DAY_MS - 1);
        }

        report::print_dashboard(&dashboard);
        Ok::<(), anyhow::Error>(())
    })
}

pub fn handle_matchup(players: [Option<f64>; 4]) -> Result<()> {
    let players = seat_players(players)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let client = SpiralClient::from_settings(&config.api)?;
        let mut matchmaker = Matchmaker::new(client, &config);

        let failures = matchmaker.load(players, &CancellationToken::new()).await?;
        report::print_matchup(&matchmaker, &failures);
        Ok::<(), anyhow::Error>(())
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn seat_players(players: [Option<f64>; 4]) -> Result<[Option<PlayerId>; 4]> {
    let mut seated = [None; 4];
    for (slot, player) in seated.iter_mut().zip(players) {
        *slot = player.map(|id| id.into_player_id("matchup")).transpose()?;
    }
    Ok(seated)
}

fn day_start_ms(day: NaiveDate) -> EpochMillis {
    day.and_time(NaiveTime::default()).and_utc().timestamp_millis()
}
