//! Terminal rendering of the computed dashboard and matchup state.

use chrono::DateTime;
use colored::Colorize;

use crate::api::{OtherPlayerStatsEntry, Player, PlayerStats};
use crate::chart::{DensitySamples, EpochMillis};
use crate::errors::ComputationError;
use crate::rating::RankEstimate;
use crate::services::dashboard::PlayerDashboard;
use crate::services::matchmaker::{Matchmaker, Seat, SeatFailure, Team};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 60;

pub fn print_players(players: &[Player]) {
    println!("{}", "Players".bold());
    for player in players {
        println!("  {:>6}  {}", player.id.to_string().dimmed(), player.name);
    }
    println!("{}", format!("{} players", players.len()).dimmed());
}

pub fn print_dashboard(dashboard: &PlayerDashboard) {
    let Some(snapshot) = dashboard.snapshot() else {
        println!("{}", "No player loaded".yellow());
        return;
    };

    println!("{}", format!("Player #{}", snapshot.player_id).bold());
    print_stats(&snapshot.stats);

    let window = dashboard.window();
    println!();
    println!(
        "{} {} .. {}",
        "Skill".bold(),
        format_date(window.start),
        format_date(window.end)
    );
    for band in dashboard.visible_bands() {
        println!(
            "  {}  {:>6.2} {} {:>6.2}",
            band.datetime.format("%Y-%m-%d %H:%M"),
            band.lower_bound,
            format!("{:>6.2}", band.mu).blue(),
            band.upper_bound
        );
    }

    print_others("Partners", &snapshot.partners.partners);
    print_others("Opponents", &snapshot.opponents.opponents);
}

pub fn print_matchup(matchmaker: &Matchmaker, failures: &[SeatFailure]) {
    for team in Team::ALL {
        println!("{}", team.label().bold());
        for seat in team.seats() {
            print_seat(matchmaker, seat);
        }
        println!("  {:<10} {}", "Combined", format_rank(matchmaker.team_rank(team)));
    }

    for failure in failures {
        println!(
            "{}",
            format!(
                "  {} {}: player {} not loaded ({})",
                failure.seat.team().label(),
                failure.seat.label(),
                failure.player_id,
                failure.error
            )
            .red()
        );
    }

    println!();
    match matchmaker.comparison() {
        Ok(samples) => print_curves(&samples),
        Err(e) => print_undefined(&e),
    }
}

fn print_stats(stats: &PlayerStats) {
    let win_rate = stats
        .win_rate()
        .map(|rate| format!("{:.0}%", rate * 100.0))
        .unwrap_or_else(|| "-".to_string());
    let margin = format!("{:.2}", stats.average_points_difference);
    let margin = if stats.average_points_difference < 0.0 {
        margin.red()
    } else {
        margin.green()
    };

    println!("  Total matches          {}", stats.total_matches);
    println!("  Win rate               {}", win_rate.green());
    println!("  Average points margin  {}", margin);
}

fn print_others(title: &str, rows: &[OtherPlayerStatsEntry]) {
    println!();
    println!("{}", title.bold());
    if rows.is_empty() {
        println!("  {}", "none".dimmed());
        return;
    }
    println!("  {:<24} {:>5} {:>8} {:>9}", "Player", "Wins", "Matches", "Win rate");
    for row in rows {
        println!(
            "  {:<24} {:>5} {:>8} {:>8.1}%",
            row.partner_name,
            row.wins,
            row.matches,
            row.effective_win_rate() * 100.0
        );
    }
}

fn print_seat(matchmaker: &Matchmaker, seat: Seat) {
    let player = matchmaker
        .player(seat)
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "-".to_string());
    let rank = matchmaker.rank(seat);
    let curve = matchmaker
        .seat_curve(seat)
        .ok()
        .and_then(|samples| samples.series.first().map(|curve| sparkline(curve, SPARK_WIDTH / 2)))
        .unwrap_or_default();

    println!("  {:<10} {:<6} {}  {}", seat.label(), player, format_rank(rank), curve.dimmed());
}

fn print_curves(samples: &DensitySamples) {
    println!(
        "{} {:.1} .. {:.1}",
        "Skill distribution".bold(),
        samples.domain.min,
        samples.domain.max
    );
    for (index, team) in Team::ALL.iter().enumerate() {
        let Some(curve) = samples.series.get(index) else {
            continue;
        };
        let peak = samples
            .peak(index)
            .map(|(x, _)| format!("peak {:.1}", x))
            .unwrap_or_default();
        let line = sparkline(curve, SPARK_WIDTH);
        let line = if index == 0 { line.blue() } else { line.magenta() };
        println!("  {:<7} {}  {}", team.label(), line, peak.dimmed());
    }
}

fn print_undefined(error: &ComputationError) {
    println!("{}", format!("Skill distribution unavailable: {}", error).yellow());
}

fn format_rank(rank: RankEstimate) -> String {
    format!("Skill: {:.1} (σ {:.2})", rank.mu, rank.sigma)
}

fn format_date(ms: EpochMillis) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Downsample `values` to `width` columns of block characters scaled to their maximum
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let chunk = values.len().div_ceil(width);
    let columns: Vec<f64> = values
        .chunks(chunk)
        .map(|c| c.iter().copied().fold(0.0, f64::max))
        .collect();
    let top = columns.iter().copied().fold(0.0, f64::max);

    columns
        .iter()
        .map(|&v| {
            if top <= 0.0 {
                return SPARK_LEVELS[0];
            }
            let level = ((v / top) * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}
