use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Spiral OpenSkill stats viewer")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// List all players
    Players,
    /// Show a player's skill history, match stats, partners and opponents
    Player {
        /// Player id
        #[arg(allow_negative_numbers = true)]
        player_id: f64,
        /// Only count partner/opponent matches played at this club
        #[arg(short, long)]
        club_id: Option<i64>,
        /// First day shown in the skill chart (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day shown in the skill chart (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Compare two teams of two players
    Matchup {
        #[arg(long)]
        player_one: Option<f64>,
        #[arg(long)]
        player_two: Option<f64>,
        #[arg(long)]
        player_three: Option<f64>,
        #[arg(long)]
        player_four: Option<f64>,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_command() {
        let cli = Cli::parse_from(["spiral_stats", "player", "12", "--club-id", "1", "--from", "2025-03-01"]);

        assert_eq!(
            cli.command,
            Command::Player {
                player_id: 12.0,
                club_id: Some(1),
                from: NaiveDate::from_ymd_opt(2025, 3, 1),
                to: None,
            }
        );
    }

    #[test]
    fn test_parse_matchup_with_empty_seats() {
        let cli = Cli::parse_from(["spiral_stats", "matchup", "--player-one", "3", "--player-four", "8"]);

        assert_eq!(
            cli.command,
            Command::Matchup {
                player_one: Some(3.0),
                player_two: None,
                player_three: None,
                player_four: Some(8.0),
            }
        );
    }
}
