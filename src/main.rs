use anyhow::Result;

use spiral_stats::cli::Command;
use spiral_stats::{handle_completions, handle_matchup, handle_player, handle_players, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Players => handle_players(),
        Command::Player {
            player_id,
            club_id,
            from,
            to,
        } => handle_player(*player_id, *club_id, *from, *to),
        Command::Matchup {
            player_one,
            player_two,
            player_three,
            player_four,
        } => handle_matchup([*player_one, *player_two, *player_three, *player_four]),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
