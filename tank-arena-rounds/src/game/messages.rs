//! Status Messages
//!
//! Text published to the presentation sink at each phase boundary.

use std::time::Duration;

use crate::game::config::GameConfig;
use crate::game::player::{Player, PlayerId};
use crate::game::rules::other_player;
use crate::game::timer::format_total;

/// Footer on summaries that are followed by an automatic restart.
pub const RESTART_NOTICE: &str = "Restarting in 10 seconds...";

fn find(players: &[Player], id: PlayerId) -> Option<&Player> {
    players.iter().find(|p| p.id == id)
}

fn tally_block(players: &[Player]) -> String {
    let mut out = String::new();
    for player in players {
        out.push_str(&player.tally());
        out.push('\n');
    }
    out
}

/// Banner shown while a round is starting.
pub fn round_banner(round_number: u32) -> String {
    format!("ROUND {}", round_number)
}

/// Result shown during RoundEnding.
///
/// Once the game is decided the tally gives way to the game-winner headline.
pub fn round_end(
    players: &[Player],
    round_winner: Option<PlayerId>,
    game_winner: Option<PlayerId>,
) -> String {
    if let Some(winner) = game_winner.and_then(|id| find(players, id)) {
        return format!("{} WINS THE GAME!", winner.label());
    }

    let mut message = match round_winner.and_then(|id| find(players, id)) {
        Some(winner) => format!("{} WINS THE ROUND!", winner.label()),
        None => "DRAW!".to_string(),
    };

    message.push_str("\n\n\n\n");
    message.push_str(&tally_block(players));
    message
}

/// Final summary for a game with a winner.
pub fn game_over(
    players: &[Player],
    winner: PlayerId,
    config: &GameConfig,
    elapsed: Duration,
) -> String {
    let Some(winner) = find(players, winner) else {
        return String::new();
    };
    let opponent = other_player(players, winner.id).and_then(|id| find(players, id));

    let mut message = format!("{} WINS THE GAME\n\n", winner.label());

    message.push_str("Winner:\n");
    message.push_str(&format!("  Wins: {}\n", winner.wins));
    message.push_str(&format!("  Losses: {}\n\n", winner.losses));

    if let Some(opponent) = opponent {
        message.push_str("Opponent:\n");
        message.push_str(&format!("  {}\n", opponent.label()));
        message.push_str(&format!(
            "  Wins: {}  |  Losses: {}\n\n",
            opponent.wins, opponent.losses
        ));
    }

    // Annotated from the tallies, score threshold first
    if winner.wins >= config.rounds_to_win {
        message.push_str(&format!(
            "Victory by reaching {} rounds won\n",
            config.rounds_to_win
        ));
    } else if opponent.is_some_and(|o| o.losses >= config.max_losses) {
        message.push_str(&format!(
            "Victory by opponent accumulating {} losses\n",
            config.max_losses
        ));
    }

    message.push_str(&format!("\nTotal time: {}\n", format_total(elapsed)));
    message.push_str(RESTART_NOTICE);
    message
}

/// Final summary when neither player met a threshold.
pub fn perfect_tie(players: &[Player], elapsed: Duration) -> String {
    let mut message = String::from("PERFECT TIE\n\n");
    message.push_str(&tally_block(players));
    message.push_str("\nBoth players tied\n");
    message.push_str(&format!("Total time: {}\n", format_total(elapsed)));
    message.push_str(RESTART_NOTICE);
    message
}

/// Final summary when the game clock ran out.
pub fn time_expired(players: &[Player], elapsed: Duration) -> String {
    let mut message = String::from("TIME'S UP! Both players lose.\n\n");
    message.push_str(&tally_block(players));
    message.push_str(&format!("\nTotal time: {}\n", format_total(elapsed)));
    message.push_str(RESTART_NOTICE);
    message
}
