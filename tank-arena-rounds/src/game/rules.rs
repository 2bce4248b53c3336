//! Win/Loss Resolution
//!
//! Pure functions deciding round and game winners from player tallies.
//! All of them degrade to `None` / no-op when fewer than two players exist.

use serde::{Serialize, Deserialize};

use crate::game::config::GameConfig;
use crate::game::player::{Player, PlayerId};

/// Why a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryReason {
    /// Reached `rounds_to_win`.
    RoundsWon,
    /// Opponent reached `max_losses`.
    OpponentLosses,
}

/// True once at most one tank is still active.
pub fn at_most_one_alive(alive: &[bool]) -> bool {
    alive.iter().filter(|a| **a).count() <= 1
}

/// The last tank standing, if exactly one remains.
///
/// `alive` is parallel to `players`.
pub fn round_winner(players: &[Player], alive: &[bool]) -> Option<PlayerId> {
    if players.len() < 2 {
        return None;
    }

    let mut survivors = players
        .iter()
        .zip(alive)
        .filter(|(_, a)| **a)
        .map(|(p, _)| p.id);

    match (survivors.next(), survivors.next()) {
        (Some(id), None) => Some(id),
        _ => None,
    }
}

/// Credit the round: winner gains a win, everyone else a loss.
/// A tied round changes nothing.
pub fn apply_round_result(players: &mut [Player], winner: Option<PlayerId>) {
    if players.len() < 2 {
        return;
    }
    let Some(winner) = winner else {
        return;
    };

    for player in players.iter_mut() {
        if player.id == winner {
            player.wins += 1;
        } else {
            player.losses += 1;
        }
    }
}

/// First player whose wins hit exactly `rounds_to_win`.
pub fn score_winner(players: &[Player], rounds_to_win: u32) -> Option<PlayerId> {
    players.iter().find(|p| p.wins == rounds_to_win).map(|p| p.id)
}

/// First player who has accumulated `max_losses` or more.
pub fn max_losses_player(players: &[Player], max_losses: u32) -> Option<PlayerId> {
    players.iter().find(|p| p.losses >= max_losses).map(|p| p.id)
}

/// The first player that is not `id`.
///
/// Only meaningful for a two-player roster, which the controller enforces.
pub fn other_player(players: &[Player], id: PlayerId) -> Option<PlayerId> {
    if players.len() < 2 {
        return None;
    }
    players.iter().find(|p| p.id != id).map(|p| p.id)
}

/// Decide the game winner after a round's score update.
///
/// The score threshold is checked first; the loss threshold only applies
/// when nobody reached it.
pub fn resolve_game_winner(
    players: &[Player],
    config: &GameConfig,
) -> Option<(PlayerId, VictoryReason)> {
    if let Some(winner) = score_winner(players, config.rounds_to_win) {
        return Some((winner, VictoryReason::RoundsWon));
    }

    let loser = max_losses_player(players, config.max_losses)?;
    other_player(players, loser).map(|winner| (winner, VictoryReason::OpponentLosses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::arena::ActorHandle;
    use crate::game::player::PlayerSetup;
    use proptest::prelude::*;

    fn duel() -> Vec<Player> {
        PlayerSetup::duel()
            .iter()
            .enumerate()
            .map(|(i, setup)| Player::new(PlayerId(i as u8 + 1), setup, ActorHandle(i as u32)))
            .collect()
    }

    #[test]
    fn test_at_most_one_alive() {
        assert!(!at_most_one_alive(&[true, true]));
        assert!(at_most_one_alive(&[true, false]));
        assert!(at_most_one_alive(&[false, false]));
    }

    #[test]
    fn test_round_winner_single_survivor() {
        let players = duel();
        assert_eq!(round_winner(&players, &[false, true]), Some(PlayerId(2)));
        assert_eq!(round_winner(&players, &[true, false]), Some(PlayerId(1)));
    }

    #[test]
    fn test_round_winner_none_when_zero_or_both() {
        let players = duel();
        assert_eq!(round_winner(&players, &[false, false]), None);
        assert_eq!(round_winner(&players, &[true, true]), None);
    }

    #[test]
    fn test_single_player_roster_is_noop() {
        let mut players = duel();
        players.truncate(1);

        assert_eq!(round_winner(&players, &[true]), None);
        assert_eq!(other_player(&players, PlayerId(1)), None);

        apply_round_result(&mut players, Some(PlayerId(1)));
        assert_eq!(players[0].wins, 0);
    }

    #[test]
    fn test_apply_round_result() {
        let mut players = duel();

        apply_round_result(&mut players, Some(PlayerId(1)));
        assert_eq!((players[0].wins, players[0].losses), (1, 0));
        assert_eq!((players[1].wins, players[1].losses), (0, 1));

        // Draw leaves tallies alone
        apply_round_result(&mut players, None);
        assert_eq!((players[0].wins, players[0].losses), (1, 0));
        assert_eq!((players[1].wins, players[1].losses), (0, 1));
    }

    #[test]
    fn test_other_player() {
        let players = duel();
        assert_eq!(other_player(&players, PlayerId(1)), Some(PlayerId(2)));
        assert_eq!(other_player(&players, PlayerId(2)), Some(PlayerId(1)));
    }

    #[test]
    fn test_score_threshold_beats_loss_threshold() {
        let config = GameConfig { rounds_to_win: 3, max_losses: 3, ..GameConfig::default() };
        let mut players = duel();
        players[0].wins = 3;
        players[0].losses = 3;

        assert_eq!(
            resolve_game_winner(&players, &config),
            Some((PlayerId(1), VictoryReason::RoundsWon))
        );
    }

    #[test]
    fn test_loss_threshold_crowns_opponent() {
        let config = GameConfig { rounds_to_win: 5, max_losses: 2, ..GameConfig::default() };
        let mut players = duel();
        players[1].losses = 2;
        players[0].wins = 2;

        assert_eq!(
            resolve_game_winner(&players, &config),
            Some((PlayerId(1), VictoryReason::OpponentLosses))
        );
    }

    #[test]
    fn test_no_winner_below_thresholds() {
        let config = GameConfig::default();
        let mut players = duel();
        players[0].wins = 4;
        players[1].losses = 4;

        assert_eq!(resolve_game_winner(&players, &config), None);
    }

    proptest! {
        /// Play arbitrary round outcomes until the game resolves.
        /// 0 = draw, 1 = player 1 survives, 2 = player 2 survives.
        #[test]
        fn prop_thresholds_always_decide(
            rounds_to_win in 1u32..8,
            max_losses in 1u32..8,
            outcomes in proptest::collection::vec(0u8..3, 0..40),
        ) {
            let config = GameConfig { rounds_to_win, max_losses, ..GameConfig::default() };
            let mut players = duel();

            for outcome in outcomes {
                let before: Vec<(u32, u32)> = players.iter().map(|p| (p.wins, p.losses)).collect();
                let alive = match outcome {
                    1 => [true, false],
                    2 => [false, true],
                    _ => [false, false],
                };

                let winner = round_winner(&players, &alive);
                apply_round_result(&mut players, winner);

                for (p, (w, l)) in players.iter().zip(&before) {
                    prop_assert!(p.wins >= *w);
                    prop_assert!(p.losses >= *l);
                }
                if winner.is_none() {
                    let after: Vec<(u32, u32)> = players.iter().map(|p| (p.wins, p.losses)).collect();
                    prop_assert_eq!(&after, &before);
                }

                match resolve_game_winner(&players, &config) {
                    Some((id, VictoryReason::RoundsWon)) => {
                        let p = players.iter().find(|p| p.id == id).unwrap();
                        prop_assert_eq!(p.wins, rounds_to_win);
                        break;
                    }
                    Some((id, VictoryReason::OpponentLosses)) => {
                        prop_assert!(players.iter().all(|p| p.wins != rounds_to_win));
                        let loser = players.iter().find(|p| p.id != id).unwrap();
                        prop_assert!(loser.losses >= max_losses);
                        break;
                    }
                    None => {
                        prop_assert!(players.iter().all(|p| p.wins != rounds_to_win));
                        prop_assert!(players.iter().all(|p| p.losses < max_losses));
                    }
                }
            }
        }
    }
}
