use serde::Serialize;

use super::runner::GameRecord;
use crate::game::{GameOutcome, Player};

/// Tallies over a series of finished games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    human_wins: usize,
    computer_wins: usize,
    ties: usize,
    total_moves: usize,
    human_cells: usize,
    computer_cells: usize,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: &GameRecord) {
        match record.outcome {
            GameOutcome::Winner(Player::Human) => self.human_wins += 1,
            GameOutcome::Winner(Player::Computer) => self.computer_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }
        self.total_moves += record.moves.len();
        self.human_cells += record.score_human;
        self.computer_cells += record.score_computer;
    }

    pub fn total(&self) -> usize {
        self.human_wins + self.computer_wins + self.ties
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::Human => self.human_wins,
            Player::Computer => self.computer_wins,
        }
    }

    pub fn ties(&self) -> usize {
        self.ties
    }

    /// Fraction of games won by `player`.
    pub fn win_rate(&self, player: Player) -> f32 {
        let n = self.total();
        if n == 0 {
            return 0.0;
        }
        self.wins(player) as f32 / n as f32
    }

    /// Average cells taken per game by `player`.
    pub fn average_cells(&self, player: Player) -> f32 {
        let n = self.total();
        if n == 0 {
            return 0.0;
        }
        let cells = match player {
            Player::Human => self.human_cells,
            Player::Computer => self.computer_cells,
        };
        cells as f32 / n as f32
    }

    /// Average claims per game.
    pub fn average_game_length(&self) -> f32 {
        let n = self.total();
        if n == 0 {
            return 0.0;
        }
        self.total_moves as f32 / n as f32
    }
}
