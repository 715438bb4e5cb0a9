use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Board, ClaimResult, EdgeId, Player};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Player),
    Tie,
}

/// Board plus scores, whose turn it is, and whether the game has ended.
///
/// Claims go through [`GameState::claim_edge`], which credits the current
/// player. Passing the turn is left to the caller so several claims can be
/// evaluated as a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    score_human: usize,
    score_computer: usize,
    game_over: bool,
}

impl GameState {
    /// Create a fresh game on an empty `size x size` board
    pub fn new(size: usize, first: Player) -> Self {
        GameState {
            board: Board::new(size),
            current_player: first,
            score_human: 0,
            score_computer: 0,
            game_over: size == 0,
        }
    }

    /// Wrap an existing position, recounting scores from cell owners
    pub fn from_board(board: Board, current_player: Player) -> Self {
        let score_human = board.owned_cell_count(Player::Human);
        let score_computer = board.owned_cell_count(Player::Computer);
        let game_over = board.is_full();
        GameState {
            board,
            current_player,
            score_human,
            score_computer,
            game_over,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn score(&self, player: Player) -> usize {
        match player {
            Player::Human => self.score_human,
            Player::Computer => self.score_computer,
        }
    }

    pub fn score_human(&self) -> usize {
        self.score_human
    }

    pub fn score_computer(&self) -> usize {
        self.score_computer
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Winner or tie, once every cell is owned
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.game_over {
            return None;
        }
        Some(match self.score_human.cmp(&self.score_computer) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Player::Human),
            std::cmp::Ordering::Less => GameOutcome::Winner(Player::Computer),
            std::cmp::Ordering::Equal => GameOutcome::Tie,
        })
    }

    /// Claim an edge for the current player and credit completed cells.
    ///
    /// Does not pass the turn.
    pub fn claim_edge(&mut self, edge: EdgeId) -> Result<ClaimResult, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }

        let result = self.board.claim_edge(edge, self.current_player)?;
        match self.current_player {
            Player::Human => self.score_human += result.completed.len(),
            Player::Computer => self.score_computer += result.completed.len(),
        }

        if self.score_human + self.score_computer == self.board.cell_count() {
            self.game_over = true;
            info!(
                human = self.score_human,
                computer = self.score_computer,
                "game over"
            );
        }

        Ok(result)
    }

    /// Hand the move to the other player
    pub fn pass_turn(&mut self) {
        self.current_player = self.current_player.other();
        debug!(player = ?self.current_player, "turn passed");
    }
}
