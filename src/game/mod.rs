//! Core dots and boxes logic: shared-edge board, players, and the game
//! state that credits completed cells.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, CellPos, ClaimResult, Edge, EdgeId, Side, DEFAULT_GRID_SIZE};
pub use player::Player;
pub use state::{GameOutcome, GameState};
