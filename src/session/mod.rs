//! Playing games: the tick-driven human/computer driver, the headless match
//! runner, and tallies over many games.

pub mod driver;
pub mod runner;
pub mod stats;

pub use driver::{Driver, DriverSettings, Phase, TurnEvent};
pub use runner::{game_seed, play_game, run_matches, GameRecord};
pub use stats::MatchStats;
