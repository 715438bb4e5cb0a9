//! # Dots and Boxes
//!
//! Headless core of a dots-and-boxes game: players alternately claim the
//! unit edges of an N×N grid, and whoever draws the fourth side of a cell
//! takes it and moves again. The computer seat is played by a tiered greedy
//! heuristic.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: edge arena, cells, player, game state
//! - [`ai`]: Agent trait, tiered heuristic opponent, random baseline
//! - [`session`]: Tick-driven turn driver, headless match runner, statistics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
