use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use super::stats::MatchStats;
use crate::ai::{Agent, HeuristicAgent, PolicyKind};
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::game::{ClaimResult, GameOutcome, GameState, Player};

/// Result of one headless game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub first_player: Player,
    pub outcome: GameOutcome,
    pub score_human: usize,
    pub score_computer: usize,
    pub moves: Vec<ClaimResult>,
}

/// Play a full game with one agent per seat and no delays.
///
/// Completing a cell keeps the move; anything else passes it.
pub fn play_game(
    human: &mut dyn Agent,
    computer: &mut dyn Agent,
    grid_size: usize,
    first: Player,
) -> Result<GameRecord, SessionError> {
    let mut state = GameState::new(grid_size, first);
    let mut moves = Vec::with_capacity(state.board().edge_count());

    while !state.is_game_over() {
        let edge = match state.current_player() {
            Player::Human => human.select_edge(state.board())?,
            Player::Computer => computer.select_edge(state.board())?,
        };
        let result = state.claim_edge(edge)?;
        if !result.completed_any() && !state.is_game_over() {
            state.pass_turn();
        }
        moves.push(result);
    }

    let outcome = state.outcome().ok_or(SessionError::MissingOutcome)?;
    debug!(?outcome, moves = moves.len(), "game played");

    Ok(GameRecord {
        first_player: first,
        outcome,
        score_human: state.score_human(),
        score_computer: state.score_computer(),
        moves,
    })
}

/// Play `config.simulation.games` games: the heuristic opponent in the
/// computer seat against `human_policy`.
pub fn run_matches(config: &AppConfig, human_policy: PolicyKind) -> Result<MatchStats, SessionError> {
    let base = config.simulation.seed;
    let mut human = human_policy.build(base.map(|s| game_seed(s, 0)));
    let mut computer: Box<dyn Agent> = match base {
        Some(s) => Box::new(HeuristicAgent::with_seed(game_seed(s, 1))),
        None => Box::new(HeuristicAgent::new()),
    };
    let mut rng = match base {
        Some(s) => StdRng::seed_from_u64(game_seed(s, 2)),
        None => StdRng::from_os_rng(),
    };

    info!(
        games = config.simulation.games,
        grid_size = config.game.grid_size,
        human = human.name(),
        computer = computer.name(),
        "starting simulation"
    );

    let mut stats = MatchStats::new();
    for _ in 0..config.simulation.games {
        let first = config.game.first_player.resolve(&mut rng);
        let record = play_game(
            human.as_mut(),
            computer.as_mut(),
            config.game.grid_size,
            first,
        )?;
        stats.record(&record);
    }

    info!(
        human_wins = stats.wins(Player::Human),
        computer_wins = stats.wins(Player::Computer),
        ties = stats.ties(),
        "simulation complete"
    );
    Ok(stats)
}

/// Derive a deterministic seed for a given stream index.
pub fn game_seed(base_seed: u64, index: usize) -> u64 {
    // FNV-1a style mixing
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}
