//! Tick-driven turn state machine between a human and the computer.
//!
//! The view layer forwards resolved edges through [`Driver::human_claim`] and
//! calls [`Driver::tick`] at the configured tick rate. The computer picks its
//! edge on the first tick of its turn, exposes it as a preview, and claims it
//! once the delay has counted down.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::ai::Agent;
use crate::config::{AppConfig, FirstPlayer};
use crate::error::SessionError;
use crate::game::{ClaimResult, EdgeId, GameState, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    HumanTurn,
    ComputerTurn,
    GameOver,
}

impl Phase {
    fn turn_of(player: Player) -> Phase {
        match player {
            Player::Human => Phase::HumanTurn,
            Player::Computer => Phase::ComputerTurn,
        }
    }
}

/// What a single input or tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// Nothing to do this tick.
    Idle,
    /// Input arrived in the wrong phase or named no claimable edge.
    Ignored,
    /// The computer has chosen an edge and is counting down.
    Thinking { edge: EdgeId, ticks_left: u32 },
    /// One action's claims landed; `phase` is the phase after the turn rule.
    Claimed {
        claims: Vec<ClaimResult>,
        phase: Phase,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingMove {
    edge: EdgeId,
    ticks_left: u32,
}

/// Game-level settings the driver reapplies on every new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSettings {
    pub grid_size: usize,
    pub first_player: FirstPlayer,
    pub opponent_delay_ticks: u32,
    pub end_delay_ticks: u32,
}

impl From<&AppConfig> for DriverSettings {
    fn from(config: &AppConfig) -> Self {
        DriverSettings {
            grid_size: config.game.grid_size,
            first_player: config.game.first_player,
            opponent_delay_ticks: config.timing.opponent_delay_ticks(),
            end_delay_ticks: config.timing.end_delay_ticks(),
        }
    }
}

pub struct Driver {
    settings: DriverSettings,
    state: GameState,
    phase: Phase,
    opponent: Box<dyn Agent>,
    rng: StdRng,
    pending: Option<PendingMove>,
    end_ticks_left: u32,
}

impl Driver {
    /// Start a first game. `seed` fixes who starts when the first player
    /// is random.
    pub fn new(settings: DriverSettings, opponent: Box<dyn Agent>, seed: Option<u64>) -> Self {
        let placeholder = GameState::new(settings.grid_size, Player::Human);
        let mut driver = Self::assemble(settings, placeholder, opponent, seed);
        driver.new_game();
        driver
    }

    /// Continue from an existing position with `state`'s current player
    /// to move.
    pub fn from_state(
        settings: DriverSettings,
        state: GameState,
        opponent: Box<dyn Agent>,
        seed: Option<u64>,
    ) -> Self {
        Self::assemble(settings, state, opponent, seed)
    }

    fn assemble(
        settings: DriverSettings,
        state: GameState,
        opponent: Box<dyn Agent>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Driver {
            settings,
            phase: Self::phase_of(&state),
            state,
            opponent,
            rng,
            pending: None,
            end_ticks_left: 0,
        }
    }

    fn phase_of(state: &GameState) -> Phase {
        if state.is_game_over() {
            Phase::GameOver
        } else {
            Phase::turn_of(state.current_player())
        }
    }

    /// Replace the whole game, dropping any pending computer move.
    pub fn new_game(&mut self) {
        let first = self.settings.first_player.resolve(&mut self.rng);
        self.state = GameState::new(self.settings.grid_size, first);
        self.phase = Self::phase_of(&self.state);
        self.pending = None;
        self.end_ticks_left = 0;
        info!(
            grid_size = self.settings.grid_size,
            first = first.name(),
            opponent = self.opponent.name(),
            "new game"
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Edge the computer is about to claim, for highlighting
    pub fn pending_edge(&self) -> Option<EdgeId> {
        self.pending.map(|p| p.edge)
    }

    /// Ticks left on the end-of-game result display
    pub fn end_ticks_left(&self) -> u32 {
        self.end_ticks_left
    }

    /// Claim one edge for the human. Ignored outside the human's turn or
    /// when the edge cannot be claimed.
    pub fn human_claim(&mut self, edge: EdgeId) -> Result<TurnEvent, SessionError> {
        self.human_claim_all(&[edge])
    }

    /// Claim several edges as one human action. Duplicates collapse and the
    /// turn rule runs once after the whole batch.
    pub fn human_claim_all(&mut self, edges: &[EdgeId]) -> Result<TurnEvent, SessionError> {
        if self.phase != Phase::HumanTurn {
            debug!(phase = ?self.phase, "input outside human turn ignored");
            return Ok(TurnEvent::Ignored);
        }

        let mut batch: Vec<EdgeId> = Vec::with_capacity(edges.len());
        for &edge in edges {
            let claimable = self
                .state
                .board()
                .edge(edge)
                .is_ok_and(|e| !e.is_claimed());
            if claimable && !batch.contains(&edge) {
                batch.push(edge);
            }
        }
        if batch.is_empty() {
            debug!(?edges, "no claimable edge in input");
            return Ok(TurnEvent::Ignored);
        }

        self.apply(&batch)
    }

    /// Advance one tick of the driver clock.
    pub fn tick(&mut self) -> Result<TurnEvent, SessionError> {
        match self.phase {
            Phase::HumanTurn => Ok(TurnEvent::Idle),
            Phase::GameOver => {
                self.end_ticks_left = self.end_ticks_left.saturating_sub(1);
                Ok(TurnEvent::Idle)
            }
            Phase::ComputerTurn => {
                let pending = match self.pending.take() {
                    Some(mut pending) => {
                        pending.ticks_left = pending.ticks_left.saturating_sub(1);
                        pending
                    }
                    None => {
                        let edge = self.opponent.select_edge(self.state.board())?;
                        debug!(%edge, delay = self.settings.opponent_delay_ticks, "computer chose edge");
                        PendingMove {
                            edge,
                            ticks_left: self.settings.opponent_delay_ticks,
                        }
                    }
                };

                if pending.ticks_left > 0 {
                    self.pending = Some(pending);
                    return Ok(TurnEvent::Thinking {
                        edge: pending.edge,
                        ticks_left: pending.ticks_left,
                    });
                }

                self.apply(&[pending.edge])
            }
        }
    }

    /// Apply claims for the current player, then run the turn rule.
    fn apply(&mut self, edges: &[EdgeId]) -> Result<TurnEvent, SessionError> {
        let mut claims = Vec::with_capacity(edges.len());
        for &edge in edges {
            claims.push(self.state.claim_edge(edge)?);
        }

        if self.state.is_game_over() {
            self.phase = Phase::GameOver;
            self.end_ticks_left = self.settings.end_delay_ticks;
            info!(outcome = ?self.state.outcome(), "game finished");
        } else if !claims.iter().any(ClaimResult::completed_any) {
            self.state.pass_turn();
            self.phase = Phase::turn_of(self.state.current_player());
        }

        Ok(TurnEvent::Claimed {
            claims,
            phase: self.phase,
        })
    }
}
