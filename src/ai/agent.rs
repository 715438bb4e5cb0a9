use serde::{Deserialize, Serialize};

use super::{HeuristicAgent, RandomAgent};
use crate::error::PolicyError;
use crate::game::{Board, EdgeId};

/// Universal interface for move-selection policies.
///
/// Implementations read the board and return one unclaimed edge. They never
/// mutate the board; the caller applies the claim.
pub trait Agent {
    /// Select an edge to claim on the given board.
    fn select_edge(&mut self, board: &Board) -> Result<EdgeId, PolicyError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Policies selectable from configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Heuristic,
    Random,
}

impl PolicyKind {
    /// Build the policy, seeded when `seed` is given.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Agent> {
        match (self, seed) {
            (PolicyKind::Heuristic, Some(seed)) => Box::new(HeuristicAgent::with_seed(seed)),
            (PolicyKind::Heuristic, None) => Box::new(HeuristicAgent::new()),
            (PolicyKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
            (PolicyKind::Random, None) => Box::new(RandomAgent::new()),
        }
    }
}
