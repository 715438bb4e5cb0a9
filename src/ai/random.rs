use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;
use crate::error::PolicyError;
use crate::game::{Board, EdgeId};

/// An agent that selects uniformly at random from unclaimed edges.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_edge(&mut self, board: &Board) -> Result<EdgeId, PolicyError> {
        let edges = board.unclaimed_edges();
        if edges.is_empty() {
            return Err(PolicyError::NoMovesAvailable);
        }
        let idx = self.rng.random_range(0..edges.len());
        Ok(edges[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_random_agent_selects_unclaimed_edge() {
        let mut agent = RandomAgent::with_seed(7);
        let mut board = Board::new(3);
        for id in board.unclaimed_edges().into_iter().step_by(2) {
            board.claim_edge(id, Player::Human).unwrap();
        }

        for _ in 0..100 {
            let id = agent.select_edge(&board).unwrap();
            assert!(!board.edge(id).unwrap().is_claimed(), "edge {id} is claimed");
        }
    }

    #[test]
    fn test_random_agent_fills_board() {
        let mut agent = RandomAgent::new();
        let mut board = Board::new(3);
        while !board.is_full() {
            let id = agent.select_edge(&board).unwrap();
            board.claim_edge(id, Player::Computer).unwrap();
        }
        assert_eq!(board.claimed_edge_count(), board.edge_count());
    }

    #[test]
    fn test_random_agent_full_board() {
        let mut agent = RandomAgent::with_seed(1);
        let mut board = Board::new(2);
        for id in board.unclaimed_edges() {
            board.claim_edge(id, Player::Human).unwrap();
        }
        assert_eq!(agent.select_edge(&board), Err(PolicyError::NoMovesAvailable));
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
