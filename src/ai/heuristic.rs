use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use super::agent::Agent;
use crate::error::PolicyError;
use crate::game::{Board, CellPos, EdgeId, Side};

/// Priority class of a candidate cell. Lower tiers are always preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Three sides claimed: the fourth completes the cell.
    Complete,
    /// At most one side claimed and a side exists that hands nothing over.
    Develop,
    /// Two sides claimed, or no safe side left.
    Sacrifice,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Complete, Tier::Develop, Tier::Sacrifice];

    fn index(self) -> usize {
        match self {
            Tier::Complete => 0,
            Tier::Develop => 1,
            Tier::Sacrifice => 2,
        }
    }
}

/// A cell worth playing in and the sides the policy may pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub cell: CellPos,
    /// Safe sides for [`Tier::Develop`], every unclaimed side otherwise.
    pub sides: Vec<Side>,
}

/// Every incomplete cell sorted into its tier.
#[derive(Debug, Clone, Default)]
pub struct Tiers {
    buckets: [Vec<Candidate>; 3],
}

impl Tiers {
    pub fn classify(board: &Board) -> Self {
        let mut tiers = Tiers::default();

        for cell in board.cells() {
            let CellPos { row, col } = cell.pos();
            let (tier, sides) = match cell.selected_count() {
                4 => continue,
                3 => (Tier::Complete, board.free_sides(row, col).unwrap_or_default()),
                2 => (Tier::Sacrifice, board.free_sides(row, col).unwrap_or_default()),
                _ => {
                    let safe = board.valid_edges_for(row, col).unwrap_or_default();
                    if safe.is_empty() {
                        (Tier::Sacrifice, board.free_sides(row, col).unwrap_or_default())
                    } else {
                        (Tier::Develop, safe)
                    }
                }
            };
            tiers.buckets[tier.index()].push(Candidate {
                cell: cell.pos(),
                sides,
            });
        }

        tiers
    }

    pub fn bucket(&self, tier: Tier) -> &[Candidate] {
        &self.buckets[tier.index()]
    }

    /// The highest-priority non-empty tier
    pub fn best(&self) -> Option<(Tier, &[Candidate])> {
        Tier::ALL
            .into_iter()
            .map(|tier| (tier, self.bucket(tier)))
            .find(|(_, bucket)| !bucket.is_empty())
    }
}

/// Pick an edge with the three-tier greedy heuristic.
///
/// Takes the best non-empty tier, a uniformly random cell from it, then a
/// uniformly random side from that cell's candidate sides. Single ply only.
pub fn choose_edge<R: Rng>(board: &Board, rng: &mut R) -> Result<EdgeId, PolicyError> {
    let tiers = Tiers::classify(board);
    let (tier, bucket) = tiers.best().ok_or(PolicyError::NoMovesAvailable)?;

    let candidate = &bucket[rng.random_range(0..bucket.len())];
    if candidate.sides.is_empty() {
        return Err(PolicyError::NoMovesAvailable);
    }
    let side = candidate.sides[rng.random_range(0..candidate.sides.len())];

    let CellPos { row, col } = candidate.cell;
    let edge = board
        .edge_at(row, col, side)
        .map_err(|_| PolicyError::NoMovesAvailable)?;
    debug!(?tier, cell = %candidate.cell, ?side, %edge, "heuristic picked edge");
    Ok(edge)
}

/// The computer opponent: [`choose_edge`] over an owned random source.
pub struct HeuristicAgent {
    rng: StdRng,
}

impl HeuristicAgent {
    pub fn new() -> Self {
        HeuristicAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        HeuristicAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for HeuristicAgent {
    fn select_edge(&mut self, board: &Board) -> Result<EdgeId, PolicyError> {
        choose_edge(board, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }
}
