//! Move-selection policies: the `Agent` trait, the three-tier heuristic
//! opponent, and a uniform random baseline.

mod agent;
pub mod heuristic;
mod random;

pub use agent::{Agent, PolicyKind};
pub use heuristic::{choose_edge, Candidate, HeuristicAgent, Tier, Tiers};
pub use random::RandomAgent;
