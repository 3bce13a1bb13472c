mod config;
mod error;
mod goal;
mod graph;
mod heuristic;
mod plan;
mod planner;
mod recipe;
mod rules;
mod search;
mod state;
mod visualizer;

pub use config::{SearchConfig, DEFAULT_SINGLETON_ITEMS};
pub use error::{CraftError, Result};
pub use goal::Goal;
pub use graph::{CraftGraph, Transition};
pub use heuristic::{HeuristicStrategy, RelaxedCostHeuristic, ZeroHeuristic};
pub use plan::{Plan, PlanStep};
pub use planner::Planner;
pub use recipe::{Quantities, Recipe};
pub use rules::RuleSet;
pub use search::{AStarSearch, DijkstraSearch, SearchAlgorithm};
pub use state::Inventory;
pub use visualizer::PlanVisualizer;
