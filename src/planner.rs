//! # Planner
//!
//! The planner ties a [`RuleSet`] to a search algorithm. By default it runs
//! [`AStarSearch`] guided by a [`RelaxedCostHeuristic`] built from the same
//! rules, with the time budget and singleton items taken from a
//! [`SearchConfig`].
//!
//! ## Basic Usage
//!
//! ```
//! use craftplan::{Goal, Inventory, Planner, Recipe, RuleSet};
//!
//! let recipes = vec![
//!     Recipe::new("make_axe", 2.0).unwrap().produces("axe", 1),
//!     Recipe::new("chop", 1.0).unwrap().requires("axe", 1).produces("log", 1),
//! ];
//! let goal: Goal = [("log", 2)].into_iter().collect();
//! let rules = RuleSet::new(vec![], Inventory::new(), goal, recipes).unwrap();
//!
//! let plan = Planner::new(rules).plan().unwrap();
//! assert_eq!(plan.actions().collect::<Vec<_>>(), ["make_axe", "chop", "chop"]);
//! assert_eq!(plan.cost, 4.0);
//! ```

use crate::heuristic::RelaxedCostHeuristic;
use crate::search::{AStarSearch, SearchAlgorithm};
use crate::{CraftGraph, Plan, Result, RuleSet, SearchConfig};

/// Finds plans for one rule set.
pub struct Planner {
    rules: RuleSet,
    search_algorithm: Box<dyn SearchAlgorithm>,
}

impl Planner {
    /// Creates a planner using A* with the default configuration.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_config(rules, SearchConfig::default())
    }

    /// Creates a planner using A* tuned by `config`.
    pub fn with_config(rules: RuleSet, config: SearchConfig) -> Self {
        let heuristic = RelaxedCostHeuristic::new(&rules, &config);
        let search_algorithm = Box::new(AStarSearch::new(Box::new(heuristic), config.time_limit));
        Self {
            rules,
            search_algorithm,
        }
    }

    /// Creates a planner with a custom search algorithm.
    ///
    /// ```
    /// use craftplan::{DijkstraSearch, Goal, Inventory, Planner, Recipe, RuleSet};
    ///
    /// let recipes = vec![Recipe::new("get_wood", 1.0).unwrap().produces("wood", 1)];
    /// let goal: Goal = [("wood", 1)].into_iter().collect();
    /// let rules = RuleSet::new(vec![], Inventory::new(), goal, recipes).unwrap();
    ///
    /// let planner = Planner::with_search_algorithm(rules, Box::new(DijkstraSearch::default()));
    /// assert_eq!(planner.plan().unwrap().len(), 1);
    /// ```
    pub fn with_search_algorithm(rules: RuleSet, search_algorithm: Box<dyn SearchAlgorithm>) -> Self {
        Self {
            rules,
            search_algorithm,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Searches from the rule set's initial state to its goal.
    ///
    /// # Errors
    ///
    /// Returns `CraftError::NoPlanFound` when the goal is unreachable and
    /// `CraftError::TimeLimitExceeded` when the time budget runs out.
    pub fn plan(&self) -> Result<Plan> {
        let graph = CraftGraph::new(&self.rules.recipes);
        self.search_algorithm
            .search(&graph, &self.rules.initial_state(), &self.rules.goal)
    }
}
