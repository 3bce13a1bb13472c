//! # Heuristics
//!
//! Estimates of the remaining cost from an inventory to the goal, used to
//! order the search frontier.
//!
//! [`RelaxedCostHeuristic`] works backwards from the goal. Every missing
//! identifier is assumed to come from its single fastest producing recipe,
//! whose own requirements are taken to be free. The ingredients that recipe
//! consumes become new demand, resolved on the next pass. The estimate is
//! optimistic for long dependency chains but not a guaranteed lower bound.
//!
//! The estimate is infinite only for states holding two of a one-of-a-kind
//! item, or missing a goal identifier that no recipe produces. Demand for an
//! ingredient nothing produces is dropped.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{Goal, Inventory, Recipe, RuleSet, SearchConfig};

/// A trait for heuristic functions used in search algorithms.
pub trait HeuristicStrategy: Send + Sync {
    /// Estimates the remaining cost from `state` to the goal.
    ///
    /// Returns a non-negative number, or `f64::INFINITY` for states that
    /// should never be explored.
    fn estimate(&self, state: &Inventory) -> f64;
}

/// Zero heuristic for uniform-cost (Dijkstra) search.
pub struct ZeroHeuristic;

impl HeuristicStrategy for ZeroHeuristic {
    fn estimate(&self, _state: &Inventory) -> f64 {
        0.0
    }
}

/// Relaxed reverse simulation over the fastest producer of each identifier,
/// with hard pruning of duplicated one-of-a-kind items.
///
/// # Examples
///
/// ```
/// use craftplan::{Goal, HeuristicStrategy, Inventory, Recipe, RelaxedCostHeuristic, RuleSet, SearchConfig};
///
/// let recipes = vec![
///     Recipe::new("punch for wood", 4.0).unwrap().produces("wood", 1),
///     Recipe::new("craft plank", 1.0).unwrap().consumes("wood", 1).produces("plank", 4),
/// ];
/// let goal: Goal = [("plank", 4)].into_iter().collect();
/// let rules = RuleSet::new(vec![], Inventory::new(), goal, recipes).unwrap();
/// let heuristic = RelaxedCostHeuristic::new(&rules, &SearchConfig::default());
///
/// // one plank craft plus one punch for the wood it needs
/// assert_eq!(heuristic.estimate(&Inventory::new()), 5.0);
/// assert_eq!(heuristic.estimate(&Inventory::new().with("wood", 1)), 1.0);
/// assert_eq!(heuristic.estimate(&Inventory::new().with("plank", 4)), 0.0);
/// ```
pub struct RelaxedCostHeuristic {
    goal: Goal,
    recipes: Vec<Recipe>,
    /// Index into `recipes` of the cheapest producer of each identifier
    fastest: HashMap<String, usize>,
    singleton_items: BTreeSet<String>,
    max_passes: usize,
}

impl RelaxedCostHeuristic {
    pub fn new(rules: &RuleSet, config: &SearchConfig) -> Self {
        let mut fastest: HashMap<String, usize> = HashMap::new();
        for (idx, recipe) in rules.recipes.iter().enumerate() {
            for (id, amount) in &recipe.produces {
                if *amount == 0 {
                    continue;
                }
                // strict comparison keeps the first declared recipe on ties
                let faster = fastest
                    .get(id)
                    .map_or(true, |&best| recipe.cost() < rules.recipes[best].cost());
                if faster {
                    fastest.insert(id.clone(), idx);
                }
            }
        }

        let max_passes = config
            .max_relaxation_passes
            .unwrap_or(fastest.len() + 1);

        Self {
            goal: rules.goal.clone(),
            recipes: rules.recipes.clone(),
            fastest,
            singleton_items: config.singleton_items.clone(),
            max_passes,
        }
    }

    fn holds_duplicate_singleton(&self, state: &Inventory) -> bool {
        self.singleton_items
            .iter()
            .any(|id| state.quantity(id) >= 2)
    }

    fn relaxed_cost(&self, state: &Inventory) -> f64 {
        // positive residual = still missing, non-positive = covered
        let mut residual: BTreeMap<&str, i64> = state
            .iter()
            .map(|(id, qty)| (id, -i64::from(qty)))
            .collect();
        for (id, min) in self.goal.iter() {
            let entry = residual.entry(id).or_insert(0);
            *entry = entry.saturating_add(i64::from(min));
        }

        let mut total = 0.0;
        for _ in 0..self.max_passes {
            let missing: Vec<&str> = residual
                .iter()
                .filter(|(_, need)| **need > 0)
                .map(|(id, _)| *id)
                .collect();
            if missing.is_empty() {
                return total;
            }

            for id in missing {
                let need = residual.get(id).copied().unwrap_or(0);
                if need <= 0 {
                    // covered by a by-product earlier in this pass
                    continue;
                }
                let Some(&idx) = self.fastest.get(id) else {
                    // nothing can raise a goal quantity that no recipe produces
                    if self.goal.get(id).is_some_and(|min| state.quantity(id) < min) {
                        return f64::INFINITY;
                    }
                    // unobtainable ingredient, drop the demand
                    residual.insert(id, 0);
                    continue;
                };
                let recipe = &self.recipes[idx];
                let amount = i64::from(recipe.produced(id));
                let applications = need.saturating_add(amount - 1) / amount;
                total += applications as f64 * recipe.cost();

                for (produced, amount) in &recipe.produces {
                    let entry = residual.entry(produced.as_str()).or_insert(0);
                    *entry = entry.saturating_sub(applications.saturating_mul(i64::from(*amount)));
                }
                for (consumed, amount) in &recipe.consumes {
                    let entry = residual.entry(consumed.as_str()).or_insert(0);
                    *entry = entry.saturating_add(applications.saturating_mul(i64::from(*amount)));
                }
            }
        }

        log::trace!(
            "Relaxation stopped after {} passes with estimate {}",
            self.max_passes,
            total
        );
        total
    }
}

impl HeuristicStrategy for RelaxedCostHeuristic {
    fn estimate(&self, state: &Inventory) -> f64 {
        if self.holds_duplicate_singleton(state) {
            return f64::INFINITY;
        }
        if self.goal.is_satisfied_by(state) {
            return 0.0;
        }
        self.relaxed_cost(state)
    }
}
