use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::heuristic::{HeuristicStrategy, ZeroHeuristic};
use crate::{CraftError, CraftGraph, Goal, Inventory, Plan, PlanStep, Result};

/// Trait defining the interface for search algorithms over a crafting graph.
///
/// # Examples
///
/// ```
/// use craftplan::{CraftError, CraftGraph, Goal, Inventory, Plan, PlanStep, Result, SearchAlgorithm};
/// use std::time::Duration;
///
/// /// Takes the first applicable recipe until the goal holds.
/// struct GreedySearch;
///
/// impl SearchAlgorithm for GreedySearch {
///     fn search(&self, graph: &CraftGraph<'_>, initial: &Inventory, goal: &Goal) -> Result<Plan> {
///         let mut state = initial.clone();
///         let mut steps = Vec::new();
///         let mut cost = 0.0;
///         while !goal.is_satisfied_by(&state) {
///             if steps.len() > 100 {
///                 return Err(CraftError::NoPlanFound { expanded: steps.len() });
///             }
///             let next = graph
///                 .successors(&state)
///                 .next()
///                 .ok_or(CraftError::NoPlanFound { expanded: steps.len() })?;
///             cost += next.cost;
///             state = next.state.clone();
///             steps.push(PlanStep { action: next.action.to_string(), state: next.state });
///         }
///         let expanded = steps.len();
///         Ok(Plan { steps, cost, elapsed: Duration::ZERO, expanded })
///     }
/// }
/// ```
pub trait SearchAlgorithm {
    /// Finds a sequence of recipes that turns `initial` into an inventory
    /// satisfying `goal`.
    ///
    /// # Errors
    ///
    /// * `CraftError::NoPlanFound` - every reachable state was explored
    /// * `CraftError::TimeLimitExceeded` - the time budget ran out first
    fn search(&self, graph: &CraftGraph<'_>, initial: &Inventory, goal: &Goal) -> Result<Plan>;
}

/// A search node: one distinct inventory and the best known way to reach it.
#[derive(Debug)]
struct Node<'a> {
    state: Rc<Inventory>,
    /// Arena index of the predecessor, `None` for the initial state
    parent: Option<usize>,
    /// Recipe that led here from `parent`
    action: Option<&'a str>,
    /// Best known cost from the initial state
    g_cost: f64,
}

/// Frontier entry, ordered by `f_cost` and then by the inventory itself.
#[derive(Debug, Clone)]
struct NodeWrapper {
    idx: usize,
    f_cost: f64,
    /// `g_cost` of the node when this entry was pushed
    g_cost: f64,
    state: Rc<Inventory>,
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeWrapper {}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then_with(|| self.state.cmp(&other.state))
    }
}

/// Manages the state of a graph search.
struct SearchContext<'a> {
    /// Every distinct inventory discovered so far
    nodes: Vec<Node<'a>>,
    /// Arena index of each discovered inventory
    index: HashMap<Rc<Inventory>, usize>,
    /// Priority queue of nodes to explore
    open_set: BinaryHeap<Reverse<NodeWrapper>>,
    expanded: usize,
}

impl<'a> SearchContext<'a> {
    fn new(initial_state: &Inventory, heuristic: &dyn HeuristicStrategy) -> Self {
        let state = Rc::new(initial_state.clone());
        let mut index = HashMap::new();
        index.insert(Rc::clone(&state), 0);

        let mut open_set = BinaryHeap::new();
        open_set.push(Reverse(NodeWrapper {
            idx: 0,
            f_cost: heuristic.estimate(&state),
            g_cost: 0.0,
            state: Rc::clone(&state),
        }));

        Self {
            nodes: vec![Node {
                state,
                parent: None,
                action: None,
                g_cost: 0.0,
            }],
            index,
            open_set,
            expanded: 0,
        }
    }

    /// Pops the next node to explore, skipping entries made stale by a
    /// cheaper path found after they were pushed.
    fn next_node(&mut self) -> Option<usize> {
        while let Some(Reverse(entry)) = self.open_set.pop() {
            if entry.g_cost <= self.nodes[entry.idx].g_cost {
                return Some(entry.idx);
            }
        }
        None
    }

    /// Records a transition from `parent_idx` if it improves the best known
    /// cost of its target, and queues the target unless it is pruned.
    ///
    /// A goal state is always queued. An infinite estimate sorts it after
    /// every finite entry.
    fn relax(
        &mut self,
        parent_idx: usize,
        action: &'a str,
        next_state: Inventory,
        edge_cost: f64,
        heuristic: &dyn HeuristicStrategy,
        goal: &Goal,
    ) {
        let new_cost = self.nodes[parent_idx].g_cost + edge_cost;

        let idx = match self.index.get(&next_state) {
            Some(&idx) if new_cost >= self.nodes[idx].g_cost => return,
            Some(&idx) => {
                let node = &mut self.nodes[idx];
                node.parent = Some(parent_idx);
                node.action = Some(action);
                node.g_cost = new_cost;
                idx
            }
            None => {
                let idx = self.nodes.len();
                let state = Rc::new(next_state);
                self.index.insert(Rc::clone(&state), idx);
                self.nodes.push(Node {
                    state,
                    parent: Some(parent_idx),
                    action: Some(action),
                    g_cost: new_cost,
                });
                idx
            }
        };

        let state = Rc::clone(&self.nodes[idx].state);
        let h_cost = heuristic.estimate(&state);
        if h_cost.is_infinite() && !goal.is_satisfied_by(&state) {
            log::trace!("Pruned {}", state);
            return;
        }

        self.open_set.push(Reverse(NodeWrapper {
            idx,
            f_cost: new_cost + h_cost,
            g_cost: new_cost,
            state,
        }));
    }

    /// Walks the predecessor links back from `node_idx` to the initial state.
    fn reconstruct_plan(&self, node_idx: usize, elapsed: Duration) -> Plan {
        let mut steps = Vec::new();
        let mut current = Some(node_idx);

        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if let Some(action) = node.action {
                steps.push(PlanStep {
                    action: action.to_string(),
                    state: (*node.state).clone(),
                });
            }
            current = node.parent;
        }

        steps.reverse();
        Plan {
            steps,
            cost: self.nodes[node_idx].g_cost,
            elapsed,
            expanded: self.expanded,
        }
    }
}

/// Time-bounded A* search.
///
/// The deadline is polled once per expansion, so a single expansion always
/// runs to completion.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use craftplan::{AStarSearch, CraftGraph, Goal, Inventory, Recipe, SearchAlgorithm, ZeroHeuristic};
///
/// let recipes = vec![Recipe::new("get_wood", 1.0).unwrap().produces("wood", 1)];
/// let goal: Goal = [("wood", 2)].into_iter().collect();
///
/// let search = AStarSearch::new(Box::new(ZeroHeuristic), Duration::from_secs(1));
/// let plan = search
///     .search(&CraftGraph::new(&recipes), &Inventory::new(), &goal)
///     .unwrap();
/// assert_eq!(plan.actions().collect::<Vec<_>>(), ["get_wood", "get_wood"]);
/// assert_eq!(plan.cost, 2.0);
/// ```
pub struct AStarSearch {
    heuristic: Box<dyn HeuristicStrategy>,
    time_limit: Duration,
}

impl AStarSearch {
    /// Creates a new A* search with the given heuristic and time budget.
    pub fn new(heuristic: Box<dyn HeuristicStrategy>, time_limit: Duration) -> Self {
        Self {
            heuristic,
            time_limit,
        }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl SearchAlgorithm for AStarSearch {
    fn search(&self, graph: &CraftGraph<'_>, initial: &Inventory, goal: &Goal) -> Result<Plan> {
        let start = Instant::now();

        if goal.is_satisfied_by(initial) {
            return Ok(Plan {
                steps: Vec::new(),
                cost: 0.0,
                elapsed: start.elapsed(),
                expanded: 0,
            });
        }

        log::debug!(
            "Searching from {} over {} recipes (limit {:?})",
            initial,
            graph.recipes().len(),
            self.time_limit
        );

        let heuristic = self.heuristic.as_ref();
        let mut context = SearchContext::new(initial, heuristic);

        while start.elapsed() < self.time_limit {
            let Some(current_idx) = context.next_node() else {
                log::debug!(
                    "Frontier exhausted after {} expansions",
                    context.expanded
                );
                return Err(CraftError::NoPlanFound {
                    expanded: context.expanded,
                });
            };

            let current = Rc::clone(&context.nodes[current_idx].state);
            if goal.is_satisfied_by(&current) {
                let plan = context.reconstruct_plan(current_idx, start.elapsed());
                log::info!(
                    "Found plan of {} steps costing {} after {} expansions in {:?}",
                    plan.len(),
                    plan.cost,
                    plan.expanded,
                    plan.elapsed
                );
                return Ok(plan);
            }

            context.expanded += 1;
            for transition in graph.successors(&current) {
                context.relax(
                    current_idx,
                    transition.action,
                    transition.state,
                    transition.cost,
                    heuristic,
                    goal,
                );
            }
        }

        let elapsed = start.elapsed();
        log::warn!(
            "Time limit of {:?} exceeded after {} expansions",
            self.time_limit,
            context.expanded
        );
        Err(CraftError::TimeLimitExceeded {
            elapsed,
            expanded: context.expanded,
        })
    }
}

/// Uniform-cost search: A* with a zero heuristic.
pub struct DijkstraSearch {
    time_limit: Duration,
}

impl DijkstraSearch {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }
}

impl Default for DijkstraSearch {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl SearchAlgorithm for DijkstraSearch {
    fn search(&self, graph: &CraftGraph<'_>, initial: &Inventory, goal: &Goal) -> Result<Plan> {
        let astar = AStarSearch::new(Box::new(ZeroHeuristic), self.time_limit);
        astar.search(graph, initial, goal)
    }
}
