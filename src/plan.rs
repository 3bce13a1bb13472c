use std::fmt;
use std::time::Duration;

use crate::Inventory;

/// One action of a plan together with the inventory it leads to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub action: String,
    pub state: Inventory,
}

/// A sequence of actions from the initial inventory to one meeting the goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Steps in execution order; empty when the start already meets the goal
    pub steps: Vec<PlanStep>,
    /// Sum of the costs of every step (game time)
    pub cost: f64,
    /// Wall-clock time spent searching
    pub elapsed: Duration,
    /// Number of states expanded before the goal was popped
    pub expanded: usize,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the actions in execution order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.action.as_str())
    }

    /// The inventory after the last step, if any.
    pub fn final_state(&self) -> Option<&Inventory> {
        self.steps.last().map(|step| &step.state)
    }
}

/// Renders each step as the resulting inventory followed by the action,
/// then a summary.
///
/// ```
/// use std::time::Duration;
/// use craftplan::{Inventory, Plan, PlanStep};
///
/// let plan = Plan {
///     steps: vec![PlanStep {
///         action: "punch for wood".to_string(),
///         state: Inventory::new().with("wood", 1),
///     }],
///     cost: 4.0,
///     elapsed: Duration::from_millis(2),
///     expanded: 1,
/// };
///
/// let text = plan.to_string();
/// assert!(text.contains("\t{wood: 1}\npunch for wood\n"));
/// assert!(text.contains("game time: 4"));
/// assert!(text.contains("game length: 1"));
/// ```
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "\t{}", step.state)?;
            writeln!(f, "{}", step.action)?;
        }
        writeln!(f, "game time: {}", self.cost)?;
        writeln!(f, "game length: {}", self.len())?;
        write!(f, "compute time: {:?}", self.elapsed)
    }
}
