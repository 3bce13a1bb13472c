use std::time::Duration;

use thiserror::Error;

/// Errors produced while building rule sets and searching for plans.
///
/// Failing to find a plan is reported through [`CraftError::NoPlanFound`] and
/// [`CraftError::TimeLimitExceeded`]; neither carries a partial plan.
///
/// # Examples
///
/// ```
/// use craftplan::{CraftError, Recipe};
///
/// let err = Recipe::new("free_lunch", 0.0).unwrap_err();
/// assert!(matches!(err, CraftError::InvalidRecipeCost { .. }));
/// assert_eq!(
///     format!("{}", err),
///     "Recipe cost must be positive and finite: free_lunch (0)"
/// );
/// ```
#[derive(Error, Debug)]
pub enum CraftError {
    /// A recipe was declared with a zero, negative or non-finite cost
    #[error("Recipe cost must be positive and finite: {name} ({cost})")]
    InvalidRecipeCost { name: String, cost: f64 },

    /// Two recipes share a name
    #[error("Recipe already in rule set: {0}")]
    DuplicateRecipe(String),

    /// A goal expression could not be parsed
    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    /// A search setting is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The frontier emptied before any goal state was reached
    #[error("No valid plan found to achieve the goal ({expanded} states expanded)")]
    NoPlanFound { expanded: usize },

    /// The search deadline passed before any goal state was reached
    #[error("Time limit exceeded after {elapsed:?} ({expanded} states expanded)")]
    TimeLimitExceeded { elapsed: Duration, expanded: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CraftError {
    /// Returns `true` for the two "no plan" outcomes of a search.
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            CraftError::NoPlanFound { .. } | CraftError::TimeLimitExceeded { .. }
        )
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, CraftError>;
