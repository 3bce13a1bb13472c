use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CraftError, Inventory};

/// Minimum quantities an inventory has to hold for the plan to be complete.
///
/// Identifiers absent from the goal are unconstrained. An identifier named by
/// the goal must be *present* in the inventory: a goal of `wood >= 0` is not
/// met by an inventory that has no `wood` entry at all.
///
/// # Examples
///
/// ```
/// use craftplan::{Goal, Inventory};
///
/// let goal: Goal = [("plank", 4)].into_iter().collect();
///
/// assert!(goal.is_satisfied_by(&Inventory::new().with("plank", 5)));
/// assert!(!goal.is_satisfied_by(&Inventory::new().with("plank", 3)));
/// assert!(!goal.is_satisfied_by(&Inventory::new()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal {
    minimums: BTreeMap<String, u32>,
}

impl Goal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_satisfied_by(&self, state: &Inventory) -> bool {
        self.minimums
            .iter()
            .all(|(id, min)| state.get(id).is_some_and(|held| held >= *min))
    }

    pub fn get(&self, id: &str) -> Option<u32> {
        self.minimums.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.minimums.iter().map(|(id, min)| (id.as_str(), *min))
    }

    pub fn is_empty(&self) -> bool {
        self.minimums.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for Goal {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self {
            minimums: iter.into_iter().map(|(id, min)| (id.into(), min)).collect(),
        }
    }
}

/// Parses `item=count` pairs separated by commas, as accepted on the command line.
///
/// ```
/// use craftplan::Goal;
///
/// let goal: Goal = "ingot=2, stone_pickaxe=1".parse().unwrap();
/// assert_eq!(goal.get("ingot"), Some(2));
/// assert_eq!(goal.get("stone_pickaxe"), Some(1));
/// ```
impl FromStr for Goal {
    type Err = CraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| -> Result<(String, u32), CraftError> {
                let (id, count) = part
                    .split_once('=')
                    .ok_or_else(|| CraftError::InvalidGoal(part.to_string()))?;
                let count = count
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| CraftError::InvalidGoal(part.to_string()))?;
                Ok((id.trim().to_string(), count))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_goal_is_always_met() {
        assert!(Goal::new().is_satisfied_by(&Inventory::new()));
    }

    #[test]
    fn test_absent_identifier_fails_even_at_zero() {
        let goal: Goal = [("wood", 0)].into_iter().collect();
        assert!(!goal.is_satisfied_by(&Inventory::new()));
        assert!(goal.is_satisfied_by(&Inventory::new().with("wood", 0)));
    }

    #[test]
    fn test_every_minimum_must_hold() {
        let goal: Goal = [("wood", 1), ("stone", 2)].into_iter().collect();
        let inv: Inventory = [("wood", 4), ("stone", 1)].into_iter().collect();
        assert!(!goal.is_satisfied_by(&inv));
        assert!(goal.is_satisfied_by(&inv.with("stone", 2)));
    }

    #[test]
    fn test_parse_rejects_malformed_pairs() {
        assert!(matches!("wood".parse::<Goal>(), Err(CraftError::InvalidGoal(_))));
        assert!(matches!("wood=-1".parse::<Goal>(), Err(CraftError::InvalidGoal(_))));
        assert!("".parse::<Goal>().unwrap().is_empty());
    }
}
