//! # Rule Sets
//!
//! A [`RuleSet`] bundles everything one search needs: the known items, the
//! starting inventory, the goal and the recipes in declaration order.
//!
//! Rule sets are usually loaded from JSON:
//!
//! ```json
//! {
//!   "Items": ["bench", "plank", "wood"],
//!   "Initial": {},
//!   "Goal": {"bench": 1},
//!   "Recipes": {
//!     "punch for wood": {"Produces": {"wood": 1}, "Time": 4},
//!     "craft plank": {"Consumes": {"wood": 1}, "Produces": {"plank": 4}, "Time": 1},
//!     "craft bench": {"Consumes": {"plank": 4}, "Produces": {"bench": 1}, "Time": 1}
//!   }
//! }
//! ```
//!
//! `Requires`, `Consumes` and `Produces` may be omitted. `Requires` values may
//! be counts or booleans (`true` is read as 1, `false` entries are dropped).
//! The order of the `Recipes` object is kept and decides which successor is
//! tried first.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{CraftError, Goal, Inventory, Recipe, Result};

/// An immutable description of a crafting problem.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub items: Vec<String>,
    pub initial: Inventory,
    pub goal: Goal,
    pub recipes: Vec<Recipe>,
}

impl RuleSet {
    /// Builds a rule set from already constructed parts.
    ///
    /// # Errors
    ///
    /// Returns `CraftError::DuplicateRecipe` if two recipes share a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use craftplan::{Goal, Inventory, Recipe, RuleSet};
    ///
    /// let recipes = vec![Recipe::new("get_wood", 1.0).unwrap().produces("wood", 1)];
    /// let goal: Goal = [("wood", 3)].into_iter().collect();
    /// let rules = RuleSet::new(vec!["wood".into()], Inventory::new(), goal, recipes).unwrap();
    ///
    /// assert_eq!(rules.initial_state().get("wood"), Some(0));
    /// ```
    pub fn new(
        items: Vec<String>,
        initial: Inventory,
        goal: Goal,
        recipes: Vec<Recipe>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.name.as_str()) {
                return Err(CraftError::DuplicateRecipe(recipe.name.clone()));
            }
        }

        Ok(Self {
            items,
            initial,
            goal,
            recipes,
        })
    }

    /// Parses a rule set from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawRuleSet = serde_json::from_str(json)?;
        raw.into_rule_set()
    }

    /// Reads and parses a JSON rule file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The inventory a search starts from: every known item held at zero,
    /// overlaid with the declared initial quantities.
    pub fn initial_state(&self) -> Inventory {
        let zeroed: Inventory = self.items.iter().map(|id| (id.as_str(), 0)).collect();
        zeroed.merged(&self.initial)
    }

    /// Returns a copy of this rule set with its goal replaced.
    pub fn with_goal(&self, goal: Goal) -> Self {
        Self {
            goal,
            ..self.clone()
        }
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRuleSet {
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    initial: BTreeMap<String, u32>,
    #[serde(default)]
    goal: BTreeMap<String, u32>,
    #[serde(default)]
    recipes: IndexMap<String, RawRecipe>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRecipe {
    #[serde(default)]
    requires: BTreeMap<String, RequirementValue>,
    #[serde(default)]
    consumes: BTreeMap<String, u32>,
    #[serde(default)]
    produces: BTreeMap<String, u32>,
    time: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequirementValue {
    Flag(bool),
    Count(u32),
}

impl RequirementValue {
    fn count(&self) -> Option<u32> {
        match self {
            RequirementValue::Flag(true) => Some(1),
            RequirementValue::Flag(false) => None,
            RequirementValue::Count(n) => Some(*n),
        }
    }
}

impl RawRuleSet {
    fn into_rule_set(self) -> Result<RuleSet> {
        let recipes = self
            .recipes
            .into_iter()
            .map(|(name, raw)| raw.into_recipe(name))
            .collect::<Result<Vec<_>>>()?;

        RuleSet::new(
            self.items,
            self.initial.into_iter().collect(),
            self.goal.into_iter().collect(),
            recipes,
        )
    }
}

impl RawRecipe {
    fn into_recipe(self, name: String) -> Result<Recipe> {
        let mut recipe = Recipe::new(name, self.time)?;
        for (id, value) in &self.requires {
            if let Some(count) = value.count() {
                recipe = recipe.requires(id.as_str(), count);
            }
        }
        recipe.consumes = self.consumes;
        recipe.produces = self.produces;
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRAFTING: &str = r#"{
        "Items": ["bench", "plank", "wood", "wooden_pickaxe", "stick"],
        "Initial": {"wood": 1},
        "Goal": {"wooden_pickaxe": 1},
        "Recipes": {
            "punch for wood": {"Produces": {"wood": 1}, "Time": 4},
            "craft plank": {"Consumes": {"wood": 1}, "Produces": {"plank": 4}, "Time": 1},
            "craft wooden_pickaxe at bench": {
                "Requires": {"bench": true},
                "Consumes": {"plank": 3, "stick": 2},
                "Produces": {"wooden_pickaxe": 1},
                "Time": 1
            },
            "craft bench": {"Consumes": {"plank": 4}, "Produces": {"bench": 1}, "Time": 1}
        }
    }"#;

    #[test]
    fn test_parse_rule_set() {
        let rules = RuleSet::from_json_str(CRAFTING).unwrap();
        assert_eq!(rules.items.len(), 5);
        assert_eq!(rules.initial.get("wood"), Some(1));
        assert_eq!(rules.goal.get("wooden_pickaxe"), Some(1));
        assert_eq!(rules.recipes.len(), 4);
    }

    #[test]
    fn test_recipe_order_follows_file() {
        let rules = RuleSet::from_json_str(CRAFTING).unwrap();
        let names: Vec<_> = rules.recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "punch for wood",
                "craft plank",
                "craft wooden_pickaxe at bench",
                "craft bench"
            ]
        );
    }

    #[test]
    fn test_boolean_requirement() {
        let rules = RuleSet::from_json_str(CRAFTING).unwrap();
        let recipe = rules.recipe("craft wooden_pickaxe at bench").unwrap();
        assert_eq!(recipe.requires.get("bench"), Some(&1));
        assert_eq!(recipe.consumes.get("stick"), Some(&2));
        assert_eq!(recipe.cost(), 1.0);
    }

    #[test]
    fn test_false_requirement_is_dropped() {
        let json = r#"{"Recipes": {"x": {"Requires": {"bench": false, "axe": 2}, "Time": 1}}}"#;
        let rules = RuleSet::from_json_str(json).unwrap();
        let recipe = rules.recipe("x").unwrap();
        assert!(!recipe.requires.contains_key("bench"));
        assert_eq!(recipe.requires.get("axe"), Some(&2));
    }

    #[test]
    fn test_initial_state_zeroes_known_items() {
        let rules = RuleSet::from_json_str(CRAFTING).unwrap();
        let state = rules.initial_state();
        assert_eq!(state.len(), 5);
        assert_eq!(state.get("wood"), Some(1));
        assert_eq!(state.get("bench"), Some(0));
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let json = r#"{"Recipes": {"x": {"Produces": {"a": 1}, "Time": 0}}}"#;
        assert!(matches!(
            RuleSet::from_json_str(json),
            Err(CraftError::InvalidRecipeCost { .. })
        ));
    }

    #[test]
    fn test_missing_time_is_a_parse_error() {
        let json = r#"{"Recipes": {"x": {"Produces": {"a": 1}}}}"#;
        assert!(matches!(
            RuleSet::from_json_str(json),
            Err(CraftError::Serialization(_))
        ));
    }

    #[test]
    fn test_duplicate_recipe_names() {
        let recipes = vec![
            Recipe::new("a", 1.0).unwrap(),
            Recipe::new("a", 2.0).unwrap(),
        ];
        let result = RuleSet::new(vec![], Inventory::new(), Goal::new(), recipes);
        assert!(matches!(result, Err(CraftError::DuplicateRecipe(name)) if name == "a"));
    }

    #[test]
    fn test_with_goal_replaces_goal_only() {
        let rules = RuleSet::from_json_str(CRAFTING).unwrap();
        let goal: Goal = [("plank", 8)].into_iter().collect();
        let retargeted = rules.with_goal(goal.clone());
        assert_eq!(retargeted.goal, goal);
        assert_eq!(retargeted.recipes, rules.recipes);
    }
}
