//! # Recipes
//!
//! A [`Recipe`] is a named transition between inventories. It has three parts:
//!
//! * `requires` - identifiers that must be held (quantity greater than zero)
//!   but are not used up, such as a bench or a pickaxe
//! * `consumes` - quantities that must be held and are subtracted
//! * `produces` - quantities that are added
//!
//! plus a strictly positive `cost` (the game time the recipe takes).
//!
//! ## Basic Usage
//!
//! ```
//! use craftplan::{Inventory, Recipe};
//!
//! let craft_stick = Recipe::new("craft stick", 1.0)
//!     .unwrap()
//!     .consumes("plank", 2)
//!     .produces("stick", 4);
//!
//! let inv = Inventory::new().with("plank", 3);
//! assert!(craft_stick.can_apply(&inv));
//!
//! let next = craft_stick.apply(&inv).unwrap();
//! assert_eq!(next.quantity("plank"), 1);
//! assert_eq!(next.quantity("stick"), 4);
//!
//! // the input inventory is left untouched
//! assert_eq!(inv.quantity("plank"), 3);
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::{CraftError, Inventory, Result};

/// Quantities keyed by resource identifier.
pub type Quantities = BTreeMap<String, u32>;

/// A named crafting or gathering action.
///
/// # Examples
///
/// ```
/// use craftplan::{Inventory, Recipe};
///
/// let chop = Recipe::new("wooden_axe for wood", 2.0)
///     .unwrap()
///     .requires("wooden_axe", 1)
///     .produces("wood", 1);
///
/// // the axe is a gate, not an ingredient
/// let inv = Inventory::new().with("wooden_axe", 1);
/// let next = chop.apply(&inv).unwrap();
/// assert_eq!(next.quantity("wooden_axe"), 1);
/// assert_eq!(next.quantity("wood"), 1);
///
/// assert!(chop.apply(&Inventory::new()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Unique name, used as the edge label of the plan
    pub name: String,
    /// Identifiers that must be held in a positive quantity
    pub requires: Quantities,
    /// Quantities that must be held and are removed
    pub consumes: Quantities,
    /// Quantities that are added
    pub produces: Quantities,
    cost: f64,
}

impl Recipe {
    /// Creates a recipe with no requirements or effects.
    ///
    /// # Errors
    ///
    /// Returns `CraftError::InvalidRecipeCost` if the cost is zero, negative,
    /// NaN or infinite.
    pub fn new(name: impl Into<String>, cost: f64) -> Result<Self> {
        let name = name.into();
        if !cost.is_finite() || cost <= 0.0 {
            return Err(CraftError::InvalidRecipeCost { name, cost });
        }

        Ok(Self {
            name,
            requires: Quantities::new(),
            consumes: Quantities::new(),
            produces: Quantities::new(),
            cost,
        })
    }

    pub fn requires(mut self, id: impl Into<String>, count: u32) -> Self {
        self.requires.insert(id.into(), count);
        self
    }

    pub fn consumes(mut self, id: impl Into<String>, amount: u32) -> Self {
        self.consumes.insert(id.into(), amount);
        self
    }

    pub fn produces(mut self, id: impl Into<String>, amount: u32) -> Self {
        self.produces.insert(id.into(), amount);
        self
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Amount of `id` one application of this recipe adds, 0 if none.
    pub fn produced(&self, id: &str) -> u32 {
        self.produces.get(id).copied().unwrap_or(0)
    }

    /// Checks whether this recipe can be applied to `state`.
    ///
    /// Every consumed identifier must be held in at least the consumed amount
    /// (an absent identifier counts as 0). Every required identifier must be
    /// held in a quantity greater than zero; the declared count of a
    /// requirement is not a threshold.
    pub fn can_apply(&self, state: &Inventory) -> bool {
        self.consumes
            .iter()
            .all(|(id, amount)| state.quantity(id) >= *amount)
            && self.requires.keys().all(|id| state.quantity(id) > 0)
    }

    /// Applies this recipe to `state`, returning the resulting inventory, or
    /// `None` if [`can_apply`](Self::can_apply) fails.
    ///
    /// Consumed amounts are only subtracted from identifiers already present
    /// in `state`; produced identifiers are created when absent. `state`
    /// itself is never modified.
    pub fn apply(&self, state: &Inventory) -> Option<Inventory> {
        if !self.can_apply(state) {
            return None;
        }
        Some(self.apply_checked(state))
    }

    fn apply_checked(&self, state: &Inventory) -> Inventory {
        let mut next = state.clone();

        for (id, amount) in &self.consumes {
            if let Some(qty) = next.get_mut(id) {
                *qty -= amount;
            }
        }

        for (id, amount) in &self.produces {
            match next.entry(id) {
                Entry::Occupied(mut held) => {
                    let qty = held.get_mut();
                    *qty = qty.saturating_add(*amount);
                }
                Entry::Vacant(slot) => {
                    slot.insert(*amount);
                }
            }
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smelt() -> Recipe {
        Recipe::new("smelt ore in furnace", 5.0)
            .unwrap()
            .requires("furnace", 1)
            .consumes("coal", 1)
            .consumes("ore", 1)
            .produces("ingot", 1)
    }

    #[test]
    fn test_create_valid_recipe() {
        let recipe = Recipe::new("punch for wood", 4.0).unwrap();
        assert_eq!(recipe.name, "punch for wood");
        assert_eq!(recipe.cost(), 4.0);
        assert!(recipe.requires.is_empty());
        assert!(recipe.consumes.is_empty());
        assert!(recipe.produces.is_empty());
    }

    #[test]
    fn test_create_invalid_recipe() {
        for cost in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Recipe::new("bad", cost);
            assert!(matches!(result, Err(CraftError::InvalidRecipeCost { .. })));
        }
    }

    #[test]
    fn test_empty_recipe_always_applies() {
        let recipe = Recipe::new("idle", 1.0).unwrap();
        let inv = Inventory::new();
        assert!(recipe.can_apply(&inv));
        assert_eq!(recipe.apply(&inv), Some(inv));
    }

    #[test]
    fn test_check_needs_all_consumed_amounts() {
        let recipe = smelt();
        let inv: Inventory = [("furnace", 1), ("coal", 1), ("ore", 0)].into_iter().collect();
        assert!(!recipe.can_apply(&inv));
        assert!(recipe.can_apply(&inv.with("ore", 1)));
    }

    #[test]
    fn test_requirement_is_presence_only() {
        let recipe = Recipe::new("craft at bench", 1.0)
            .unwrap()
            .requires("bench", 5);
        assert!(recipe.can_apply(&Inventory::new().with("bench", 1)));
        assert!(!recipe.can_apply(&Inventory::new().with("bench", 0)));
        assert!(!recipe.can_apply(&Inventory::new()));
    }

    #[test]
    fn test_zero_consumption_of_absent_item_passes() {
        let recipe = Recipe::new("odd", 1.0).unwrap().consumes("dust", 0);
        let next = recipe.apply(&Inventory::new()).unwrap();
        assert_eq!(next.get("dust"), None);
    }

    #[test]
    fn test_apply_consumes_and_produces() {
        let inv: Inventory = [("furnace", 1), ("coal", 2), ("ore", 1)].into_iter().collect();
        let next = smelt().apply(&inv).unwrap();
        assert_eq!(next.get("coal"), Some(1));
        assert_eq!(next.get("ore"), Some(0));
        assert_eq!(next.get("ingot"), Some(1));
        assert_eq!(next.get("furnace"), Some(1));
    }

    #[test]
    fn test_apply_adds_to_existing() {
        let recipe = Recipe::new("craft plank", 1.0)
            .unwrap()
            .consumes("wood", 1)
            .produces("plank", 4);
        let inv: Inventory = [("wood", 1), ("plank", 2)].into_iter().collect();
        let next = recipe.apply(&inv).unwrap();
        assert_eq!(next.get("plank"), Some(6));
        assert_eq!(next.get("wood"), Some(0));
    }

    #[test]
    fn test_apply_saturates_at_max_quantity() {
        let recipe = Recipe::new("get_wood", 1.0).unwrap().produces("wood", 3);
        let next = recipe.apply(&Inventory::new().with("wood", u32::MAX - 1)).unwrap();
        assert_eq!(next.get("wood"), Some(u32::MAX));
    }

    #[test]
    fn test_apply_refuses_failed_check() {
        let recipe = smelt();
        assert!(recipe.apply(&Inventory::new()).is_none());
    }

    #[test]
    fn test_produced_amount() {
        let recipe = smelt();
        assert_eq!(recipe.produced("ingot"), 1);
        assert_eq!(recipe.produced("coal"), 0);
    }
}
