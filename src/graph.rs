use crate::{Inventory, Recipe};

/// One outgoing edge of the crafting graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<'a> {
    /// Name of the recipe applied
    pub action: &'a str,
    /// Inventory after applying the recipe
    pub state: Inventory,
    pub cost: f64,
}

/// The implicit state graph spanned by a list of recipes.
///
/// Nodes are inventories; there is an edge for every recipe whose check
/// passes. Edges are produced lazily, in recipe declaration order, so the
/// same inventory always yields the same sequence.
///
/// # Examples
///
/// ```
/// use craftplan::{CraftGraph, Inventory, Recipe};
///
/// let recipes = vec![
///     Recipe::new("punch for wood", 4.0).unwrap().produces("wood", 1),
///     Recipe::new("craft plank", 1.0).unwrap().consumes("wood", 1).produces("plank", 4),
/// ];
/// let graph = CraftGraph::new(&recipes);
///
/// let names: Vec<_> = graph
///     .successors(&Inventory::new())
///     .map(|t| t.action)
///     .collect();
/// assert_eq!(names, ["punch for wood"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CraftGraph<'a> {
    recipes: &'a [Recipe],
}

impl<'a> CraftGraph<'a> {
    pub fn new(recipes: &'a [Recipe]) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &'a [Recipe] {
        self.recipes
    }

    /// Lazily yields every transition available from `state`.
    pub fn successors<'s>(
        &'s self,
        state: &'s Inventory,
    ) -> impl Iterator<Item = Transition<'a>> + 's {
        self.recipes.iter().filter_map(move |recipe| {
            recipe.apply(state).map(|next| Transition {
                action: recipe.name.as_str(),
                state: next,
                cost: recipe.cost(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("make_axe", 2.0).unwrap().produces("axe", 1),
            Recipe::new("chop", 1.0)
                .unwrap()
                .requires("axe", 1)
                .produces("log", 1),
            Recipe::new("burn", 3.0).unwrap().consumes("log", 1),
        ]
    }

    #[test]
    fn test_only_applicable_recipes_are_yielded() {
        let recipes = recipes();
        let graph = CraftGraph::new(&recipes);
        let out: Vec<_> = graph.successors(&Inventory::new()).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].action, "make_axe");
        assert_eq!(out[0].state, Inventory::new().with("axe", 1));
        assert_eq!(out[0].cost, 2.0);
    }

    #[test]
    fn test_declaration_order_and_restartable() {
        let recipes = recipes();
        let graph = CraftGraph::new(&recipes);
        let inv: Inventory = [("axe", 1), ("log", 1)].into_iter().collect();

        let first: Vec<_> = graph.successors(&inv).collect();
        let second: Vec<_> = graph.successors(&inv).collect();
        assert_eq!(first, second);

        let names: Vec<_> = first.iter().map(|t| t.action).collect();
        assert_eq!(names, ["make_axe", "chop", "burn"]);
    }

    #[test]
    fn test_empty_recipe_list_has_no_edges() {
        let graph = CraftGraph::new(&[]);
        assert_eq!(graph.successors(&Inventory::new()).count(), 0);
    }
}
