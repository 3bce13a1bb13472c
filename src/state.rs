//! # Inventory State
//!
//! This module provides [`Inventory`], the value type every search node is
//! built from. An inventory maps resource identifiers (items, tools,
//! structures) to non-negative quantities.
//!
//! ## Identity
//!
//! Two inventories are equal, hash identically and compare identically
//! whenever they hold the same `(identifier, quantity)` pairs, no matter in
//! which order those pairs were inserted. The ordering is lexicographic over
//! the pairs sorted by identifier, which keeps priority-queue tie-breaking
//! deterministic.
//!
//! An identifier explicitly held at zero is *not* the same as an absent
//! identifier: goal checks require the identifier to be present.
//!
//! ## Basic Usage
//!
//! ```
//! use craftplan::Inventory;
//!
//! let a: Inventory = [("wood", 2), ("plank", 4)].into_iter().collect();
//! let b = Inventory::new().with("plank", 4).with("wood", 2);
//!
//! assert_eq!(a, b);
//! assert_eq!(a.quantity("wood"), 2);
//! assert_eq!(a.quantity("stick"), 0);
//! assert_eq!(a.get("stick"), None);
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable-by-contract mapping from resource identifier to quantity.
///
/// Transitions never mutate an inventory that may already be a search key;
/// they build a fresh value (see [`Recipe::apply`](crate::Recipe::apply)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    quantities: BTreeMap<String, u32>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self {
            quantities: BTreeMap::new(),
        }
    }

    /// Returns a copy of this inventory with `id` set to `quantity`.
    ///
    /// ```
    /// use craftplan::Inventory;
    ///
    /// let base = Inventory::new().with("wood", 1);
    /// let more = base.with("wood", 3);
    /// assert_eq!(base.quantity("wood"), 1);
    /// assert_eq!(more.quantity("wood"), 3);
    /// ```
    pub fn with(&self, id: impl Into<String>, quantity: u32) -> Self {
        let mut next = self.clone();
        next.quantities.insert(id.into(), quantity);
        next
    }

    /// Gets the quantity held for `id`, or `None` if the identifier is absent.
    pub fn get(&self, id: &str) -> Option<u32> {
        self.quantities.get(id).copied()
    }

    /// Gets the quantity held for `id`, counting an absent identifier as 0.
    pub fn quantity(&self, id: &str) -> u32 {
        self.get(id).unwrap_or(0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.quantities.contains_key(id)
    }

    /// Iterates over `(identifier, quantity)` pairs sorted by identifier.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.quantities.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Overlays every pair of `other` onto a copy of this inventory.
    pub fn merged(&self, other: &Inventory) -> Self {
        let mut next = self.clone();
        for (id, qty) in other.iter() {
            next.quantities.insert(id.to_string(), qty);
        }
        next
    }

    /// Mutable access for crate-internal builders working on a fresh copy.
    pub(crate) fn entry(&mut self, id: &str) -> btree_map::Entry<'_, String, u32> {
        self.quantities.entry(id.to_string())
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut u32> {
        self.quantities.get_mut(id)
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self {
            quantities: iter.into_iter().map(|(id, qty)| (id.into(), qty)).collect(),
        }
    }
}

/// Shows only the identifiers held in a positive quantity.
///
/// ```
/// use craftplan::Inventory;
///
/// let inv: Inventory = [("wood", 0), ("plank", 4), ("stick", 2)].into_iter().collect();
/// assert_eq!(inv.to_string(), "{plank: 4, stick: 2}");
/// ```
impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (id, qty) in self.iter().filter(|(_, qty)| *qty > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", id, qty)?;
            first = false;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(inv: &Inventory) -> u64 {
        let mut hasher = DefaultHasher::new();
        inv.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_inventory_is_empty() {
        let inv = Inventory::new();
        assert!(inv.is_empty());
        assert_eq!(inv.len(), 0);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a: Inventory = [("wood", 1), ("stone", 2), ("bench", 1)].into_iter().collect();
        let b: Inventory = [("bench", 1), ("wood", 1), ("stone", 2)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_zero_entry_differs_from_absent() {
        let with_zero = Inventory::new().with("wood", 0);
        let empty = Inventory::new();
        assert_ne!(with_zero, empty);
        assert_eq!(with_zero.get("wood"), Some(0));
        assert_eq!(empty.get("wood"), None);
        assert_eq!(with_zero.quantity("wood"), empty.quantity("wood"));
        assert!(with_zero.contains("wood"));
        assert!(!empty.contains("wood"));
    }

    #[test]
    fn test_ordering_is_lexicographic_over_sorted_pairs() {
        let a: Inventory = [("a", 1), ("b", 5)].into_iter().collect();
        let b: Inventory = [("a", 2)].into_iter().collect();
        let c: Inventory = [("a", 1), ("c", 0)].into_iter().collect();
        assert!(a < b);
        assert!(a < c);
    }

    #[test]
    fn test_with_does_not_mutate() {
        let base = Inventory::new().with("wood", 1);
        let _ = base.with("wood", 7);
        assert_eq!(base.quantity("wood"), 1);
    }

    #[test]
    fn test_merged_overlays_values() {
        let base: Inventory = [("wood", 0), ("stone", 0)].into_iter().collect();
        let overlay: Inventory = [("wood", 3)].into_iter().collect();
        let merged = base.merged(&overlay);
        assert_eq!(merged.get("wood"), Some(3));
        assert_eq!(merged.get("stone"), Some(0));
    }

    #[test]
    fn test_display_hides_zero_entries() {
        let inv: Inventory = [("wood", 0)].into_iter().collect();
        assert_eq!(inv.to_string(), "{}");
    }
}
