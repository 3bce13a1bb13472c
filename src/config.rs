use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifiers that are one-of-a-kind in the standard crafting domain:
/// stations and tools are never useful twice.
pub const DEFAULT_SINGLETON_ITEMS: [&str; 8] = [
    "bench",
    "furnace",
    "iron_axe",
    "iron_pickaxe",
    "stone_axe",
    "stone_pickaxe",
    "wooden_axe",
    "wooden_pickaxe",
];

/// Tuning knobs for a single search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use craftplan::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_time_limit(Duration::from_secs(5))
///     .with_singleton_items(["anvil"]);
///
/// assert_eq!(config.time_limit, Duration::from_secs(5));
/// assert!(config.singleton_items.contains("anvil"));
/// assert!(!config.singleton_items.contains("bench"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget, polled once per expansion
    pub time_limit: Duration,
    /// Holding two or more of any of these prunes a state
    pub singleton_items: BTreeSet<String>,
    /// Upper bound on heuristic relaxation passes; `None` derives it from the
    /// number of producible identifiers
    pub max_relaxation_passes: Option<usize>,
}

impl SearchConfig {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_singleton_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.singleton_items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_relaxation_passes(mut self, passes: usize) -> Self {
        self.max_relaxation_passes = Some(passes);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            singleton_items: DEFAULT_SINGLETON_ITEMS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            max_relaxation_passes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.time_limit, Duration::from_secs(30));
        assert_eq!(config.singleton_items.len(), DEFAULT_SINGLETON_ITEMS.len());
        assert!(config.singleton_items.contains("furnace"));
        assert_eq!(config.max_relaxation_passes, None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"max_relaxation_passes": 4}"#).unwrap();
        assert_eq!(config.max_relaxation_passes, Some(4));
        assert_eq!(config.time_limit, Duration::from_secs(30));
        assert!(config.singleton_items.contains("bench"));
    }
}
