//! Engine-wide rendering policy.
//!
//! [`Config`] decides which types get a root node wrapped around their
//! documents, whether collection elements repeat that wrapping, and which
//! types may be delivered as a JSONP callback. It is consulted at render
//! time only; templates themselves carry no wrapping policy.

use std::collections::HashSet;

/// Rendering policy shared by every render call on an engine.
///
/// # Example
///
/// ```
/// use veneer::config::Config;
///
/// let config = Config::default()
///     .add_root_node_for("User")
///     .allow_jsonp_callback("User");
///
/// assert!(config.wraps("User"));
/// assert!(!config.wraps("Task"));
/// assert!(config.jsonp_allowed("User"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    root_node_types: HashSet<String>,
    include_root_in_collections: bool,
    jsonp_types: HashSet<String>,
}

impl Config {
    /// Wrap documents of `api_type` in a root node keyed by the type's name.
    pub fn add_root_node_for(mut self, api_type: impl Into<String>) -> Self {
        self.root_node_types.insert(api_type.into());
        self
    }

    /// Stop wrapping documents of `api_type`.
    pub fn remove_root_node_for(mut self, api_type: &str) -> Self {
        self.root_node_types.remove(api_type);
        self
    }

    /// Also wrap each element of a wrapped collection in its own singular
    /// root node. Off by default.
    pub fn include_root_in_collections(mut self, enabled: bool) -> Self {
        self.include_root_in_collections = enabled;
        self
    }

    /// Permit JSONP callback delivery for `api_type`. Callbacks are refused
    /// for every type unless explicitly allowed here.
    pub fn allow_jsonp_callback(mut self, api_type: impl Into<String>) -> Self {
        self.jsonp_types.insert(api_type.into());
        self
    }

    /// Whether documents of `api_type` get a root node.
    pub fn wraps(&self, api_type: &str) -> bool {
        self.root_node_types.contains(api_type)
    }

    /// Whether wrapped collections repeat the singular root per element.
    pub fn wraps_collection_elements(&self) -> bool {
        self.include_root_in_collections
    }

    /// Whether `api_type` may be delivered through a JSONP callback.
    pub fn jsonp_allowed(&self, api_type: &str) -> bool {
        self.jsonp_types.contains(api_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wraps_nothing() {
        let config = Config::default();
        assert!(!config.wraps("User"));
        assert!(!config.wraps_collection_elements());
        assert!(!config.jsonp_allowed("User"));
    }

    #[test]
    fn wrapping_is_per_type() {
        let config = Config::default().add_root_node_for("User");
        assert!(config.wraps("User"));
        assert!(!config.wraps("Task"));
    }

    #[test]
    fn root_node_can_be_removed() {
        let config = Config::default()
            .add_root_node_for("User")
            .remove_root_node_for("User");
        assert!(!config.wraps("User"));
    }

    #[test]
    fn collection_element_wrapping_toggles() {
        let config = Config::default().include_root_in_collections(true);
        assert!(config.wraps_collection_elements());
    }

    #[test]
    fn jsonp_is_opt_in_per_type() {
        let config = Config::default().allow_jsonp_callback("User");
        assert!(config.jsonp_allowed("User"));
        assert!(!config.jsonp_allowed("Task"));
    }
}
