//! Generic plugin repository.

use std::collections::HashMap;
use std::sync::Arc;

use crate::plugin::traits::{NodePlugin, Plugin};

/// Generic container for plugins of a specific type.
pub struct PluginRepository<T: ?Sized> {
    pub plugins: HashMap<String, Arc<T>>,
}

impl<T: ?Sized + Plugin> PluginRepository<T> {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Returns the plugin previously registered under the same id, if any.
    pub fn register(&mut self, plugin: Arc<T>) -> Option<Arc<T>> {
        self.plugins.insert(plugin.id().to_string(), plugin)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.plugins.get(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<T>> {
        self.plugins.values()
    }
}

impl<T: ?Sized + Plugin> Default for PluginRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal registry holding all plugin repositories.
pub(crate) struct PluginRegistry {
    pub node_plugins: PluginRepository<dyn NodePlugin>,
    /// Display names keyed by node id, as declared at registration.
    pub display_names: HashMap<String, String>,
}
