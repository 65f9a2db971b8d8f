//! Plugin manager for registering and running node plugins.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};

use crate::error::HostError;
use crate::evaluation::{ExecutionContext, NodeOutputs};
use crate::model::property::PropertyValue;
use crate::plugin::inputs::NodeInputs;
use crate::plugin::node_types::NodeTypeDefinition;
use crate::plugin::repository::{PluginRegistry, PluginRepository};
use crate::plugin::traits::NodePlugin;

/// Main plugin manager.
pub struct PluginManager {
    context: ExecutionContext,
    inner: RwLock<PluginRegistry>,
}

impl PluginManager {
    pub fn new(context: ExecutionContext) -> Self {
        Self {
            context,
            inner: RwLock::new(PluginRegistry {
                node_plugins: PluginRepository::new(),
                display_names: HashMap::new(),
            }),
        }
    }

    /// Host facts handed to node constructors.
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, PluginRegistry>, HostError> {
        self.inner
            .read()
            .map_err(|_| HostError::Runtime("plugin registry lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, PluginRegistry>, HostError> {
        self.inner
            .write()
            .map_err(|_| HostError::Runtime("plugin registry lock poisoned".to_string()))
    }

    /// Register a node under its plugin id with the given display name.
    pub fn register_node_plugin(
        &self,
        plugin: Arc<dyn NodePlugin>,
        display_name: &str,
    ) -> Result<(), HostError> {
        let id = plugin.id();
        let mut inner = self.write()?;
        if inner.node_plugins.register(plugin).is_some() {
            warn!("Node '{}' was already registered, replacing it", id);
        }
        inner
            .display_names
            .insert(id.to_string(), display_name.to_string());
        info!("Registered node '{}' as \"{}\"", id, display_name);
        Ok(())
    }

    /// Definitions of all registered nodes, sorted by type id.
    pub fn node_types(&self) -> Result<Vec<NodeTypeDefinition>, HostError> {
        let inner = self.read()?;
        let mut defs: Vec<_> = inner.node_plugins.values().map(|p| p.definition()).collect();
        defs.sort_by(|a, b| a.type_id.cmp(&b.type_id));
        Ok(defs)
    }

    pub fn node_definition(&self, type_id: &str) -> Result<NodeTypeDefinition, HostError> {
        Ok(self.plugin(type_id)?.definition())
    }

    /// Node id to display name, the mapping the host shows in its menus.
    pub fn display_name_mappings(&self) -> Result<BTreeMap<String, String>, HostError> {
        let inner = self.read()?;
        Ok(inner
            .display_names
            .iter()
            .map(|(id, name)| (id.clone(), name.clone()))
            .collect())
    }

    /// Validate `values` against the node's schema, then run the node.
    pub fn execute_node(
        &self,
        type_id: &str,
        values: HashMap<String, PropertyValue>,
    ) -> Result<NodeOutputs, HostError> {
        let plugin = self.plugin(type_id)?;
        let definition = plugin.definition();
        let inputs = NodeInputs::resolve(&definition, values)?;
        debug!("PluginManager: Executing node '{}'", type_id);
        let outputs = plugin.execute(&inputs)?;
        if outputs.len() != definition.outputs.len() {
            return Err(HostError::Node(format!(
                "node '{}' returned {} outputs, declared {}",
                type_id,
                outputs.len(),
                definition.outputs.len()
            )));
        }
        Ok(outputs)
    }

    fn plugin(&self, type_id: &str) -> Result<Arc<dyn NodePlugin>, HostError> {
        let inner = self.read()?;
        match inner.node_plugins.get(type_id) {
            Some(plugin) => Ok(Arc::clone(plugin)),
            None => {
                warn!("Node '{}' not found", type_id);
                Err(HostError::UnknownNode(type_id.to_string()))
            }
        }
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new(ExecutionContext::default())
    }
}
