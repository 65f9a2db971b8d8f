//! Host-side contract for node plugins that produce latent tensors.
//!
//! A plugin implements [`NodePlugin`]: it declares its pins through a
//! [`NodeTypeDefinition`] and turns validated [`NodeInputs`] into
//! [`NodeOutputs`]. The [`PluginManager`] keeps the id → node and
//! id → display name mappings and validates inputs before execution.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod plugin;
pub mod tensor;

pub use config::{HostConfig, load_config};
pub use error::HostError;
pub use evaluation::{ExecutionContext, NodeOutputs, PinValue};
pub use model::{PinDataType, PinDefinition, PropertyUiType, PropertyValue};
pub use plugin::{
    NodeCategory, NodeInputs, NodePlugin, NodeTypeDefinition, Plugin, PluginManager,
};
pub use tensor::{Device, LatentTensor};

/// Build a manager whose context comes from `config`.
pub fn create_plugin_manager(config: &HostConfig) -> PluginManager {
    PluginManager::new(ExecutionContext::from(config))
}
