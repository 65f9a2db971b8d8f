//! Empty latent nodes driven by resolution presets.
//!
//! Register with [`register_nodes`]; the manager's context supplies the
//! maximum resolution and the device each node keeps for its lifetime.

pub mod error;
pub mod nodes;
pub mod preset;
pub mod resolve;

use std::sync::Arc;

use latent_host::{HostError, PluginManager};

pub use error::ResolutionError;
pub use nodes::{FluxEmptyLatent, SD3_5EmptyLatent};
pub use preset::ResolutionPreset;
pub use resolve::{
    AspectRatioLock, DownsampleFactor, LatentSizing, ResolutionRequest, ResolvedLatent, Resolver,
};

/// Node id to display name for every node this plugin provides.
pub const NODE_DISPLAY_NAMES: &[(&str, &str)] = &[
    (FluxEmptyLatent::ID, FluxEmptyLatent::DISPLAY_NAME),
    (SD3_5EmptyLatent::ID, SD3_5EmptyLatent::DISPLAY_NAME),
];

pub fn register_nodes(manager: &PluginManager) -> Result<(), HostError> {
    let context = manager.context();
    manager.register_node_plugin(
        Arc::new(FluxEmptyLatent::new(&context)),
        FluxEmptyLatent::DISPLAY_NAME,
    )?;
    manager.register_node_plugin(
        Arc::new(SD3_5EmptyLatent::new(&context)),
        SD3_5EmptyLatent::DISPLAY_NAME,
    )?;
    Ok(())
}
