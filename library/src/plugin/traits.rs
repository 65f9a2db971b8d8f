//! Core plugin traits.

use crate::error::HostError;
use crate::evaluation::NodeOutputs;
use crate::plugin::inputs::NodeInputs;
use crate::plugin::node_types::NodeTypeDefinition;

/// Base trait for all plugins.
pub trait Plugin: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> String;
    fn category(&self) -> String;
    fn version(&self) -> (u32, u32, u32);
}

/// Plugin trait for graph nodes.
///
/// A node describes its inputs and outputs through `definition` and produces
/// outputs through `execute`. The host validates `inputs` against the
/// definition before calling `execute`.
pub trait NodePlugin: Plugin {
    fn definition(&self) -> NodeTypeDefinition;

    fn execute(&self, inputs: &NodeInputs) -> Result<NodeOutputs, HostError>;
}
