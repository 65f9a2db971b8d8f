//! Node type definitions declared to the host.

use serde::Serialize;

use crate::model::connection::{PinDefinition, PinDirection};

/// Category of a node type, rendered as the host's menu path.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Latent creation and manipulation ("latent")
    Latent,
    /// Helpers that do not fit elsewhere ("utilities")
    Utilities,
    /// Plugin-defined path, e.g. "sd3.5/utilities"
    Custom(String),
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeCategory::Latent => "latent",
            NodeCategory::Utilities => "utilities",
            NodeCategory::Custom(path) => path.as_str(),
        };
        write!(f, "{}", s)
    }
}

/// Definition of a node type, registered in the PluginManager.
///
/// This is everything the host needs to draw the node and validate its
/// inputs: pins, defaults, constraints, and metadata.
#[derive(Serialize, Debug, Clone)]
pub struct NodeTypeDefinition {
    /// Unique type identifier (e.g. "FluxEmptyLatent")
    pub type_id: String,
    /// Human-readable name
    pub display_name: String,
    /// Category for grouping in the UI
    pub category: NodeCategory,
    /// Description shown in tooltips
    pub description: String,
    /// Input pin definitions
    pub inputs: Vec<PinDefinition>,
    /// Output pin definitions, in return order
    pub outputs: Vec<PinDefinition>,
}

impl NodeTypeDefinition {
    pub fn new(type_id: &str, display_name: &str, category: NodeCategory) -> Self {
        Self {
            type_id: type_id.to_string(),
            display_name: display_name.to_string(),
            category,
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PinDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PinDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn input(&self, name: &str) -> Option<&PinDefinition> {
        self.inputs
            .iter()
            .find(|pin| pin.name == name && pin.direction == PinDirection::Input)
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|pin| pin.name.as_str())
    }
}
