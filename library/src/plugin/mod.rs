pub mod inputs;
pub mod manager;
pub mod node_types;
pub mod repository;
pub mod traits;

pub use inputs::NodeInputs;
pub use manager::PluginManager;
pub use node_types::{NodeCategory, NodeTypeDefinition};
pub use repository::PluginRepository;
pub use traits::{NodePlugin, Plugin};
