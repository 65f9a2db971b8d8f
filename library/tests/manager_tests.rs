//! Integration tests for node registration and execution through the manager.

use std::collections::HashMap;
use std::sync::Arc;

use latent_host::{
    Device, ExecutionContext, HostError, LatentTensor, NodeCategory, NodeInputs, NodeOutputs,
    NodePlugin, NodeTypeDefinition, PinDataType, PinDefinition, PinValue, Plugin, PluginManager,
    PropertyValue,
};

/// Minimal node: allocates a square latent of the requested size.
struct SquareLatentNode {
    device: Device,
}

impl Plugin for SquareLatentNode {
    fn id(&self) -> &'static str {
        "SquareLatent"
    }

    fn name(&self) -> String {
        "Square Latent".to_string()
    }

    fn category(&self) -> String {
        "latent".to_string()
    }

    fn version(&self) -> (u32, u32, u32) {
        (0, 1, 0)
    }
}

impl NodePlugin for SquareLatentNode {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new(self.id(), "Square Latent", NodeCategory::Latent)
            .with_inputs(vec![PinDefinition::integer("size", 8, 1, 64, 1)])
            .with_outputs(vec![
                PinDefinition::output("LATENT", "LATENT", PinDataType::Latent),
                PinDefinition::output("size", "size", PinDataType::Integer),
            ])
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<NodeOutputs, HostError> {
        let size = inputs.integer("size")?;
        let latent = LatentTensor::zeros([1, 4, size as usize, size as usize], self.device);
        Ok(NodeOutputs::new()
            .with("LATENT", PinValue::Latent(latent))
            .with("size", PinValue::Integer(size)))
    }
}

fn setup_manager() -> PluginManager {
    let manager = PluginManager::new(ExecutionContext::new(4096, Device::Gpu(0)));
    let node = SquareLatentNode {
        device: manager.context().device,
    };
    manager
        .register_node_plugin(Arc::new(node), "Square Latent (Test)")
        .unwrap();
    manager
}

#[test]
fn test_registered_node_is_listed_with_display_name() {
    let manager = setup_manager();

    let types = manager.node_types().unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].type_id, "SquareLatent");
    assert_eq!(types[0].category.to_string(), "latent");

    let names = manager.display_name_mappings().unwrap();
    assert_eq!(
        names.get("SquareLatent").map(String::as_str),
        Some("Square Latent (Test)")
    );
}

#[test]
fn test_execute_uses_defaults_and_context_device() {
    let manager = setup_manager();

    let outputs = manager.execute_node("SquareLatent", HashMap::new()).unwrap();
    let latent = outputs.get("LATENT").and_then(PinValue::as_latent).unwrap();
    assert_eq!(latent.shape(), [1, 4, 8, 8]);
    assert_eq!(latent.device(), Device::Gpu(0));
    assert_eq!(outputs.get("size").unwrap().as_integer(0), 8);
    assert_eq!(outputs.names().collect::<Vec<_>>(), vec!["LATENT", "size"]);
}

#[test]
fn test_execute_rejects_values_outside_schema() {
    let manager = setup_manager();
    let mut values = HashMap::new();
    values.insert("size".to_string(), PropertyValue::Integer(65));

    let err = manager.execute_node("SquareLatent", values).unwrap_err();
    assert!(matches!(err, HostError::InvalidArgument(_)));
}

#[test]
fn test_unknown_node_is_an_error() {
    let manager = setup_manager();
    let err = manager.execute_node("Missing", HashMap::new()).unwrap_err();
    assert!(matches!(err, HostError::UnknownNode(id) if id == "Missing"));
}

#[test]
fn test_definitions_serialize_for_the_host() {
    let manager = setup_manager();
    let def = manager.node_definition("SquareLatent").unwrap();
    let json = serde_json::to_value(&def).unwrap();

    assert_eq!(json["inputs"][0]["name"], "size");
    assert_eq!(json["inputs"][0]["ui_type"]["kind"], "integer");
    assert_eq!(json["inputs"][0]["ui_type"]["max"], 64);
    assert_eq!(json["outputs"][0]["data_type"], "latent");
}
