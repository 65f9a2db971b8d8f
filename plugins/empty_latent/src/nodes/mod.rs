//! Empty latent nodes.
//!
//! Both variants share the override/invert inputs and the
//! `(LATENT, width, height)` output tuple; they differ in presets, lock
//! support, channel count and latent sizing.

mod flux;
mod sd35;

pub use flux::FluxEmptyLatent;
pub use sd35::SD3_5EmptyLatent;

use latent_host::{
    HostError, LatentTensor, NodeInputs, NodeOutputs, PinDataType, PinDefinition, PinValue,
};

use crate::resolve::ResolvedLatent;

const INVERT_OPTIONS: [&str; 2] = ["No", "Yes"];

// ---------------------------------------------------------------------------
// Schema helpers
// ---------------------------------------------------------------------------

fn batch_size_pin() -> PinDefinition {
    PinDefinition::integer("batch_size", 1, 1, 4096, 1)
}

fn override_pins(max_resolution: u32) -> [PinDefinition; 2] {
    let max = i64::from(max_resolution);
    [
        PinDefinition::integer("width_override", 0, 0, max, 8),
        PinDefinition::integer("height_override", 0, 0, max, 8),
    ]
}

fn invert_pin() -> PinDefinition {
    PinDefinition::dropdown("invert_ratios", &INVERT_OPTIONS, "No")
}

fn output_pins() -> Vec<PinDefinition> {
    use PinDataType::*;
    vec![
        PinDefinition::output("LATENT", "LATENT", Latent),
        PinDefinition::output("width", "width", Integer),
        PinDefinition::output("height", "height", Integer),
    ]
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn dimension(inputs: &NodeInputs, name: &str) -> Result<u32, HostError> {
    let value = inputs.integer(name)?;
    u32::try_from(value).map_err(|_| {
        HostError::InvalidArgument(format!("input '{}' = {} is negative", name, value))
    })
}

fn count(inputs: &NodeInputs, name: &str) -> Result<usize, HostError> {
    let value = inputs.integer(name)?;
    match usize::try_from(value) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(HostError::InvalidArgument(format!(
            "input '{}' must be at least 1, got {}",
            name, value
        ))),
    }
}

fn invert_flag(inputs: &NodeInputs) -> Result<bool, HostError> {
    Ok(inputs.choice("invert_ratios")? == "Yes")
}

fn latent_outputs(latent: LatentTensor, resolved: &ResolvedLatent) -> NodeOutputs {
    NodeOutputs::new()
        .with("LATENT", PinValue::Latent(latent))
        .with("width", PinValue::Integer(i64::from(resolved.width)))
        .with("height", PinValue::Integer(i64::from(resolved.height)))
}
