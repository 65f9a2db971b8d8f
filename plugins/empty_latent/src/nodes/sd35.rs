use latent_host::{
    Device, ExecutionContext, HostError, LatentTensor, NodeCategory, NodeInputs, NodeOutputs,
    NodePlugin, NodeTypeDefinition, PinDefinition, Plugin,
};
use log::debug;

use super::{batch_size_pin, count, dimension, invert_flag, invert_pin, latent_outputs};
use super::{output_pins, override_pins};
use crate::preset::{ResolutionPreset, SD35_DEFAULT_PRESET, SD35_PRESETS};
use crate::resolve::{LatentSizing, ResolutionRequest, Resolver};

const CATEGORY: &str = "sd3.5/utilities";
const LATENT_CHANNELS: usize = 4;

/// Size picker for the SD3.5 resolution buckets.
///
/// Pixel sizes are truncated to multiples of 64 before the latent is sized.
#[allow(non_camel_case_types)]
pub struct SD3_5EmptyLatent {
    device: Device,
    resolver: Resolver,
}

impl SD3_5EmptyLatent {
    pub const ID: &'static str = "SD3_5EmptyLatent";
    pub const DISPLAY_NAME: &'static str = "🔧 SD3.5 Empty Latent Size Picker";

    pub fn new(context: &ExecutionContext) -> Self {
        Self {
            device: context.device,
            resolver: Resolver::new(context.max_resolution),
        }
    }
}

impl Plugin for SD3_5EmptyLatent {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn name(&self) -> String {
        Self::DISPLAY_NAME.to_string()
    }

    fn category(&self) -> String {
        CATEGORY.to_string()
    }

    fn version(&self) -> (u32, u32, u32) {
        (0, 1, 0)
    }
}

impl NodePlugin for SD3_5EmptyLatent {
    fn definition(&self) -> NodeTypeDefinition {
        let [width_override, height_override] = override_pins(self.resolver.max_resolution());
        NodeTypeDefinition::new(
            Self::ID,
            Self::DISPLAY_NAME,
            NodeCategory::Custom(CATEGORY.to_string()),
        )
        .with_inputs(vec![
            PinDefinition::dropdown("resolution", SD35_PRESETS, SD35_DEFAULT_PRESET),
            batch_size_pin(),
            width_override,
            height_override,
            invert_pin(),
        ])
        .with_outputs(output_pins())
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<NodeOutputs, HostError> {
        let base = ResolutionPreset::parse(inputs.choice("resolution")?)?;
        let request = ResolutionRequest::new(base)
            .with_overrides(
                dimension(inputs, "width_override")?,
                dimension(inputs, "height_override")?,
            )
            .inverted(invert_flag(inputs)?);

        let resolved = self.resolver.resolve(&request, LatentSizing::Aligned64)?;
        let shape = resolved.shape(count(inputs, "batch_size")?, LATENT_CHANNELS);
        debug!("{}: allocating latent {:?} on {}", Self::ID, shape, self.device);
        let latent = LatentTensor::zeros(shape, self.device);

        Ok(latent_outputs(latent, &resolved))
    }
}
