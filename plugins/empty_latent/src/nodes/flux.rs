use latent_host::{
    Device, ExecutionContext, HostError, LatentTensor, NodeCategory, NodeInputs, NodeOutputs,
    NodePlugin, NodeTypeDefinition, PinDefinition, Plugin,
};
use log::debug;

use super::{batch_size_pin, count, dimension, invert_flag, invert_pin, latent_outputs};
use super::{output_pins, override_pins};
use crate::preset::{ResolutionPreset, FLUX_DEFAULT_PRESET, FLUX_PRESETS};
use crate::resolve::{
    AspectRatioLock, DownsampleFactor, LatentSizing, ResolutionRequest, Resolver,
};

/// Empty latent with the extended preset list, aspect ratio lock, and a
/// configurable channel count and downsample factor.
///
/// Sized for Flux (16 channels) but equally usable for SD3.5 and SDXL.
/// The latent grid is rounded up, and the returned width/height are the
/// pixel size that grid covers.
pub struct FluxEmptyLatent {
    device: Device,
    resolver: Resolver,
}

impl FluxEmptyLatent {
    pub const ID: &'static str = "FluxEmptyLatent";
    pub const DISPLAY_NAME: &'static str = "🔧 Flux Empty Latent (Enhanced)";

    pub fn new(context: &ExecutionContext) -> Self {
        Self {
            device: context.device,
            resolver: Resolver::new(context.max_resolution),
        }
    }
}

impl Plugin for FluxEmptyLatent {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn name(&self) -> String {
        Self::DISPLAY_NAME.to_string()
    }

    fn category(&self) -> String {
        NodeCategory::Latent.to_string()
    }

    fn version(&self) -> (u32, u32, u32) {
        (0, 1, 0)
    }
}

impl NodePlugin for FluxEmptyLatent {
    fn definition(&self) -> NodeTypeDefinition {
        let [width_override, height_override] = override_pins(self.resolver.max_resolution());
        NodeTypeDefinition::new(Self::ID, Self::DISPLAY_NAME, NodeCategory::Latent)
            .with_description(
                "Empty latent with extended aspect ratio presets. \
                 Designed for Flux models but compatible with SD3.5 and SDXL.",
            )
            .with_inputs(vec![
                PinDefinition::dropdown("resolution", FLUX_PRESETS, FLUX_DEFAULT_PRESET),
                batch_size_pin(),
                width_override,
                height_override,
                PinDefinition::dropdown("aspect_ratio_lock", &AspectRatioLock::OPTIONS, "Unlocked"),
                PinDefinition::integer("latent_channels", 4, 1, 16, 1),
                PinDefinition::dropdown("downsample_factor", &DownsampleFactor::OPTIONS, "auto"),
                invert_pin(),
            ])
            .with_outputs(output_pins())
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<NodeOutputs, HostError> {
        let base = ResolutionPreset::parse(inputs.choice("resolution")?)?;
        let lock: AspectRatioLock = inputs
            .choice("aspect_ratio_lock")?
            .parse()
            .map_err(HostError::InvalidArgument)?;
        let factor: DownsampleFactor = inputs
            .choice("downsample_factor")?
            .parse()
            .map_err(HostError::InvalidArgument)?;
        let request = ResolutionRequest::new(base)
            .with_overrides(
                dimension(inputs, "width_override")?,
                dimension(inputs, "height_override")?,
            )
            .with_lock(lock)
            .inverted(invert_flag(inputs)?);

        let resolved = self.resolver.resolve(
            &request,
            LatentSizing::Ceil {
                factor: factor.value(),
            },
        )?;
        let shape = resolved.shape(
            count(inputs, "batch_size")?,
            count(inputs, "latent_channels")?,
        );
        debug!("{}: allocating latent {:?} on {}", Self::ID, shape, self.device);
        let latent = LatentTensor::zeros(shape, self.device);

        Ok(latent_outputs(latent, &resolved))
    }
}
