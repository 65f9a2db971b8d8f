use crate::config::HostConfig;
use crate::tensor::Device;

/// Host facts a node captures once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Upper bound on any single pixel dimension.
    pub max_resolution: u32,
    /// Target for intermediate tensors.
    pub device: Device,
}

impl ExecutionContext {
    pub fn new(max_resolution: u32, device: Device) -> Self {
        Self {
            max_resolution,
            device,
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::from(&HostConfig::default())
    }
}

impl From<&HostConfig> for ExecutionContext {
    fn from(config: &HostConfig) -> Self {
        Self::new(config.max_resolution, config.intermediate_device)
    }
}
