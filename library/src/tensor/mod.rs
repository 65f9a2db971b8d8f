//! Latent tensors handed between nodes.

use std::fmt;

use ndarray::{Array4, ArrayView4};
use serde::{Deserialize, Serialize};

/// Where the host keeps intermediate tensors.
///
/// A node reads this once when it is constructed. Buffers are always
/// allocated by `ndarray` in host memory; the tag tells downstream consumers
/// where the latent is meant to live.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Gpu(u32),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Gpu(index) => write!(f, "gpu:{}", index),
        }
    }
}

/// A batch of latents laid out as `[batch, channels, height, width]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentTensor {
    samples: Array4<f32>,
    device: Device,
}

impl LatentTensor {
    /// Zero-filled latent of the given shape.
    pub fn zeros(shape: [usize; 4], device: Device) -> Self {
        Self {
            samples: Array4::zeros(shape),
            device,
        }
    }

    pub fn samples(&self) -> ArrayView4<'_, f32> {
        self.samples.view()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// `[batch, channels, height, width]`
    pub fn shape(&self) -> [usize; 4] {
        let dim = self.samples.dim();
        [dim.0, dim.1, dim.2, dim.3]
    }

    pub fn batch_size(&self) -> usize {
        self.shape()[0]
    }

    pub fn channels(&self) -> usize {
        self.shape()[1]
    }
}
