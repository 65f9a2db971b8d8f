//! PinValue — the typed output of node execution.

use crate::tensor::LatentTensor;

/// The value produced by a node's output pin.
///
/// Each variant corresponds to a `PinDataType` a node can emit.
#[derive(Clone, Debug, PartialEq)]
pub enum PinValue {
    /// Latent batch.
    Latent(LatentTensor),
    /// Integer.
    Integer(i64),
}

impl PinValue {
    /// Extract as integer, returning default if not an Integer.
    pub fn as_integer(&self, default: i64) -> i64 {
        match self {
            PinValue::Integer(v) => *v,
            _ => default,
        }
    }

    /// Extract as latent.
    pub fn as_latent(&self) -> Option<&LatentTensor> {
        match self {
            PinValue::Latent(latent) => Some(latent),
            _ => None,
        }
    }
}
