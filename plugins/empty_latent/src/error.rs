use latent_host::HostError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid resolution format: {input}. Expected format: 'WIDTHxHEIGHT (RATIO)'")]
    InvalidFormat { input: String },
    #[error("Latent grid for {width}x{height} at factor {factor} does not fit in 32 bits")]
    TooLarge { width: u32, height: u32, factor: u32 },
}

impl From<ResolutionError> for HostError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::InvalidFormat { .. } => HostError::Node(err.to_string()),
            ResolutionError::TooLarge { .. } => HostError::InvalidArgument(err.to_string()),
        }
    }
}
