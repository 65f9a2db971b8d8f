pub mod context;
pub mod output;

pub use context::ExecutionContext;
pub use output::{NodeOutputs, PinValue};
