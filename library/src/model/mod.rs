pub mod connection;
pub mod property;

pub use connection::{PinDataType, PinDefinition, PinDirection, PropertyUiType};
pub use property::PropertyValue;
