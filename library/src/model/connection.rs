//! Pin model for node inputs and outputs.

use serde::Serialize;

use crate::model::property::PropertyValue;

/// Data type for a pin.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PinDataType {
    /// Latent tensor (`{"samples": tensor}`)
    Latent,
    /// Integer value (i64)
    Integer,
    /// Text string
    String,
    /// Enumeration selection
    Enum,
}

/// Direction of a pin.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
}

/// Widget hint and value constraint the host enforces for an input pin.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropertyUiType {
    Integer { min: i64, max: i64, step: i64 },
    Dropdown { options: Vec<String> },
}

/// Definition of a pin on a node type.
#[derive(Serialize, Clone, Debug)]
pub struct PinDefinition {
    /// Internal name used for inputs and outputs (e.g. "batch_size")
    pub name: String,
    /// Display name shown in the UI (e.g. "LATENT")
    pub display_name: String,
    /// Whether this is an input or output pin
    pub direction: PinDirection,
    /// Data type of this pin
    pub data_type: PinDataType,
    /// Value used when the host supplies none (input pins only)
    pub default_value: Option<PropertyValue>,
    /// Constraint declared to the host (input pins only)
    pub ui_type: Option<PropertyUiType>,
}

impl PinDefinition {
    pub fn input(name: &str, display_name: &str, data_type: PinDataType) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            direction: PinDirection::Input,
            data_type,
            default_value: None,
            ui_type: None,
        }
    }

    pub fn output(name: &str, display_name: &str, data_type: PinDataType) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            direction: PinDirection::Output,
            data_type,
            default_value: None,
            ui_type: None,
        }
    }

    /// Integer input with an inclusive range and step.
    pub fn integer(name: &str, default: i64, min: i64, max: i64, step: i64) -> Self {
        Self::input(name, name, PinDataType::Integer)
            .with_default(PropertyValue::Integer(default))
            .with_ui_type(PropertyUiType::Integer { min, max, step })
    }

    /// Enumerated input; `default` should be one of `options`.
    pub fn dropdown<S: AsRef<str>>(name: &str, options: &[S], default: &str) -> Self {
        Self::input(name, name, PinDataType::Enum)
            .with_default(PropertyValue::from(default))
            .with_ui_type(PropertyUiType::Dropdown {
                options: options.iter().map(|o| o.as_ref().to_string()).collect(),
            })
    }

    pub fn with_default(mut self, value: PropertyValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_ui_type(mut self, ui_type: PropertyUiType) -> Self {
        self.ui_type = Some(ui_type);
        self
    }
}
