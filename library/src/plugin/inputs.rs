//! Input values checked against a node's declared schema.

use std::collections::HashMap;

use log::warn;

use crate::error::HostError;
use crate::model::connection::{PinDataType, PinDefinition, PropertyUiType};
use crate::model::property::PropertyValue;
use crate::plugin::node_types::NodeTypeDefinition;

/// Validated inputs for one node execution.
///
/// Every declared input is present: omitted values are filled from the pin
/// default, integers lie in their declared range, and dropdown values are
/// one of the declared options (stored as the option text).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: HashMap<String, PropertyValue>,
}

impl NodeInputs {
    pub fn resolve(
        definition: &NodeTypeDefinition,
        mut supplied: HashMap<String, PropertyValue>,
    ) -> Result<Self, HostError> {
        let mut values = HashMap::with_capacity(definition.inputs.len());
        for pin in &definition.inputs {
            let raw = supplied
                .remove(&pin.name)
                .or_else(|| pin.default_value.clone())
                .ok_or_else(|| HostError::MissingInput(pin.name.clone()))?;
            let value = check_pin(pin, raw)?;
            values.insert(pin.name.clone(), value);
        }
        for name in supplied.keys() {
            warn!(
                "Ignoring input '{}' not declared by node '{}'",
                name, definition.type_id
            );
        }
        Ok(Self { values })
    }

    pub fn integer(&self, name: &str) -> Result<i64, HostError> {
        let value = self.require(name)?;
        value
            .as_integer()
            .ok_or_else(|| mismatch(name, "integer", value))
    }

    pub fn choice(&self, name: &str) -> Result<&str, HostError> {
        let value = self.require(name)?;
        value
            .as_str()
            .ok_or_else(|| mismatch(name, "enum option", value))
    }

    pub fn string(&self, name: &str) -> Result<&str, HostError> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| mismatch(name, "string", value))
    }

    fn require(&self, name: &str) -> Result<&PropertyValue, HostError> {
        self.values
            .get(name)
            .ok_or_else(|| HostError::MissingInput(name.to_string()))
    }
}

fn mismatch(name: &str, expected: &str, value: &PropertyValue) -> HostError {
    HostError::TypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
    }
}

fn check_pin(pin: &PinDefinition, value: PropertyValue) -> Result<PropertyValue, HostError> {
    let value = match pin.data_type {
        PinDataType::Integer => value
            .as_integer()
            .map(PropertyValue::Integer)
            .ok_or_else(|| mismatch(&pin.name, "integer", &value))?,
        PinDataType::String => match value {
            PropertyValue::String(_) => value,
            other => return Err(mismatch(&pin.name, "string", &other)),
        },
        // Numeric options such as a downsample factor of 4 arrive as integers.
        PinDataType::Enum => match value {
            PropertyValue::String(_) => value,
            PropertyValue::Integer(i) => PropertyValue::String(i.to_string()),
            other => return Err(mismatch(&pin.name, "enum option", &other)),
        },
        PinDataType::Latent => {
            return Err(HostError::InvalidArgument(format!(
                "input '{}' carries a latent and cannot take a literal value",
                pin.name
            )));
        }
    };

    match &pin.ui_type {
        Some(PropertyUiType::Integer { min, max, .. }) => {
            let v = value.as_integer().unwrap_or_default();
            if v < *min || v > *max {
                return Err(HostError::InvalidArgument(format!(
                    "input '{}' = {} is outside {}..={}",
                    pin.name, v, min, max
                )));
            }
        }
        Some(PropertyUiType::Dropdown { options }) => {
            let v = value.as_str().unwrap_or_default();
            if !options.iter().any(|option| option == v) {
                return Err(HostError::InvalidArgument(format!(
                    "input '{}' = '{}' is not one of the declared options",
                    pin.name, v
                )));
            }
        }
        None => {}
    }

    Ok(value)
}
