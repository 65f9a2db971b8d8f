mod pin_value;

pub use pin_value::PinValue;

/// Ordered output tuple of one node execution, keyed by output pin name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeOutputs {
    values: Vec<(String, PinValue)>,
}

impl NodeOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: PinValue) -> Self {
        self.values.push((name.to_string(), value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&PinValue> {
        self.values
            .iter()
            .find(|(pin, _)| pin == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
