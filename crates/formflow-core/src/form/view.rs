use serde_json::{Map, Value};

/// Variables published when a form view is built.
///
/// `current_step_name` and `steps_names` come from the schema (its
/// `build_view`); `field_values` carries the display value of every field of
/// the active step and is the source for default extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewVars {
    pub current_step_name: String,
    pub steps_names: Vec<String>,
    /// Display value per field of the active step, keyed by field name.
    pub field_values: Map<String, Value>,
}

impl ViewVars {
    /// Default extraction: the initial display values as one JSON mapping.
    pub fn extract_values(&self) -> Value {
        Value::Object(self.field_values.clone())
    }
}
