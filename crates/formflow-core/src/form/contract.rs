use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ViewVars;
use crate::errors::FormFlowError;
use crate::schema::MultiStepFormSchema;

/// Options forwarded to the schema and factory when (re)building a form.
///
/// `current_step_name = None` means "let the schema decide", which resolves
/// to the first declared step.
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    pub current_step_name: Option<String>,
}

impl FormOptions {
    pub fn for_step(step_name: impl Into<String>) -> Self {
        Self { current_step_name: Some(step_name.into()) }
    }
}

/// Declarative description of a single field added by a step builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Initial display value when no data has been persisted yet.
    pub default: Value,
    /// Blank submissions of required fields invalidate the step.
    pub required: bool,
    pub label: Option<String>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self { default: Value::Null, required: false, label: None }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Form-under-construction surface handed to step-builder closures.
pub trait FormBuilder {
    fn add(&mut self, name: &str, field: FieldConfig);
}

/// One engine-built form, scoped to exactly one step.
pub trait FormHandle {
    /// Seeds the form with previously persisted data.
    fn set_data(&mut self, data: Value);

    /// Current data payload (a mapping of field name to value).
    fn data(&self) -> Value;

    /// Submits the round trip's raw input against this step's fields.
    fn submit(&mut self, input: &Value);

    fn is_submitted(&self) -> bool;

    /// Only meaningful after `submit`.
    fn is_valid(&self) -> bool;

    /// Builds a fresh view of the form in its current state.
    fn build_view(&self) -> ViewVars;
}

/// Instantiates forms for the schema's active step.
pub trait FormFactory {
    fn create(&self,
              schema: &MultiStepFormSchema,
              data: Option<Value>,
              options: &FormOptions)
              -> Result<Box<dyn FormHandle>, FormFlowError>;
}
