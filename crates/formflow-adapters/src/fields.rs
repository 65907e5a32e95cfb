//! Field-level form engine.
//!
//! Implements the core's form contracts over a flat set of
//! [`FieldConfig`]-described fields: the active step's builder declares its
//! fields into a [`FieldSetBuilder`], and the resulting [`FieldForm`]
//! handles data seeding, submission with required-field validation, and
//! view building with per-field display values for default extraction.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use formflow_core::errors::FormFlowError;
use formflow_core::form::{FieldConfig, FormBuilder, FormFactory, FormHandle, FormOptions, ViewVars};
use formflow_core::schema::MultiStepFormSchema;

/// Collects the fields declared by one step's builder, in order.
#[derive(Debug, Default)]
pub struct FieldSetBuilder {
    fields: IndexMap<String, FieldConfig>,
}

impl FieldSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_fields(self) -> IndexMap<String, FieldConfig> {
        self.fields
    }
}

impl FormBuilder for FieldSetBuilder {
    fn add(&mut self, name: &str, field: FieldConfig) {
        self.fields.insert(name.to_string(), field);
    }
}

/// Validation failure of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Form over one step's field set.
#[derive(Debug)]
pub struct FieldForm {
    fields: IndexMap<String, FieldConfig>,
    vars: ViewVars,
    data: Map<String, Value>,
    submitted: bool,
    errors: Vec<FieldError>,
}

impl FieldForm {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

impl FormHandle for FieldForm {
    fn set_data(&mut self, data: Value) {
        self.data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
    }

    fn data(&self) -> Value {
        Value::Object(self.data.clone())
    }

    fn submit(&mut self, input: &Value) {
        self.submitted = true;
        self.errors.clear();

        let input = input.as_object().cloned().unwrap_or_default();
        let mut data = Map::new();
        for (name, field) in &self.fields {
            // Missing fields fall back to the declared default.
            let value = input.get(name).cloned().unwrap_or_else(|| field.default.clone());
            if field.required && is_blank(&value) {
                self.errors.push(FieldError { field: name.clone(),
                                              message: format!("`{name}` must not be blank") });
            }
            data.insert(name.clone(), value);
        }
        self.data = data;
    }

    fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn build_view(&self) -> ViewVars {
        let mut vars = self.vars.clone();
        vars.field_values = self.fields
                                .iter()
                                .map(|(name, field)| {
                                    let value = self.data
                                                    .get(name)
                                                    .filter(|v| !v.is_null())
                                                    .cloned()
                                                    .unwrap_or_else(|| field.default.clone());
                                    (name.clone(), value)
                                })
                                .collect();
        vars
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Instantiates a [`FieldForm`] for the schema's active step.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldFormFactory;

impl FieldFormFactory {
    pub fn new() -> Self {
        Self
    }
}

impl FormFactory for FieldFormFactory {
    fn create(&self,
              schema: &MultiStepFormSchema,
              data: Option<Value>,
              options: &FormOptions)
              -> Result<Box<dyn FormHandle>, FormFlowError> {
        let mut builder = FieldSetBuilder::new();
        schema.build(&mut builder, options)?;

        let mut vars = ViewVars::default();
        schema.build_view(&mut vars, options);

        let mut form = FieldForm { fields: builder.into_fields(),
                                   vars,
                                   data: Map::new(),
                                   submitted: false,
                                   errors: Vec::new() };
        if let Some(data) = data {
            form.set_data(data);
        }
        Ok(Box::new(form))
    }
}
