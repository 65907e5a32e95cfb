//! Multistep form schema: an ordered map of step name to step builder.
//!
//! The schema builds exactly one step's fields per form instantiation and
//! publishes `{current_step_name, steps_names}` into the view vars. That
//! view channel is the only way the controller learns the step list and the
//! default step, so navigation order is always the schema's insertion order.

use std::fmt;

use indexmap::IndexMap;

use crate::errors::FormFlowError;
use crate::form::{FormBuilder, FormOptions, ViewVars};

/// Procedure that adds one step's fields to a form under construction.
pub type StepBuilderFn = Box<dyn Fn(&mut dyn FormBuilder) + Send + Sync>;

pub struct MultiStepFormSchema {
    steps: IndexMap<String, StepBuilderFn>,
}

impl MultiStepFormSchema {
    /// Creates a schema from an ordered step map.
    ///
    /// Fails with [`FormFlowError::MissingConfiguration`] when `steps` is
    /// empty; a schema without steps is a programming error.
    pub fn new(steps: IndexMap<String, StepBuilderFn>) -> Result<Self, FormFlowError> {
        if steps.is_empty() {
            return Err(FormFlowError::MissingConfiguration);
        }
        Ok(Self { steps })
    }

    pub fn builder() -> MultiStepFormSchemaBuilder {
        MultiStepFormSchemaBuilder::default()
    }

    /// First declared step, the default current step.
    pub fn first_step_name(&self) -> &str {
        self.steps
            .keys()
            .next()
            .map(String::as_str)
            .expect("schema is non-empty by construction")
    }

    /// All step names in declaration order.
    pub fn step_names(&self) -> Vec<String> {
        self.steps.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolves the active step: the explicit option or the schema default.
    pub fn resolve_current_step<'a>(&'a self, options: &'a FormOptions) -> &'a str {
        options.current_step_name
               .as_deref()
               .unwrap_or_else(|| self.first_step_name())
    }

    /// Runs the active step's builder against `builder`.
    ///
    /// Exactly one builder runs; other steps' fields are never added, so
    /// submission and validation only ever touch the active step.
    pub fn build(&self, builder: &mut dyn FormBuilder, options: &FormOptions) -> Result<(), FormFlowError> {
        let current = self.resolve_current_step(options);
        let step = self.steps
                       .get(current)
                       .ok_or_else(|| FormFlowError::UnknownStep(current.to_string()))?;
        step(builder);
        Ok(())
    }

    /// Publishes the step metadata into the view vars.
    pub fn build_view(&self, view: &mut ViewVars, options: &FormOptions) {
        view.current_step_name = self.resolve_current_step(options).to_string();
        view.steps_names = self.step_names();
    }
}

impl fmt::Debug for MultiStepFormSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiStepFormSchema")
         .field("steps", &self.step_names())
         .finish()
    }
}

/// Accumulates `(name, builder)` pairs in navigation order.
#[derive(Default)]
pub struct MultiStepFormSchemaBuilder {
    steps: IndexMap<String, StepBuilderFn>,
}

impl MultiStepFormSchemaBuilder {
    /// Appends a step. Re-declaring a name replaces its builder in place.
    pub fn step<F>(mut self, name: impl Into<String>, builder: F) -> Self
        where F: Fn(&mut dyn FormBuilder) + Send + Sync + 'static
    {
        self.steps.insert(name.into(), Box::new(builder));
        self
    }

    pub fn build(self) -> Result<MultiStepFormSchema, FormFlowError> {
        MultiStepFormSchema::new(self.steps)
    }
}
