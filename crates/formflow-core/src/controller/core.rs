//! Core StepFormController implementation.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::errors::FormFlowError;
use crate::form::{FormFactory, FormHandle, FormOptions, ViewVars};
use crate::schema::MultiStepFormSchema;
use crate::storage::{keys, Storage};

/// Callback invoked by `submit` with the persisted data of every step.
pub type SubmitHook = Box<dyn FnMut(&IndexMap<String, Value>)>;

/// State machine walking a user through an ordered sequence of form steps.
///
/// Owns `{current_step_name, step_names, active form, form_values}` and
/// persists each step's submitted values across round trips under keys
/// scoped by `component_key`. All collaborators are injected: the storage
/// backend, the form factory driving the external engine, and an optional
/// submit hook for the final business action.
pub struct StepFormController<S, F>
    where S: Storage,
          F: FormFactory
{
    storage: S,
    form_factory: F,
    schema: MultiStepFormSchema,
    component_key: String,
    on_submit: Option<SubmitHook>,
    current_step_name: Option<String>,
    step_names: Vec<String>,
    form: Option<Box<dyn FormHandle>>,
    form_view: Option<ViewVars>,
    form_values: Value,
}

impl<S, F> StepFormController<S, F>
    where S: Storage,
          F: FormFactory
{
    /// Creates a controller with its injected collaborators.
    ///
    /// `component_key` namespaces every storage key; derive it with
    /// [`crate::storage::component_key_for`] for parity with components
    /// keyed by their type name.
    pub fn new(component_key: impl Into<String>,
               schema: MultiStepFormSchema,
               storage: S,
               form_factory: F)
               -> Self {
        Self { storage,
               form_factory,
               schema,
               component_key: component_key.into(),
               on_submit: None,
               current_step_name: None,
               step_names: Vec::new(),
               form: None,
               form_view: None,
               form_values: Value::Object(Map::new()) }
    }

    /// Installs the hook `submit` runs after a valid final submission.
    pub fn with_on_submit(mut self, hook: impl FnMut(&IndexMap<String, Value>) + 'static) -> Self {
        self.on_submit = Some(Box::new(hook));
        self
    }

    /// Restores the persisted state and builds the active step's form.
    ///
    /// Runs once per round trip, after construction: reads the current step
    /// from storage (falling back to the schema default), rebuilds the form
    /// scoped to it, seeds it with stored values and derives `form_values`
    /// from stored data or, when none exists yet, from the fresh form's
    /// default extraction.
    pub fn initialize(&mut self) -> Result<(), FormFlowError> {
        let bootstrap = self.form_factory.create(&self.schema, None, &FormOptions::default())?;
        let view = bootstrap.build_view();

        let current_key = keys::current_step_key(&self.component_key);
        let stored = self.storage.get(&current_key, Value::String(view.current_step_name.clone()));
        let current = match stored {
            Value::String(name) => name,
            _ => view.current_step_name.clone(),
        };
        self.current_step_name = Some(current.clone());
        self.step_names = view.steps_names;

        self.enter_current_step(true)?;

        // The cached view is stale once the restored step differs from the
        // bootstrap one; rebuild lazily on next access.
        self.form_view = None;

        log::debug!("{}: initialized at step `{current}`", self.component_key);
        Ok(())
    }

    /// Advances to the next step.
    ///
    /// Submits the active form against `input`; on validation errors the
    /// call returns `Ok(())` without any state change so the caller can
    /// re-render the errors. Otherwise the step's data is persisted, the
    /// current step advances positionally and the form is rebuilt for the
    /// new step.
    pub fn next(&mut self, input: &Value) -> Result<(), FormFlowError> {
        let current = self.current()?.to_string();

        self.form_mut()?.submit(input);
        if self.has_validation_errors() {
            log::warn!("{}: step `{current}` submitted with validation errors",
                       self.component_key);
            return Ok(());
        }

        let data = self.form_ref()?.data();
        let values_key = keys::form_values_key(&self.component_key, &current);
        self.storage.persist(&values_key, data);

        let position = self.step_names
                           .iter()
                           .position(|s| s == &current)
                           .ok_or(FormFlowError::NoNextStep)?;
        let next = self.step_names
                       .get(position + 1)
                       .cloned()
                       .ok_or(FormFlowError::NoNextStep)?;

        self.current_step_name = Some(next.clone());
        let current_key = keys::current_step_key(&self.component_key);
        self.storage.persist(&current_key, Value::String(next.clone()));

        self.enter_current_step(true)?;
        log::debug!("{}: advanced from `{current}` to `{next}`", self.component_key);
        Ok(())
    }

    /// Moves back to the previous step.
    ///
    /// No validation gate and no persistence of the current step's data;
    /// only the current step name changes and state is rebuilt from what
    /// storage already holds for the target step.
    pub fn previous(&mut self) -> Result<(), FormFlowError> {
        let current = self.current()?.to_string();
        let position = self.step_names
                           .iter()
                           .position(|s| s == &current)
                           .ok_or(FormFlowError::NoPreviousStep)?;
        let previous = position.checked_sub(1)
                               .and_then(|i| self.step_names.get(i))
                               .cloned()
                               .ok_or(FormFlowError::NoPreviousStep)?;

        self.current_step_name = Some(previous.clone());
        let current_key = keys::current_step_key(&self.component_key);
        self.storage.persist(&current_key, Value::String(previous.clone()));

        // Backward navigation never re-extracts defaults: a step with no
        // stored data shows an empty mapping.
        self.enter_current_step(false)?;
        log::debug!("{}: moved back from `{current}` to `{previous}`", self.component_key);
        Ok(())
    }

    /// Final submission: validation gate and persistence as in `next`, then
    /// the injected `on_submit` hook runs with all steps' data. The current
    /// step does not change.
    pub fn submit(&mut self, input: &Value) -> Result<(), FormFlowError> {
        let current = self.current()?.to_string();

        self.form_mut()?.submit(input);
        if self.has_validation_errors() {
            log::warn!("{}: final submission of `{current}` has validation errors",
                       self.component_key);
            return Ok(());
        }

        let data = self.form_ref()?.data();
        let values_key = keys::form_values_key(&self.component_key, &current);
        self.storage.persist(&values_key, data);

        let all_data = self.get_all_data();
        if let Some(hook) = self.on_submit.as_mut() {
            hook(&all_data);
        }
        log::debug!("{}: submitted at step `{current}`", self.component_key);
        Ok(())
    }

    /// True when the current step is the first of the ordered step list.
    pub fn is_first(&self) -> bool {
        match (&self.current_step_name, self.step_names.first()) {
            (Some(current), Some(first)) => current == first,
            _ => false,
        }
    }

    /// True when the current step is the last of the ordered step list.
    pub fn is_last(&self) -> bool {
        match (&self.current_step_name, self.step_names.last()) {
            (Some(current), Some(last)) => current == last,
            _ => false,
        }
    }

    /// Snapshot of every step's persisted data, in step order, defaulting
    /// unpersisted steps to an empty mapping. Never mutates state.
    pub fn get_all_data(&self) -> IndexMap<String, Value> {
        self.step_names
            .iter()
            .map(|step| {
                let key = keys::form_values_key(&self.component_key, step);
                (step.clone(), self.storage.get_or_empty(&key))
            })
            .collect()
    }

    /// Clears every stored entry and returns to the first step with freshly
    /// extracted default values.
    pub fn reset_form(&mut self) -> Result<(), FormFlowError> {
        let steps = self.step_names.clone();
        if steps.is_empty() {
            return Err(FormFlowError::NotInitialized);
        }
        for step in &steps {
            let key = keys::form_values_key(&self.component_key, step);
            self.storage.remove(&key);
        }
        let current_key = keys::current_step_key(&self.component_key);
        self.storage.remove(&current_key);

        let first = steps[0].clone();
        self.current_step_name = Some(first.clone());
        self.form = Some(self.instantiate_form()?);
        self.form_view = None;
        let extracted = self.form_view()?.extract_values();
        self.form_values = extracted;

        log::debug!("{}: reset to step `{first}`", self.component_key);
        Ok(())
    }

    /// True when the active form has been submitted and is not valid.
    pub fn has_validation_errors(&self) -> bool {
        self.form
            .as_deref()
            .is_some_and(|form| form.is_submitted() && !form.is_valid())
    }

    /// Lazily built view of the active form, cached until the step changes.
    pub fn form_view(&mut self) -> Result<&ViewVars, FormFlowError> {
        if self.form_view.is_none() {
            let form = self.form.as_deref().ok_or(FormFlowError::NotInitialized)?;
            self.form_view = Some(form.build_view());
        }
        Ok(self.form_view.as_ref().expect("view cached above"))
    }

    pub fn current_step_name(&self) -> Option<&str> {
        self.current_step_name.as_deref()
    }

    pub fn step_names(&self) -> &[String] {
        &self.step_names
    }

    pub fn form_values(&self) -> &Value {
        &self.form_values
    }

    pub fn component_key(&self) -> &str {
        &self.component_key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Rebuilds the active form for the current step and reloads its values
    /// from storage. With `extract_defaults`, an empty stored mapping is
    /// replaced in `form_values` by the fresh view's default extraction.
    fn enter_current_step(&mut self, extract_defaults: bool) -> Result<(), FormFlowError> {
        self.form = Some(self.instantiate_form()?);
        self.form_view = None;

        let current = self.current()?.to_string();
        let values_key = keys::form_values_key(&self.component_key, &current);
        let form_data = self.storage.get_or_empty(&values_key);

        if extract_defaults && is_empty_mapping(&form_data) {
            let extracted = self.form_view()?.extract_values();
            self.form_values = extracted;
        } else {
            self.form_values = form_data.clone();
        }
        self.form_mut()?.set_data(form_data);
        Ok(())
    }

    /// Instantiates the engine form scoped to the current step.
    fn instantiate_form(&self) -> Result<Box<dyn FormHandle>, FormFlowError> {
        let options = FormOptions { current_step_name: self.current_step_name.clone() };
        self.form_factory.create(&self.schema, None, &options)
    }

    fn current(&self) -> Result<&str, FormFlowError> {
        self.current_step_name.as_deref().ok_or(FormFlowError::NotInitialized)
    }

    fn form_ref(&self) -> Result<&dyn FormHandle, FormFlowError> {
        self.form.as_deref().ok_or(FormFlowError::NotInitialized)
    }

    fn form_mut(&mut self) -> Result<&mut (dyn FormHandle + 'static), FormFlowError> {
        self.form.as_deref_mut().ok_or(FormFlowError::NotInitialized)
    }
}

/// Storage's empty default (`{}`) and null both count as "no data yet".
fn is_empty_mapping(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Null => true,
        _ => false,
    }
}
