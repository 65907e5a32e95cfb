//! formflow-core: multistep form state machine and its data contracts.
//!
//! A [`MultiStepFormSchema`] declares an ordered map of step name to
//! step-builder closure; a [`StepFormController`] walks a user through those
//! steps, persisting each step's submitted values across round trips under
//! component-scoped keys and reconstructing the active step's form on every
//! interaction. The form engine and the storage backend are external
//! collaborators consumed through the [`form`] and [`storage`] contracts.

pub mod controller;
pub mod errors;
pub mod form;
pub mod schema;
pub mod storage;

pub use controller::{StepFormController, SubmitHook};
pub use errors::FormFlowError;
pub use form::{FieldConfig, FormBuilder, FormFactory, FormHandle, FormOptions, ViewVars};
pub use schema::{MultiStepFormSchema, MultiStepFormSchemaBuilder, StepBuilderFn};
pub use storage::{component_key_for, InMemoryStorage, Storage};
