//! Step-sequencing state machine.
//!
//! [`StepFormController`] owns the current step name, the ordered step list,
//! the active form instance and the extracted form values, and drives the
//! external form engine each time the step changes. Collaborators (storage,
//! form factory, submit hook) are injected at construction.

mod core;

pub use self::core::{StepFormController, SubmitHook};
