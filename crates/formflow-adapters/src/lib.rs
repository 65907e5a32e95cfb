//! Concrete collaborators for `formflow-core`.
//!
//! - [`fields`]: a small field-level form engine implementing the core's
//!   `FormBuilder`/`FormHandle`/`FormFactory` contracts with default values
//!   and required-field validation.
//! - [`session`]: a session-scoped storage backend with per-entry write
//!   metadata.

pub mod fields;
pub mod session;

pub use fields::{FieldError, FieldForm, FieldFormFactory, FieldSetBuilder};
pub use session::{SessionEntry, SessionStorage};
