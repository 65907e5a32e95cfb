//! Contracts over the external form-construction engine.
//!
//! The core never builds, renders or validates fields itself; it drives an
//! engine through these traits:
//! - [`FormBuilder`]: the surface a step-builder closure writes fields to.
//! - [`FormHandle`]: one engine-built form scoped to a single step.
//! - [`FormFactory`]: instantiates a [`FormHandle`] for the schema's active
//!   step.
//! - [`ViewVars`]: what a built view publishes back (step metadata plus
//!   per-field display values for default extraction).

mod contract;
mod view;

pub use contract::{FieldConfig, FormBuilder, FormFactory, FormHandle, FormOptions};
pub use view::ViewVars;
