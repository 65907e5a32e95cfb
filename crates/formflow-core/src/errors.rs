//! Core error taxonomy.
//!
//! Navigation misuse (`NoNextStep`/`NoPreviousStep`) and configuration
//! problems are fatal and surface to the caller. A failed validation is NOT
//! an error: `next`/`submit` return `Ok(())`, hold the current step, and the
//! caller inspects `has_validation_errors()` before re-rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum FormFlowError {
    #[error("no next step available")] NoNextStep,
    #[error("no previous step available")] NoPreviousStep,
    #[error("multistep schema requires a non-empty `steps` map")] MissingConfiguration,
    #[error("controller used before initialize()")] NotInitialized,
    #[error("step `{0}` is not part of the schema")] UnknownStep(String),
    #[error("internal: {0}")] Internal(String),
}
