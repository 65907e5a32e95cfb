//! End-to-end controller flows over the field form engine and the
//! in-memory/session storage backends.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::{json, Value};

use formflow_adapters::{FieldFormFactory, SessionStorage};
use formflow_core::{component_key_for, FieldConfig, FormFlowError, InMemoryStorage,
                    MultiStepFormSchema, StepFormController, Storage};

fn signup_schema() -> MultiStepFormSchema {
    MultiStepFormSchema::builder()
        .step("general", |b| b.add("name", FieldConfig::new().required()))
        .step("contact", |b| b.add("email", FieldConfig::new().required()))
        .step("newsletter", |b| {
            b.add("subscribe", FieldConfig::new().with_default(json!(false)))
        })
        .build()
        .expect("signup schema")
}

fn controller_with(storage: InMemoryStorage) -> StepFormController<InMemoryStorage, FieldFormFactory> {
    let mut controller =
        StepFormController::new("registration_wizard", signup_schema(), storage, FieldFormFactory::new());
    controller.initialize().expect("initialize");
    controller
}

fn controller() -> StepFormController<InMemoryStorage, FieldFormFactory> {
    controller_with(InMemoryStorage::new())
}

#[test]
fn initialize_starts_at_schema_default() {
    let controller = controller();

    assert_eq!(controller.current_step_name(), Some("general"));
    let names: Vec<&str> = controller.step_names().iter().map(String::as_str).collect();
    assert_eq!(names, ["general", "contact", "newsletter"]);
    assert!(controller.is_first());
    assert!(!controller.is_last());
    // No persisted data yet: values come from default extraction.
    assert_eq!(controller.form_values(), &json!({"name": null}));
    assert!(controller.storage().is_empty());
}

#[test]
fn next_persists_step_data_and_advances() {
    let mut controller = controller();

    controller.next(&json!({"name": "A"})).expect("next");

    assert_eq!(controller.current_step_name(), Some("contact"));
    assert_eq!(controller.storage().get_or_empty("registration_wizard_form_values_general"),
               json!({"name": "A"}));
    assert_eq!(controller.storage().get("registration_wizard_current_step_name", Value::Null),
               json!("contact"));
    // The new step has no stored data, so defaults are extracted.
    assert_eq!(controller.form_values(), &json!({"email": null}));
}

#[test]
fn invalid_submission_holds_state_without_storage_writes() {
    let mut controller = controller();

    controller.next(&json!({})).expect("validation failure is not an error");

    assert_eq!(controller.current_step_name(), Some("general"));
    assert!(controller.has_validation_errors());
    assert!(controller.storage().is_empty());
}

#[test]
fn next_then_previous_returns_to_prior_step() {
    let mut controller = controller();

    controller.next(&json!({"name": "A"})).expect("next");
    controller.previous().expect("previous");

    assert_eq!(controller.current_step_name(), Some("general"));
    assert!(controller.is_first());
    // Values reload from what `next` persisted.
    assert_eq!(controller.form_values(), &json!({"name": "A"}));
}

#[test]
fn previous_on_first_step_fails() {
    let mut controller = controller();

    assert_eq!(controller.previous().unwrap_err(), FormFlowError::NoPreviousStep);
    assert_eq!(controller.current_step_name(), Some("general"));
}

#[test]
fn next_on_last_step_fails() {
    let mut controller = controller();
    controller.next(&json!({"name": "A"})).expect("to contact");
    controller.next(&json!({"email": "a@example.org"})).expect("to newsletter");
    assert!(controller.is_last());

    assert_eq!(controller.next(&json!({"subscribe": true})).unwrap_err(),
               FormFlowError::NoNextStep);
    assert_eq!(controller.current_step_name(), Some("newsletter"));
}

#[test]
fn submit_invokes_hook_with_all_steps_data() {
    let collected: Rc<RefCell<Option<IndexMap<String, Value>>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&collected);

    let mut controller = StepFormController::new("registration_wizard",
                                                 signup_schema(),
                                                 InMemoryStorage::new(),
                                                 FieldFormFactory::new())
        .with_on_submit(move |all| *sink.borrow_mut() = Some(all.clone()));
    controller.initialize().expect("initialize");

    controller.next(&json!({"name": "A"})).expect("to contact");
    controller.next(&json!({"email": "a@example.org"})).expect("to newsletter");
    controller.submit(&json!({"subscribe": true})).expect("submit");

    // Final submission never changes the step.
    assert_eq!(controller.current_step_name(), Some("newsletter"));

    let all = collected.borrow().clone().expect("hook ran");
    let steps: Vec<&str> = all.keys().map(String::as_str).collect();
    assert_eq!(steps, ["general", "contact", "newsletter"]);
    assert_eq!(all["general"], json!({"name": "A"}));
    assert_eq!(all["newsletter"], json!({"subscribe": true}));
}

#[test]
fn invalid_final_submission_does_not_invoke_hook() {
    let ran = Rc::new(RefCell::new(false));
    let sink = Rc::clone(&ran);

    let mut controller = StepFormController::new("registration_wizard",
                                                 signup_schema(),
                                                 InMemoryStorage::new(),
                                                 FieldFormFactory::new())
        .with_on_submit(move |_| *sink.borrow_mut() = true);
    controller.initialize().expect("initialize");
    controller.next(&json!({"name": "A"})).expect("to contact");

    controller.submit(&json!({})).expect("validation failure is not an error");

    assert!(controller.has_validation_errors());
    assert!(!*ran.borrow());
    assert_eq!(controller.storage().get("registration_wizard_form_values_contact", Value::Null),
               Value::Null);
}

#[test]
fn reset_form_is_idempotent() {
    let mut controller = controller();
    controller.next(&json!({"name": "A"})).expect("to contact");

    controller.reset_form().expect("first reset");
    assert_eq!(controller.current_step_name(), Some("general"));
    assert!(controller.storage().is_empty());
    assert_eq!(controller.form_values(), &json!({"name": null}));

    controller.reset_form().expect("second reset");
    assert_eq!(controller.current_step_name(), Some("general"));
    assert!(controller.storage().is_empty());
    assert_eq!(controller.form_values(), &json!({"name": null}));
    assert!(controller.is_first());
}

#[test]
fn get_all_data_is_a_pure_snapshot() {
    let mut controller = controller();
    controller.next(&json!({"name": "A"})).expect("to contact");
    let stored_before = controller.storage().len();

    let all = controller.get_all_data();

    assert_eq!(all["general"], json!({"name": "A"}));
    assert_eq!(all["contact"], json!({}));
    assert_eq!(all["newsletter"], json!({}));
    assert_eq!(controller.current_step_name(), Some("contact"));
    assert_eq!(controller.storage().len(), stored_before);
}

#[test]
fn external_storage_mutation_is_visible_in_snapshots() {
    let mut controller = controller();
    controller.next(&json!({"name": "A"})).expect("to contact");
    assert_eq!(controller.get_all_data()["general"], json!({"name": "A"}));

    // Something outside the controller purges an entry, e.g. a session
    // cleanup; the next snapshot reflects it.
    controller.storage_mut().remove("registration_wizard_form_values_general");

    assert_eq!(controller.get_all_data()["general"], json!({}));
    assert_eq!(controller.current_step_name(), Some("contact"));
}

#[test]
fn initialize_restores_persisted_state() {
    let mut storage = InMemoryStorage::new();
    storage.persist("registration_wizard_current_step_name", json!("contact"));
    storage.persist("registration_wizard_form_values_contact",
                    json!({"email": "a@example.org"}));

    let controller = controller_with(storage);

    assert_eq!(controller.current_step_name(), Some("contact"));
    assert!(!controller.is_first());
    // Stored data is taken verbatim, no default extraction.
    assert_eq!(controller.form_values(), &json!({"email": "a@example.org"}));
}

#[test]
fn previous_to_unvisited_step_keeps_raw_stored_value() {
    let mut storage = InMemoryStorage::new();
    storage.persist("registration_wizard_current_step_name", json!("newsletter"));

    let mut controller = controller_with(storage);
    assert_eq!(controller.form_values(), &json!({"subscribe": false}));

    controller.previous().expect("previous");

    // `contact` was never visited; backward navigation takes the storage
    // default verbatim instead of extracting the step's field defaults.
    assert_eq!(controller.current_step_name(), Some("contact"));
    assert_eq!(controller.form_values(), &json!({}));
}

#[test]
fn boundary_predicates_follow_declaration_order() {
    let schema = MultiStepFormSchema::builder()
        .step("newsletter", |b| b.add("subscribe", FieldConfig::new()))
        .step("general", |b| b.add("name", FieldConfig::new()))
        .build()
        .expect("schema");

    let mut controller =
        StepFormController::new("reordered", schema, InMemoryStorage::new(), FieldFormFactory::new());
    controller.initialize().expect("initialize");

    assert_eq!(controller.current_step_name(), Some("newsletter"));
    assert!(controller.is_first());
    controller.next(&json!({"subscribe": true})).expect("next");
    assert!(controller.is_last());
    assert_eq!(controller.current_step_name(), Some("general"));
}

#[test]
fn session_storage_backend_end_to_end() {
    struct RegistrationWizard;

    let mut controller = StepFormController::new(component_key_for::<RegistrationWizard>(),
                                                 signup_schema(),
                                                 SessionStorage::new(),
                                                 FieldFormFactory::new());
    controller.initialize().expect("initialize");
    controller.next(&json!({"name": "A"})).expect("next");

    assert_eq!(controller.component_key(), "registration_wizard");
    let entry = controller.storage()
                          .entry("registration_wizard_form_values_general")
                          .expect("persisted entry");
    assert_eq!(entry.value, json!({"name": "A"}));
}
