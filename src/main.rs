//! Walkthrough of a three-step signup wizard.
//!
//! Drives a `StepFormController` over the field form engine and a session
//! storage backend, the way a hosting component framework would across user
//! round trips. Run with `RUST_LOG=debug` to see the transition log.

use indexmap::IndexMap;
use serde_json::{json, Value};

use formflow_adapters::{FieldFormFactory, SessionStorage};
use formflow_core::{FieldConfig, FormFlowError, MultiStepFormSchema, StepFormController};

fn signup_schema() -> Result<MultiStepFormSchema, FormFlowError> {
    MultiStepFormSchema::builder()
        .step("general", |b| {
            b.add("name", FieldConfig::new().required().labeled("Full name"));
            b.add("company", FieldConfig::new().with_default(json!("ACME")));
        })
        .step("contact", |b| {
            b.add("email", FieldConfig::new().required().labeled("E-mail address"));
        })
        .step("newsletter", |b| {
            b.add("subscribe", FieldConfig::new().with_default(json!(false)));
        })
        .build()
}

fn print_position(controller: &StepFormController<SessionStorage, FieldFormFactory>) {
    println!("step: {} (first: {}, last: {})",
             controller.current_step_name().unwrap_or("<none>"),
             controller.is_first(),
             controller.is_last());
    println!("  values: {}", controller.form_values());
}

fn main() -> Result<(), FormFlowError> {
    env_logger::init();

    let mut controller = StepFormController::new("signup_wizard",
                                                 signup_schema()?,
                                                 SessionStorage::new(),
                                                 FieldFormFactory::new())
        .with_on_submit(|all: &IndexMap<String, Value>| {
            println!("-- business action with {} steps of data --", all.len());
            for (step, data) in all {
                println!("   {step}: {data}");
            }
        });

    controller.initialize()?;
    print_position(&controller);

    // An invalid round trip: `name` is required.
    controller.next(&json!({}))?;
    println!("validation errors: {}", controller.has_validation_errors());

    controller.next(&json!({"name": "Ada Lovelace"}))?;
    print_position(&controller);

    controller.next(&json!({"email": "ada@example.org"}))?;
    print_position(&controller);

    // Step back and forth before the final submission.
    controller.previous()?;
    print_position(&controller);
    controller.next(&json!({"email": "ada@example.org"}))?;

    controller.submit(&json!({"subscribe": true}))?;
    println!("all data: {:?}", controller.get_all_data());

    controller.reset_form()?;
    print_position(&controller);

    Ok(())
}
