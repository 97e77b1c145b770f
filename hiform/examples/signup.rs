//! Signup form demo.
//!
//! Builds a small form, drives it with simulated user input and prints every
//! publication as JSON. Debug logs go to `signup.log`.

use std::error::Error;
use std::fs::File;

use formdom::{interact, FocusState};
use hiform::prelude::*;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// ============================================================================
// Form
// ============================================================================

fn build_form() -> Node {
    Node::form()
        .id("signup")
        .child(Node::input(InputType::Email).id("email").name("email"))
        .child(Node::input(InputType::Password).id("password").name("password"))
        .child(
            Node::group()
                .child(Node::radio().name("plan").value("free").checked(true))
                .child(Node::radio().id("plan-pro").name("plan").value("pro")),
        )
        .child(Node::checkbox().id("terms").name("terms"))
        .child(Node::submit_input().value("Create account"))
}

fn options() -> Result<HiFormParams, Box<dyn Error>> {
    let options_json = r#"{
        "email": { "validateDirtyOnly": false },
        "password": { "validateOn": "input", "emitOn": ["input", "blur"] }
    }"#;
    let mut field_options: FieldOptionsMap = serde_json::from_str(options_json)?;

    let email_options = field_options.remove("email").unwrap_or_default();
    field_options.insert(
        "email".to_string(),
        email_options.validator(required()).validator(email()),
    );

    let password_options = field_options.remove("password").unwrap_or_default();
    field_options.insert(
        "password".to_string(),
        password_options
            .validator(min_length(8))
            .validator(try_pattern(r"\d")?.message("Password needs a digit")),
    );

    field_options.insert(
        "terms".to_string(),
        FieldOptions::new().validator(required().message("Please accept the terms")),
    );

    Ok(HiFormParams::default().field_options(field_options))
}

// ============================================================================
// Main
// ============================================================================

fn run() -> Result<(), Box<dyn Error>> {
    let form = build_form();
    let mut session = HiForm::new(HiFormParams {
        form: Some(form.clone()),
        ..options()?
    })?;

    session.subscribe(|event| match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize event: {}", e),
    });

    let find = |id: &str| formdom::find_by_id(&form, id);
    let mut focus = FocusState::new();

    // Leave the email empty: validates on blur
    focus.focus_next(&form);
    focus.focus_next(&form);

    if let Some(password) = find("password") {
        interact::type_text(&password, "hunter");
        interact::type_text(&password, "hunter22");
    }
    focus.blur();

    if let Some(pro) = find("plan-pro") {
        interact::choose(&form, &pro);
    }

    session.request_submit();

    let result = session.validate_form();
    for error in result.errors() {
        println!("{}: {}", error.field_name, error.messages.join(", "));
    }

    if let Some(email) = find("email") {
        interact::commit(&email, "ada@example.com");
    }
    if let Some(terms) = find("terms") {
        interact::toggle(&terms);
    }
    session.request_submit();

    session.unsubscribe();
    session.finish()?;
    Ok(())
}

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("signup.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}
