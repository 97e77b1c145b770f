use std::sync::{Arc, Mutex};

use formdom::{interact, FocusState};
use hiform::prelude::*;

type Published = Arc<Mutex<Vec<FormEvent>>>;

fn signup_form() -> Node {
    Node::form()
        .id("signup")
        .child(Node::input(InputType::Email).name("email"))
        .child(Node::text_input().name("name").value("Ada"))
        .child(Node::checkbox().name("terms"))
        .child(Node::submit_input().value("Send"))
}

fn email_options() -> FieldOptions {
    FieldOptions::new()
        .validator(required())
        .validator(min_length(5))
        .validate_dirty_only(false)
}

fn record(session: &mut HiForm) -> Published {
    let published = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&published);
    session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    published
}

fn control(session: &HiForm, name: &str) -> Node {
    session
        .controls()
        .iter()
        .find(|c| c.get_name() == name)
        .cloned()
        .unwrap()
}

fn kinds(published: &Published) -> Vec<EventKind> {
    published.lock().unwrap().iter().map(|e| e.event).collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_missing_form_is_rejected() {
    let err = HiForm::new(HiFormParams::default()).unwrap_err();

    assert!(matches!(err, HiFormError::InvalidContainer));
    assert_eq!(err.to_string(), "Please provide a valid <form> element.");
}

#[test]
fn test_initial_state() {
    let session = HiForm::new(HiFormParams::new(signup_form())).unwrap();
    let data = session.value();

    assert_eq!(session.field_count(), 3);
    assert_eq!(data.names().collect::<Vec<_>>(), vec!["email", "name", "terms"]);
    for (_, field) in data.iter() {
        assert!(!field.is_dirty);
        assert!(!field.is_touched);
        assert!(!field.is_focused);
        assert!(!field.is_valid);
        assert!(field.errors.is_empty());
    }
    assert_eq!(data.get("name").unwrap().value, FieldValue::from("Ada"));
    assert_eq!(data.get("terms").unwrap().value, FieldValue::Bool(false));
    assert_eq!(data.get("email").unwrap().input_kind, Some(InputType::Email));
}

#[test]
fn test_initial_overrides() {
    let session = HiForm::new(
        HiFormParams::new(signup_form())
            .global_options(FieldOptions::new().initially_touched(true))
            .field("name", FieldOptions::new().initially_valid(true).initially_dirty(true)),
    )
    .unwrap();
    let data = session.value();

    let name = data.get("name").unwrap();
    assert!(name.is_valid && name.is_dirty && name.is_touched);
    assert!(!name.is_focused);
    let email = data.get("email").unwrap();
    assert!(email.is_touched && !email.is_valid && !email.is_dirty);
}

#[test]
fn test_radio_group_resolves_checked_value() {
    let form = Node::form()
        .child(Node::radio().name("plan").value("free"))
        .child(Node::radio().name("plan").value("pro").checked(true))
        .child(Node::radio().name("plan").value("team"));

    let session = HiForm::new(HiFormParams::new(form)).unwrap();

    assert_eq!(session.field_count(), 1);
    assert_eq!(session.value().get("plan").unwrap().value, FieldValue::from("pro"));
}

#[test]
fn test_value_is_idempotent() {
    let session = HiForm::new(HiFormParams::new(signup_form())).unwrap();

    assert_eq!(session.value(), session.value());
}

// ============================================================================
// Email scenarios
// ============================================================================

#[test]
fn test_blur_without_input_validates_when_not_dirty_only() {
    let session =
        HiForm::new(HiFormParams::new(signup_form()).field("email", email_options())).unwrap();
    let email = control(&session, "email");

    email.dispatch(EventKind::Blur);

    let state = session.value().get("email").cloned().unwrap();
    assert!(state.is_touched);
    assert!(!state.is_valid);
    assert_eq!(state.errors, vec!["email field is required."]);
    assert_eq!(email.attribute("aria-invalid").as_deref(), Some("true"));
}

#[test]
fn test_short_value_fails_min_length() {
    let session =
        HiForm::new(HiFormParams::new(signup_form()).field("email", email_options())).unwrap();
    let email = control(&session, "email");

    interact::commit(&email, "ab");

    let state = session.value().get("email").cloned().unwrap();
    assert!(state.is_dirty);
    assert!(!state.is_valid);
    assert_eq!(
        state.errors,
        vec!["email field needs to contain at least 5 characters."]
    );
}

#[test]
fn test_long_enough_value_is_valid() {
    let session =
        HiForm::new(HiFormParams::new(signup_form()).field("email", email_options())).unwrap();
    let email = control(&session, "email");

    interact::commit(&email, "ab");
    interact::commit(&email, "abcdef");

    let state = session.value().get("email").cloned().unwrap();
    assert!(state.is_valid);
    assert!(state.errors.is_empty());
    assert_eq!(email.attribute("aria-invalid").as_deref(), Some("false"));
}

#[test]
fn test_blur_skips_validation_by_default() {
    let session = HiForm::new(
        HiFormParams::new(signup_form()).field("email", FieldOptions::new().validator(required())),
    )
    .unwrap();

    control(&session, "email").dispatch(EventKind::Blur);

    let state = session.value().get("email").cloned().unwrap();
    assert!(state.is_touched);
    assert!(state.errors.is_empty());
}

#[test]
fn test_validity_matches_errors() {
    let session = HiForm::new(
        HiFormParams::new(signup_form())
            .field("email", email_options().validator(email()))
            .field("name", FieldOptions::new().validator(max_length(3))),
    )
    .unwrap();

    interact::commit(&control(&session, "email"), "nope");
    interact::commit(&control(&session, "name"), "Grace");

    for (_, field) in session.value().iter().filter(|(_, f)| f.is_dirty) {
        assert_eq!(field.is_valid, field.errors.is_empty());
    }
    assert_eq!(
        session.value().get("email").unwrap().errors,
        vec![
            "email field needs to contain at least 5 characters.",
            "email field must be a valid email address.",
        ]
    );
}

// ============================================================================
// Publication
// ============================================================================

#[test]
fn test_focus_change_blur_sequence() {
    let form = signup_form();
    let mut session = HiForm::new(HiFormParams::new(form.clone())).unwrap();
    let published = record(&mut session);
    let mut focus = FocusState::new();

    focus.focus_next(&form);
    interact::commit(&control(&session, "email"), "a@b.co");
    focus.focus_next(&form);

    assert_eq!(
        kinds(&published),
        vec![
            EventKind::Focus,
            EventKind::Change,
            EventKind::Blur,
            EventKind::Focus
        ]
    );
    let last = published.lock().unwrap().last().cloned().unwrap();
    assert!(last.form_data.get("name").unwrap().is_focused);
    assert!(!last.form_data.get("email").unwrap().is_focused);
}

#[test]
fn test_emit_on_blur_only() {
    let mut session = HiForm::new(
        HiFormParams::new(signup_form()).field("email", FieldOptions::new().emit_on([EventKind::Blur])),
    )
    .unwrap();
    let published = record(&mut session);
    let email = control(&session, "email");

    interact::commit(&email, "abc");
    assert!(published.lock().unwrap().is_empty());
    assert!(session.value().get("email").unwrap().is_dirty);

    email.dispatch(EventKind::Blur);
    assert_eq!(kinds(&published), vec![EventKind::Blur]);
}

#[test]
fn test_validate_on_input_publishes_input() {
    let mut session = HiForm::new(
        HiFormParams::new(signup_form())
            .field("email", FieldOptions::new().validate_on(ValidateOn::Input)),
    )
    .unwrap();
    let published = record(&mut session);

    interact::commit(&control(&session, "email"), "abc");

    assert_eq!(kinds(&published), vec![EventKind::Input]);
}

#[test]
fn test_late_subscriber_gets_latest() {
    let mut session = HiForm::new(HiFormParams::new(signup_form())).unwrap();
    let email = control(&session, "email");

    email.dispatch(EventKind::Focus);
    email.dispatch(EventKind::Blur);
    let published = record(&mut session);

    assert_eq!(kinds(&published), vec![EventKind::Blur]);
}

#[test]
fn test_submit_reports_form_validity() {
    let form = signup_form();
    let mut session = HiForm::new(
        HiFormParams::new(form.clone())
            .field("email", email_options())
            .field("name", FieldOptions::new().initially_valid(true))
            .field("terms", FieldOptions::new().initially_valid(true)),
    )
    .unwrap();
    let published = record(&mut session);

    interact::commit(&control(&session, "email"), "ab");
    assert!(!interact::submit(&form));
    let last = published.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.event, EventKind::Submit);
    assert!(!last.form_state.is_valid);

    interact::commit(&control(&session, "email"), "abcdef");
    session.request_submit();
    let last = published.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.event, EventKind::Submit);
    assert!(last.form_state.is_valid);
}

#[test]
fn test_submit_ignores_emit_filter() {
    let form = signup_form();
    let mut session = HiForm::new(
        HiFormParams::new(form.clone())
            .global_options(FieldOptions::new().emit_on([EventKind::Focus])),
    )
    .unwrap();
    let published = record(&mut session);

    interact::submit(&form);

    assert_eq!(kinds(&published), vec![EventKind::Submit]);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_finish_removes_all_listeners() {
    let form = signup_form();
    let mut session = HiForm::new(
        HiFormParams::new(form.clone())
            .field("email", FieldOptions::new().validate_on(ValidateOn::Input)),
    )
    .unwrap();
    assert!(session.controls().iter().all(|c| c.total_listener_count() == 3));
    assert_eq!(form.listener_count(EventKind::Submit), 1);

    session.finish().unwrap();
    session.finish().unwrap();

    assert!(session.is_finished());
    assert!(session.controls().iter().all(|c| c.total_listener_count() == 0));
    assert_eq!(form.listener_count(EventKind::Submit), 0);
}

#[test]
fn test_finished_session_never_publishes() {
    let form = signup_form();
    let mut session = HiForm::new(HiFormParams::new(form.clone())).unwrap();
    let published = record(&mut session);
    let store = session.store();

    session.finish().unwrap();
    interact::commit(&control(&session, "email"), "abc");
    session.request_submit();
    assert!(interact::submit(&form));

    assert!(published.lock().unwrap().is_empty());
    assert!(!store.field("email").unwrap().is_dirty);
}

#[test]
fn test_unsubscribe_keeps_other_sessions() {
    let hub = Hub::new();
    let mut first = HiForm::new(HiFormParams::new(signup_form()).hub(hub.clone())).unwrap();
    let mut second = HiForm::new(HiFormParams::new(signup_form()).hub(hub.clone())).unwrap();
    let first_seen = record(&mut first);
    let second_seen = record(&mut second);

    first.unsubscribe();
    control(&second, "email").dispatch(EventKind::Focus);

    assert!(first_seen.lock().unwrap().is_empty());
    assert_eq!(kinds(&second_seen), vec![EventKind::Focus]);
    assert!(!hub.channel().is_closed());
}

#[test]
fn test_last_unsubscribe_recreates_channel() {
    let hub = Hub::new();
    let mut first = HiForm::new(HiFormParams::new(signup_form()).hub(hub.clone())).unwrap();
    let first_seen = record(&mut first);
    control(&first, "email").dispatch(EventKind::Focus);

    first.unsubscribe();
    first.finish().unwrap();

    let mut second = HiForm::new(HiFormParams::new(signup_form()).hub(hub.clone())).unwrap();
    let second_seen = record(&mut second);
    // Fresh channel: nothing replayed from the previous session
    assert!(second_seen.lock().unwrap().is_empty());

    control(&second, "email").dispatch(EventKind::Focus);
    assert_eq!(kinds(&second_seen), vec![EventKind::Focus]);
    assert_eq!(kinds(&first_seen), vec![EventKind::Focus]);
}

#[test]
fn test_unsubscribe_does_not_cut_off_sibling_session() {
    let hub = Hub::new();
    let mut first = HiForm::new(HiFormParams::new(signup_form()).hub(hub.clone())).unwrap();
    let mut second = HiForm::new(HiFormParams::new(signup_form()).hub(hub.clone())).unwrap();
    record(&mut first);

    // Second session has no subscribers yet, so the channel closes here
    first.unsubscribe();
    let second_seen = record(&mut second);
    control(&second, "email").dispatch(EventKind::Focus);

    assert_eq!(kinds(&second_seen), vec![EventKind::Focus]);
}

#[test]
fn test_resubscribe_after_unsubscribe() {
    let mut session = HiForm::new(HiFormParams::new(signup_form())).unwrap();
    let before = record(&mut session);

    session.unsubscribe();
    let after = record(&mut session);
    control(&session, "email").dispatch(EventKind::Focus);

    assert!(before.lock().unwrap().is_empty());
    assert_eq!(kinds(&after), vec![EventKind::Focus]);
}

// ============================================================================
// Programmatic validation
// ============================================================================

#[test]
fn test_validate_form_without_publishing() {
    let mut session = HiForm::new(
        HiFormParams::new(signup_form())
            .field("email", email_options())
            .field("terms", FieldOptions::new().validator(required().message("Accept the terms"))),
    )
    .unwrap();
    let published = record(&mut session);

    let result = session.validate_form();

    assert!(result.is_invalid());
    assert_eq!(result.first_invalid_field(), Some("email"));
    let messages: Vec<(&str, Vec<String>)> = result
        .errors()
        .iter()
        .map(|e| (e.field_name.as_str(), e.messages.clone()))
        .collect();
    assert_eq!(
        messages,
        vec![
            ("email", vec!["email field is required.".to_string()]),
            ("terms", vec!["Accept the terms".to_string()]),
        ]
    );
    assert!(session.value().get("name").unwrap().is_valid);
    assert!(published.lock().unwrap().is_empty());

    interact::commit(&control(&session, "email"), "abcdef");
    interact::toggle(&control(&session, "terms"));
    assert!(session.validate_form().is_valid());
}
