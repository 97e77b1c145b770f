//! Listener wiring between host controls and the form store.
//!
//! Each control gets exactly three listeners: the change-class event chosen
//! by its `validate_on` option, `focus` and `blur`. The form element gets a
//! single `submit` listener. Everything attached is recorded so teardown
//! removes exactly the same registrations.

use std::sync::Arc;

use formdom::{Event, EventKind, InputType, Listener, Node};
use log::{debug, trace};

use crate::channel::Publisher;
use crate::error::{HiFormError, HiFormResult};
use crate::options::{ResolvedFieldOptions, ResolvedTable};
use crate::state::{FieldValue, FormStore};
use crate::validation::apply_field_validation;

/// Everything a field's handlers need.
#[derive(Debug, Clone)]
pub struct FieldContext {
    pub name: String,
    pub store: FormStore,
    pub options: Arc<ResolvedFieldOptions>,
    pub publisher: Publisher,
}

impl FieldContext {
    /// Focus: mark the field focused. Never validates.
    pub fn on_focus(&self, _event: &Event) {
        trace!("focus '{}'", self.name);
        self.store.update_field(&self.name, |field| field.is_focused = true);
        self.emit(EventKind::Focus);
    }

    /// Blur: clear focus. The first blur marks the field touched and, when
    /// `validate_dirty_only` is off, validates it.
    pub fn on_blur(&self, event: &Event) {
        trace!("blur '{}'", self.name);
        let first_blur = self
            .store
            .update_field(&self.name, |field| {
                field.is_focused = false;
                let first = !field.is_touched;
                field.is_touched = true;
                first
            })
            .unwrap_or(false);

        if first_blur && !self.options.validate_dirty_only {
            apply_field_validation(event.target(), &self.name, &self.store, &self.options);
        }
        self.emit(EventKind::Blur);
    }

    /// Change-class event: sync the value from the control, validate, mark
    /// dirty and publish under the event that fired.
    pub fn on_change(&self, event: &Event) {
        let target = event.target();
        trace!("{} '{}'", event.kind(), self.name);

        self.store.update_field(&self.name, |field| match target.input_type() {
            Some(InputType::Checkbox) => {
                let checked = target.is_checked();
                field.value = FieldValue::Bool(checked);
                field.checked = Some(checked);
            }
            Some(InputType::Radio) => {
                if target.is_checked() {
                    field.value = FieldValue::Text(target.get_value());
                }
            }
            _ => field.value = FieldValue::Text(target.get_value()),
        });

        apply_field_validation(target, &self.name, &self.store, &self.options);
        self.store.update_field(&self.name, |field| field.is_dirty = true);
        self.emit(event.kind());
    }

    fn emit(&self, kind: EventKind) {
        if self.options.emits(kind) {
            self.publisher.publish(kind, &self.store);
        }
    }
}

/// Handler for the form's submit event.
#[derive(Debug, Clone)]
pub struct SubmitContext {
    pub store: FormStore,
    pub publisher: Publisher,
}

impl SubmitContext {
    /// Prevent native submission and publish the accumulated state. Fields
    /// are not revalidated; each one validated itself as it changed.
    pub fn on_submit(&self, event: &Event) {
        event.prevent_default();
        trace!("submit");
        self.publisher.publish(EventKind::Submit, &self.store);
    }
}

fn bind<C: Send + Sync + 'static>(context: &Arc<C>, handler: fn(&C, &Event)) -> Listener {
    let context = Arc::clone(context);
    Arc::new(move |event: &Event| handler(&context, event))
}

/// Listeners attached to one control.
#[derive(Clone)]
pub struct ListenerEntry {
    pub control: Node,
    pub field: String,
    /// Event the change handler was registered under.
    pub change_event: EventKind,
    change: Listener,
    focus: Listener,
    blur: Listener,
    attached: bool,
}

impl ListenerEntry {
    fn registrations(&self) -> [(EventKind, &Listener); 3] {
        [
            (self.change_event, &self.change),
            (EventKind::Focus, &self.focus),
            (EventKind::Blur, &self.blur),
        ]
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl std::fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("control", &self.control.get_id())
            .field("field", &self.field)
            .field("change_event", &self.change_event)
            .field("attached", &self.attached)
            .finish()
    }
}

/// Per-control record of attached listeners.
#[derive(Debug, Clone, Default)]
pub struct ListenerTable {
    entries: Vec<ListenerEntry>,
}

impl ListenerTable {
    /// The entry recorded for `control`.
    pub fn get(&self, control: &Node) -> Option<&ListenerEntry> {
        self.entries.iter().find(|e| e.control.same_node(control))
    }

    fn position(&self, control: &Node) -> Option<usize> {
        self.entries.iter().position(|e| e.control.same_node(control))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListenerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of controls whose listeners are still attached.
    pub fn attached_count(&self) -> usize {
        self.entries.iter().filter(|e| e.attached).count()
    }
}

/// Attach change, focus and blur listeners to every control.
///
/// Radios sharing a name each get their own listeners, all bound to the
/// same field. Controls whose name has no resolved options use the
/// defaults.
pub fn attach_fields(
    controls: &[Node],
    store: &FormStore,
    resolved: &ResolvedTable,
    publisher: &Publisher,
) -> ListenerTable {
    let mut table = ListenerTable::default();

    for control in controls {
        let name = control.get_name();
        let options = resolved
            .get(&name)
            .cloned()
            .unwrap_or_else(|| Arc::new(crate::options::resolve(None, None)));
        let change_event = options.change_event();

        let context = Arc::new(FieldContext {
            name: name.clone(),
            store: store.clone(),
            options,
            publisher: publisher.clone(),
        });
        let entry = ListenerEntry {
            control: control.clone(),
            field: name,
            change_event,
            change: bind(&context, FieldContext::on_change),
            focus: bind(&context, FieldContext::on_focus),
            blur: bind(&context, FieldContext::on_blur),
            attached: true,
        };
        for (kind, listener) in entry.registrations() {
            control.add_event_listener(kind, Arc::clone(listener));
        }
        table.entries.push(entry);
    }

    debug!("Attached listeners to {} controls", table.len());
    table
}

/// Remove the listeners [`attach_fields`] recorded for `controls`.
///
/// Every control must have an entry in `table`; otherwise nothing is
/// detached and [`HiFormError::ListenerContract`] is returned. Detaching a
/// control twice is a no-op.
pub fn detach_fields(controls: &[Node], table: &mut ListenerTable) -> HiFormResult<()> {
    let mut positions = Vec::with_capacity(controls.len());
    for control in controls {
        let position = table
            .position(control)
            .ok_or_else(|| HiFormError::listener_contract(control.get_name()))?;
        positions.push(position);
    }

    for position in positions {
        let entry = &mut table.entries[position];
        if !entry.attached {
            continue;
        }
        for (kind, listener) in entry.registrations() {
            entry.control.remove_event_listener(kind, listener);
        }
        entry.attached = false;
    }

    debug!("Detached listeners, {} controls still attached", table.attached_count());
    Ok(())
}

/// The submit listener attached to a form.
#[derive(Clone)]
pub struct SubmitBinding {
    form: Node,
    listener: Listener,
}

impl SubmitBinding {
    pub fn form(&self) -> &Node {
        &self.form
    }
}

impl std::fmt::Debug for SubmitBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitBinding")
            .field("form", &self.form.get_id())
            .finish_non_exhaustive()
    }
}

/// Attach the submit listener to `form`.
pub fn attach_submit(form: &Node, store: &FormStore, publisher: &Publisher) -> SubmitBinding {
    let context = Arc::new(SubmitContext {
        store: store.clone(),
        publisher: publisher.clone(),
    });
    let listener = bind(&context, SubmitContext::on_submit);
    form.add_event_listener(EventKind::Submit, Arc::clone(&listener));
    SubmitBinding {
        form: form.clone(),
        listener,
    }
}

/// Remove a submit listener. Returns false if it was already removed.
pub fn detach_submit(binding: &SubmitBinding) -> bool {
    binding
        .form
        .remove_event_listener(EventKind::Submit, &binding.listener)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use formdom::interact;

    use super::*;
    use crate::channel::Hub;
    use crate::data::create_form_data;
    use crate::event::FormEvent;
    use crate::options::{resolve_fields, FieldOptions, FieldOptionsMap, ValidateOn};
    use crate::validation::required;

    struct Fixture {
        controls: Vec<Node>,
        store: FormStore,
        publisher: Publisher,
        published: Arc<Mutex<Vec<FormEvent>>>,
        table: ListenerTable,
    }

    fn fixture(controls: Vec<Node>, fields: FieldOptionsMap) -> Fixture {
        let names: Vec<String> = controls.iter().map(Node::get_name).collect();
        let resolved = resolve_fields(names.iter().map(String::as_str), None, &fields);
        let store = FormStore::new(create_form_data(&controls, &resolved));
        let hub = Hub::new();
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&published);
        hub.channel()
            .subscribe(move |e: &FormEvent| sink.lock().unwrap().push(e.clone()));
        let publisher = Publisher::new(hub);
        let table = attach_fields(&controls, &store, &resolved, &publisher);
        Fixture {
            controls,
            store,
            publisher,
            published,
            table,
        }
    }

    fn events(fixture: &Fixture) -> Vec<EventKind> {
        fixture.published.lock().unwrap().iter().map(|e| e.event).collect()
    }

    // =========================================================================
    // Attach / detach
    // =========================================================================

    #[test]
    fn test_attach_registers_three_listeners_per_control() {
        let f = fixture(
            vec![Node::text_input().name("a"), Node::checkbox().name("b")],
            FieldOptionsMap::new(),
        );

        for control in &f.controls {
            assert_eq!(control.total_listener_count(), 3);
            assert_eq!(control.listener_count(EventKind::Change), 1);
            assert_eq!(control.listener_count(EventKind::Focus), 1);
            assert_eq!(control.listener_count(EventKind::Blur), 1);
        }
        assert_eq!(f.table.len(), 2);
    }

    #[test]
    fn test_detach_honours_validate_on_override() {
        let mut fields = FieldOptionsMap::new();
        fields.insert(
            "a".to_string(),
            FieldOptions::new().validate_on(ValidateOn::Input),
        );
        let mut f = fixture(vec![Node::text_input().name("a")], fields);
        let control = f.controls[0].clone();

        assert_eq!(control.listener_count(EventKind::Input), 1);
        assert_eq!(control.listener_count(EventKind::Change), 0);
        assert_eq!(f.table.get(&control).unwrap().change_event, EventKind::Input);

        detach_fields(&f.controls, &mut f.table).unwrap();

        assert_eq!(control.total_listener_count(), 0);
    }

    #[test]
    fn test_detach_twice_is_noop() {
        let mut f = fixture(vec![Node::text_input().name("a")], FieldOptionsMap::new());

        detach_fields(&f.controls, &mut f.table).unwrap();
        detach_fields(&f.controls, &mut f.table).unwrap();

        assert_eq!(f.controls[0].total_listener_count(), 0);
        assert_eq!(f.table.attached_count(), 0);
    }

    #[test]
    fn test_detach_unknown_control_is_contract_error() {
        let mut f = fixture(vec![Node::text_input().name("a")], FieldOptionsMap::new());
        let stranger = Node::text_input().name("stranger");
        let controls = vec![f.controls[0].clone(), stranger];

        let err = detach_fields(&controls, &mut f.table).unwrap_err();

        assert!(matches!(err, HiFormError::ListenerContract { ref field } if field == "stranger"));
        // Nothing detached
        assert_eq!(f.controls[0].total_listener_count(), 3);
    }

    #[test]
    fn test_radios_get_own_listeners() {
        let mut f = fixture(
            vec![
                Node::radio().name("color").value("red"),
                Node::radio().name("color").value("blue"),
            ],
            FieldOptionsMap::new(),
        );

        assert_eq!(f.table.len(), 2);
        assert_eq!(f.store.len(), 1);

        detach_fields(&f.controls, &mut f.table).unwrap();
        for control in &f.controls {
            assert_eq!(control.total_listener_count(), 0);
        }
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    #[test]
    fn test_focus_then_blur() {
        let f = fixture(vec![Node::text_input().name("a")], FieldOptionsMap::new());
        let control = &f.controls[0];

        control.dispatch(EventKind::Focus);
        assert!(f.store.field("a").unwrap().is_focused);

        control.dispatch(EventKind::Blur);
        let state = f.store.field("a").unwrap();
        assert!(!state.is_focused);
        assert!(state.is_touched);
        // validate_dirty_only defaults to true
        assert!(state.errors.is_empty());
        assert_eq!(events(&f), vec![EventKind::Focus, EventKind::Blur]);
    }

    #[test]
    fn test_second_blur_does_not_validate() {
        let mut fields = FieldOptionsMap::new();
        fields.insert(
            "a".to_string(),
            FieldOptions::new()
                .validator(required())
                .validate_dirty_only(false),
        );
        let f = fixture(vec![Node::text_input().name("a")], fields);
        let control = &f.controls[0];

        control.dispatch(EventKind::Blur);
        assert_eq!(f.store.field("a").unwrap().errors, vec!["a field is required."]);

        f.store.update_field("a", |s| s.errors.clear());
        control.dispatch(EventKind::Blur);
        assert!(f.store.field("a").unwrap().errors.is_empty());
    }

    #[test]
    fn test_checkbox_change() {
        let f = fixture(vec![Node::checkbox().name("terms")], FieldOptionsMap::new());

        interact::toggle(&f.controls[0]);

        let state = f.store.field("terms").unwrap();
        assert_eq!(state.value, FieldValue::Bool(true));
        assert_eq!(state.checked, Some(true));
        assert!(state.is_dirty);
        assert!(state.is_valid);
    }

    #[test]
    fn test_radio_change_takes_checked_value() {
        let form = Node::form()
            .child(Node::radio().name("color").value("red").checked(true))
            .child(Node::radio().name("color").value("blue"));
        let controls = form.child_nodes();
        let f = fixture(controls, FieldOptionsMap::new());

        interact::choose(&form, &f.controls[1]);

        assert_eq!(f.store.field("color").unwrap().value, FieldValue::from("blue"));
        assert!(!f.controls[0].is_checked());
    }

    #[test]
    fn test_input_override_publishes_input() {
        let mut fields = FieldOptionsMap::new();
        fields.insert(
            "a".to_string(),
            FieldOptions::new().validate_on(ValidateOn::Input),
        );
        let f = fixture(vec![Node::text_input().name("a")], fields);

        interact::type_text(&f.controls[0], "x");
        // Native change is not listened to
        f.controls[0].dispatch(EventKind::Change);

        assert_eq!(events(&f), vec![EventKind::Input]);
        assert_eq!(f.store.field("a").unwrap().value, FieldValue::from("x"));
    }

    #[test]
    fn test_submit_prevents_default_and_publishes() {
        let form = Node::form().child(Node::text_input().name("a"));
        let f = fixture(form.child_nodes(), FieldOptionsMap::new());
        let binding = attach_submit(&form, &f.store, &f.publisher);

        assert!(!interact::submit(&form));
        let last = f.published.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last.event, EventKind::Submit);
        assert!(!last.form_state.is_valid);

        assert!(detach_submit(&binding));
        assert!(!detach_submit(&binding));
        assert!(interact::submit(&form));
    }
}
