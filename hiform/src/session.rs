use formdom::{EventKind, Node};
use log::{debug, warn};

use crate::channel::{FormChannel, Hub, Publisher, SubscriptionId};
use crate::data::create_form_data;
use crate::error::{HiFormError, HiFormResult};
use crate::event::FormEvent;
use crate::fields::enumerate;
use crate::listeners::{
    attach_fields, attach_submit, detach_fields, detach_submit, ListenerTable, SubmitBinding,
};
use crate::options::{
    resolve_fields, FieldOptions, FieldOptionsMap, ResolvedFieldOptions, ResolvedTable,
};
use crate::state::{FormData, FormStore};
use crate::validation::{apply_field_validation, FieldError, ValidationResult};

/// Parameters for [`HiForm::new`].
///
/// # Example
///
/// ```ignore
/// let params = HiFormParams::new(form)
///     .global_options(FieldOptions::new().validate_dirty_only(false))
///     .field("email", FieldOptions::new().validator(required()).validator(email()));
/// ```
#[derive(Debug, Default)]
pub struct HiFormParams {
    /// The form element. `None` fails construction.
    pub form: Option<Node>,
    /// Options applied to every field.
    pub global_options: Option<FieldOptions>,
    /// Options per field name, layered over the global options.
    pub field_options: FieldOptionsMap,
    /// Where the session's channel comes from.
    pub hub: Hub,
}

impl HiFormParams {
    pub fn new(form: Node) -> Self {
        Self {
            form: Some(form),
            ..Default::default()
        }
    }

    pub fn global_options(mut self, options: FieldOptions) -> Self {
        self.global_options = Some(options);
        self
    }

    /// Set the options of one field, replacing earlier ones for that name.
    pub fn field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.field_options.insert(name.into(), options);
        self
    }

    pub fn field_options(mut self, options: FieldOptionsMap) -> Self {
        self.field_options = options;
        self
    }

    pub fn hub(mut self, hub: Hub) -> Self {
        self.hub = hub;
        self
    }
}

/// A live form session.
///
/// Construction reads every control of the form, builds the initial state
/// and attaches listeners; from then on host events update the state and
/// publish [`FormEvent`]s until [`HiForm::finish`] is called.
#[derive(Debug)]
pub struct HiForm {
    form: Node,
    controls: Vec<Node>,
    store: FormStore,
    resolved: ResolvedTable,
    publisher: Publisher,
    listeners: ListenerTable,
    submit: SubmitBinding,
    subscriptions: Vec<(FormChannel, SubscriptionId)>,
    finished: bool,
}

impl HiForm {
    /// Start a session on `params.form`.
    ///
    /// Fails with [`HiFormError::InvalidContainer`] when no form is given.
    pub fn new(params: HiFormParams) -> HiFormResult<Self> {
        let HiFormParams {
            form,
            global_options,
            field_options,
            hub,
        } = params;
        let form = form.ok_or(HiFormError::InvalidContainer)?;

        let controls = enumerate(Some(&form))?;
        let names: Vec<String> = controls.iter().map(Node::get_name).collect();
        let resolved = resolve_fields(
            names.iter().map(String::as_str),
            global_options.as_ref(),
            &field_options,
        );
        let store = FormStore::new(create_form_data(&controls, &resolved));
        let publisher = Publisher::new(hub);

        let listeners = attach_fields(&controls, &store, &resolved, &publisher);
        let submit = attach_submit(&form, &store, &publisher);

        debug!(
            "Started form session on {} with {} fields ({} controls)",
            form.get_id(),
            store.len(),
            controls.len()
        );

        Ok(Self {
            form,
            controls,
            store,
            resolved,
            publisher,
            listeners,
            submit,
            subscriptions: Vec::new(),
            finished: false,
        })
    }

    /// Point-in-time copy of every field's state.
    pub fn value(&self) -> FormData {
        self.store.snapshot()
    }

    /// Live handle to the session's state.
    pub fn store(&self) -> FormStore {
        self.store.clone()
    }

    pub fn form(&self) -> &Node {
        &self.form
    }

    /// The controls the session is bound to, in document order.
    pub fn controls(&self) -> &[Node] {
        &self.controls
    }

    pub fn field_count(&self) -> usize {
        self.store.len()
    }

    /// Resolved options of a field.
    pub fn options(&self, name: &str) -> Option<&ResolvedFieldOptions> {
        self.resolved.get(name).map(|options| &**options)
    }

    /// Receive every publication on the hub's live channel, starting with
    /// the latest one if anything was published already.
    pub fn subscribe(&mut self, f: impl Fn(&FormEvent) + Send + Sync + 'static) -> SubscriptionId {
        let channel = self.publisher.channel();
        let id = channel.subscribe(f);
        self.subscriptions.push((channel, id));
        id
    }

    /// Drop this session's subscriptions. Subscriptions made by others are
    /// kept. A channel left without subscribers is closed; the hub replaces
    /// it on next access, for this session and every other one.
    pub fn unsubscribe(&mut self) {
        for (channel, id) in self.subscriptions.drain(..) {
            channel.unsubscribe(id);
            if channel.subscriber_count() == 0 && !channel.is_closed() {
                debug!("Last subscriber gone, closing form channel");
                channel.close();
            }
        }
    }

    /// Detach every listener. The session never publishes afterwards.
    /// Calling it again does nothing.
    pub fn finish(&mut self) -> HiFormResult<()> {
        if self.finished {
            return Ok(());
        }
        self.publisher.halt();
        detach_fields(&self.controls, &mut self.listeners)?;
        detach_submit(&self.submit);
        self.finished = true;

        debug!("Finished form session on {}", self.form.get_id());
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Validate every field from its stored value, without publishing.
    pub fn validate_form(&self) -> ValidationResult {
        for control in &self.controls {
            let name = control.get_name();
            if let Some(options) = self.resolved.get(&name) {
                apply_field_validation(control, &name, &self.store, options);
            }
        }

        self.store.with(|data| {
            data.iter()
                .filter(|(_, field)| !field.is_valid)
                .map(|(name, field)| FieldError {
                    field_name: name.to_string(),
                    messages: field.errors.clone(),
                })
                .collect()
        })
    }

    /// Dispatch a submit event on the form, as if the user submitted it.
    pub fn request_submit(&self) {
        if self.finished {
            warn!("Submit requested on a finished form session");
            return;
        }
        self.form.dispatch(EventKind::Submit);
    }
}
