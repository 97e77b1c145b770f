use crate::collect::collect_controls;
use crate::element::Node;
use crate::event::EventKind;

/// Tracks which control is currently focused and fires focus/blur events.
///
/// Moving focus always blurs the previous control before focusing the new
/// one, matching the order hosts deliver these events.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<Node>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused control.
    pub fn focused(&self) -> Option<&Node> {
        self.focused.as_ref()
    }

    /// Focus a control, dispatching `blur` on the previous one first.
    /// Returns true if focus changed.
    pub fn focus(&mut self, node: &Node) -> bool {
        if self.focused.as_ref().is_some_and(|current| current.same_node(node)) {
            return false;
        }
        self.blur();
        self.focused = Some(node.clone());
        node.dispatch(EventKind::Focus);
        true
    }

    /// Clear focus, dispatching `blur` on the focused control.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        match self.focused.take() {
            Some(previous) => {
                previous.dispatch(EventKind::Blur);
                true
            }
            None => false,
        }
    }

    /// Focus the next control (Tab navigation).
    /// Returns the newly focused control if focus changed.
    pub fn focus_next(&mut self, root: &Node) -> Option<Node> {
        let controls = collect_controls(root);
        if controls.is_empty() {
            return None;
        }

        let next = match &self.focused {
            None => controls[0].clone(),
            Some(current) => match controls.iter().position(|c| c.same_node(current)) {
                Some(i) => controls[(i + 1) % controls.len()].clone(),
                None => controls[0].clone(),
            },
        };

        self.focus(&next).then_some(next)
    }

    /// Focus the previous control (Shift+Tab navigation).
    /// Returns the newly focused control if focus changed.
    pub fn focus_prev(&mut self, root: &Node) -> Option<Node> {
        let controls = collect_controls(root);
        if controls.is_empty() {
            return None;
        }

        let last = controls.len() - 1;
        let prev = match &self.focused {
            None => controls[last].clone(),
            Some(current) => match controls.iter().position(|c| c.same_node(current)) {
                Some(0) | None => controls[last].clone(),
                Some(i) => controls[i - 1].clone(),
            },
        };

        self.focus(&prev).then_some(prev)
    }
}
