use color_eyre::eyre::Context;

use crate::component::{autocomplete::AutocompleteAction, button::ButtonAction};

/// Everything that can flow through the action channel.
///
/// `Comp` actions carry the id of the component they are addressed to;
/// components ignore actions scoped to another id.
#[derive(Clone, Debug)]
pub enum Action {
    /// Periodic heartbeat driving animations (skeleton phases, spinners).
    Tick,
    /// Redraw request.
    Render,
    /// Component-scoped action, routed by component id.
    Comp((CompAction, u64)),

    Quit,
}

#[derive(Clone, Debug)]
pub enum CompAction {
    Autocomplete(AutocompleteAction),
    Button(ButtonAction),
}

#[derive(Clone, Debug)]
pub struct ActionSender(pub tokio::sync::mpsc::UnboundedSender<Action>);

impl ActionSender {
    pub fn send<T: Into<Action>>(&self, action: T) {
        self.0.send(action.into()).with_context(||"Action Receiver is dropped or closed, which should not happen if app is still running.").unwrap();
    }
}
impl From<tokio::sync::mpsc::UnboundedSender<Action>> for ActionSender {
    fn from(value: tokio::sync::mpsc::UnboundedSender<Action>) -> Self {
        ActionSender(value)
    }
}
