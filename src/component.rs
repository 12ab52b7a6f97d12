//! Component contract shared by all widgets.
//!
//! A widget participates in the host's event loop in two steps:
//! [`Component::handle_events`] inspects an [`Event`] and pushes actions onto
//! the channel it was constructed with; [`Component::update`] is the only
//! place state actually changes. Hosts drain the channel between events and
//! feed every action back through `update`.

pub mod autocomplete;
pub mod button;
pub mod skeleton;

use ratatui::{Frame, layout::Rect};

use crate::{actions::Action, tui::Event};

/// Outcome of offering an event to a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventHandlingStatus {
    /// The component reacted to the event; the host should stop routing it.
    Consumed,
    /// The event is not for this component.
    Ignored,
}

/// Host-controlled focus state of a widget.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Idle,
    Focused,
}

/// Widgets that render into an area of the frame.
pub trait WidgetExt {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

pub trait Component: WidgetExt {
    /// Handle an event, possibly emitting actions onto the channel.
    #[must_use]
    fn handle_events(&mut self, event: &Event) -> EventHandlingStatus;

    /// Apply an action. Actions scoped to another component are ignored.
    fn update(&mut self, action: &Action);
}
