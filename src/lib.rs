//! Reusable interactive widgets for [ratatui](https://ratatui.rs/).
//!
//! The crate provides three widgets meant to be embedded in a host
//! application's event loop:
//!
//! - [`AutocompleteInput`]: a text field with suggestion lookup, surfacing
//!   matches either as an inline dropdown or behind a full-screen overlay.
//! - [`Skeleton`]: a placeholder block with a looping loading animation.
//! - [`Button`]: a styled pressable control with variants, sizes, and
//!   disabled/loading states.
//!
//! Widgets follow an event/action split: [`Component::handle_events`] maps
//! terminal events to actions on a channel, the host drains the channel, and
//! [`Component::update`] is the only place state changes. Outcomes the host
//! cares about (a committed selection, a button press) come back over the
//! same channel and are parsed with the widget's `parse_*_action` helpers.
//!
//! The `uikit-gallery` binary in this crate is a self-contained showcase of
//! all three widgets.

pub mod actions;
pub mod component;
#[cfg(not(tarpaulin_include))]
pub mod tui;
pub mod utils;

pub use actions::{Action, ActionSender, CompAction};
pub use component::autocomplete::{AutocompleteInput, Presentation, filter_candidates};
pub use component::button::{Button, ButtonSize, ButtonVariant};
pub use component::skeleton::{Skeleton, SkeletonAnimation};
pub use component::{Component, EventHandlingStatus, Focus, WidgetExt};
