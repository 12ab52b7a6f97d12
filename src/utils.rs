pub mod help_msg;
pub mod key_events;
