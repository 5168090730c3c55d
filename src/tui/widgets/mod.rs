// ABOUTME: TUI widget sub-modules for the launcher, panel header, chat history, composer, and status bar.
// ABOUTME: Each widget is a pure rendering function over WidgetState or plain values.

pub mod chat;
pub mod composer;
pub mod header;
pub mod launcher;
pub mod status;
