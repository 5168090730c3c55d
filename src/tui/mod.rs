// ABOUTME: TUI module: ratatui full-screen interface hosting the floating tutor widget.
// ABOUTME: Widget state machine, input handling, layout, and rendering widgets.

pub mod input;
pub mod state;
pub mod ui;
pub mod widgets;

pub use state::*;
