// ABOUTME: Keyboard input handling for the widget: translates terminal events into transitions.
// ABOUTME: Handles the launcher, panel buttons, draft editing, and the Enter/Shift+Enter contract.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ask::AskTicket;
use crate::tui::state::{Visibility, WidgetState};

/// Lines scrolled by PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

/// The result of processing an input event.
#[derive(Debug, PartialEq)]
pub enum InputResult {
    /// No action needed beyond the state change already applied.
    None,
    /// User submitted a question; the ticket must be run.
    Submit(AskTicket),
    /// User wants to quit.
    Quit,
}

/// Process any terminal event against the widget.
pub fn handle_event(state: &mut WidgetState, event: Event) -> InputResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        Event::Paste(text) => {
            handle_paste(state, &text);
            InputResult::None
        }
        _ => InputResult::None,
    }
}

/// Process a key event against the widget and return the resulting action.
pub fn handle_key(state: &mut WidgetState, key: KeyEvent) -> InputResult {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    match state.visibility {
        Visibility::Closed => handle_launcher_key(state, key),
        Visibility::Minimized => handle_minimized_key(state, key),
        Visibility::Expanded => handle_panel_key(state, key),
    }
}

/// Pasted text goes into the draft only when the composer is usable.
pub fn handle_paste(state: &mut WidgetState, text: &str) {
    if state.is_expanded() && !state.is_pending() {
        state.insert_str_at_cursor(text);
    }
}

fn handle_launcher_key(state: &mut WidgetState, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => {
            state.open();
            InputResult::None
        }
        KeyCode::Esc | KeyCode::Char('q') => InputResult::Quit,
        _ => InputResult::None,
    }
}

fn handle_minimized_key(state: &mut WidgetState, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Tab => state.expand(),
        KeyCode::Esc => state.close(),
        _ => {}
    }
    InputResult::None
}

fn handle_panel_key(state: &mut WidgetState, key: KeyEvent) -> InputResult {
    // Panel buttons.
    match key.code {
        KeyCode::Esc => {
            state.close();
            return InputResult::None;
        }
        KeyCode::Tab => {
            state.minimize();
            return InputResult::None;
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.clear_history();
            return InputResult::None;
        }
        KeyCode::PageUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(PAGE_SCROLL);
            return InputResult::None;
        }
        KeyCode::PageDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(PAGE_SCROLL);
            return InputResult::None;
        }
        _ => {}
    }

    // The composer is disabled while a request is in flight; arrows still scroll.
    if state.is_pending() {
        match key.code {
            KeyCode::Up => state.scroll_offset = state.scroll_offset.saturating_add(1),
            KeyCode::Down => state.scroll_offset = state.scroll_offset.saturating_sub(1),
            _ => {}
        }
        return InputResult::None;
    }

    match key.code {
        KeyCode::Up => {
            if !state.move_cursor_up_in_draft() {
                state.scroll_offset = state.scroll_offset.saturating_add(1);
            }
            InputResult::None
        }
        KeyCode::Down => {
            if !state.move_cursor_down_in_draft() {
                state.scroll_offset = state.scroll_offset.saturating_sub(1);
            }
            InputResult::None
        }
        // Shift+Enter inserts a newline. Alt+Enter too, since many terminals
        // cannot report Shift on Enter.
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            state.insert_char_at_cursor('\n');
            InputResult::None
        }
        KeyCode::Enter => match state.submit() {
            Some(ticket) => InputResult::Submit(ticket),
            None => InputResult::None,
        },
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.insert_char_at_cursor(c);
            InputResult::None
        }
        KeyCode::Backspace => {
            state.backspace_char();
            InputResult::None
        }
        KeyCode::Delete => {
            state.delete_char_at_cursor();
            InputResult::None
        }
        KeyCode::Left => {
            state.move_cursor_left();
            InputResult::None
        }
        KeyCode::Right => {
            state.move_cursor_right();
            InputResult::None
        }
        KeyCode::Home => {
            state.move_cursor_home();
            InputResult::None
        }
        KeyCode::End => {
            state.move_cursor_end();
            InputResult::None
        }
        _ => InputResult::None,
    }
}
