// ABOUTME: Composer widget: the draft input area and the footer with the send button.
// ABOUTME: Shows a placeholder for an empty draft and a dimmed, disabled look while pending.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::WidgetState;

pub const PLACEHOLDER: &str = "Ask anything about sensors, motors, control, Arduino, PID, etc.";
pub const SEND_HINT: &str = "Enter to send, Shift+Enter for new line";

/// Lines of the input area.
pub fn composer_lines(state: &WidgetState) -> Vec<Line<'static>> {
    if state.draft.is_empty() {
        return vec![Line::from(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let style = if state.is_pending() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    state
        .draft_lines()
        .into_iter()
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect()
}

/// Footer hint on the left.
pub fn hint_line() -> Line<'static> {
    Line::from(Span::styled(
        format!("ⓘ {}", SEND_HINT),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Send button on the right: "Send", or "Sending..." while pending; dimmed when disabled.
pub fn send_button_line(state: &WidgetState) -> Line<'static> {
    let label = if state.is_pending() {
        " ⠿ Sending... "
    } else {
        " ➤ Send "
    };
    let style = if state.can_submit() {
        Style::default()
            .fg(Color::White)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Black)
    };
    Line::from(Span::styled(label, style)).right_aligned()
}
