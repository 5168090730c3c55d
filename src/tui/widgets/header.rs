// ABOUTME: Panel header widget: title, subtitle, and the Clear/Minimize/Expand/Close buttons.
// ABOUTME: Buttons shown depend on visibility and whether there is history to clear.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::Visibility;

/// A header button: key hint and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderButton {
    pub key: &'static str,
    pub label: &'static str,
}

pub const CLEAR: HeaderButton = HeaderButton {
    key: "^L",
    label: "Clear",
};
pub const MINIMIZE: HeaderButton = HeaderButton {
    key: "Tab",
    label: "Minimize",
};
pub const EXPAND: HeaderButton = HeaderButton {
    key: "Tab",
    label: "Expand",
};
pub const CLOSE: HeaderButton = HeaderButton {
    key: "Esc",
    label: "Close",
};

/// Buttons for the current panel state, left to right.
pub fn header_buttons(visibility: Visibility, has_history: bool) -> Vec<HeaderButton> {
    match visibility {
        Visibility::Closed => vec![],
        Visibility::Expanded if has_history => vec![CLEAR, MINIMIZE, CLOSE],
        Visibility::Expanded => vec![MINIMIZE, CLOSE],
        Visibility::Minimized => vec![EXPAND, CLOSE],
    }
}

/// Left side of the header: avatar, title, and subtitle unless it is empty.
pub fn title_line(title: &str, subtitle: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled("◉ ", Style::default().fg(Color::Magenta)),
        Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if !subtitle.is_empty() {
        spans.push(Span::styled(
            format!("  {}", subtitle),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Right side of the header: the buttons, right-aligned.
pub fn buttons_line(buttons: &[HeaderButton]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, button) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{} ", button.key),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            format!("{}]", button.label),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans).right_aligned()
}
