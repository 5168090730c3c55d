// ABOUTME: Launcher widget: the badge shown at the bottom-right while the widget is closed.
// ABOUTME: Uses a short label on narrow terminals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Terminals narrower than this get the short label.
pub const NARROW_WIDTH: u16 = 40;

pub fn launcher_label(screen_width: u16) -> &'static str {
    if screen_width < NARROW_WIDTH {
        "Ask AI"
    } else {
        "Ask Robotics Tutor"
    }
}

/// Badge content: chat glyph, label, and a new-feature dot.
pub fn launcher_line(screen_width: u16) -> Line<'static> {
    Line::from(vec![
        Span::styled("💬 ", Style::default()),
        Span::styled(
            launcher_label(screen_width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" •", Style::default().fg(Color::Yellow)),
    ])
}
