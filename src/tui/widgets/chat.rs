// ABOUTME: Chat widget: renders the question/answer history into styled ratatui Lines.
// ABOUTME: Also renders the welcome screen for an empty history and the thinking indicator.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::state::{Message, WidgetState};

/// Spinner frames for the thinking indicator.
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Topics offered on the welcome screen.
pub const TOPICS: &[(&str, Color)] = &[
    ("Sensors", Color::Indexed(105)),
    ("Motors", Color::Magenta),
    ("Arduino", Color::Blue),
    ("PID Control", Color::Green),
];

/// Lines for the chat area: welcome screen, or history plus thinking indicator.
pub fn chat_lines(state: &WidgetState) -> Vec<Line<'static>> {
    if state.history.is_empty() && !state.is_pending() {
        return welcome_lines(&state.title);
    }

    let mut lines = render_history_lines(&state.history);
    if state.is_pending() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(thinking_line(state.spinner_tick));
    }
    lines
}

/// Render the history, oldest first. Questions sit on the right, answers on the left.
pub fn render_history_lines(history: &[Message]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let question_style = Style::default().fg(Color::LightBlue);

    for (idx, msg) in history.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }

        for (i, text) in msg.question.split('\n').enumerate() {
            let mut spans = vec![Span::styled(text.to_string(), question_style)];
            if i == 0 {
                spans.push(Span::styled(
                    " ❮",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw("  "));
            }
            lines.push(Line::from(spans).right_aligned());
        }

        // First answer line gets the prefix, the rest keep their own line breaks.
        for (i, text) in msg.answer.split('\n').enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        "⏺ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(text.to_string()),
                ]));
            } else {
                lines.push(Line::from(Span::raw(format!("  {}", text))));
            }
        }
    }

    lines
}

/// Animated "Thinking..." line shown while a request is in flight.
pub fn thinking_line(tick: usize) -> Line<'static> {
    let frame = SPINNER[tick % SPINNER.len()];
    Line::from(vec![
        Span::styled(format!("{} ", frame), Style::default().fg(Color::Cyan)),
        Span::styled(
            "Thinking...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

/// Centered welcome screen for an empty history.
pub fn welcome_lines(title: &str) -> Vec<Line<'static>> {
    let mut chips = Vec::new();
    for (i, (topic, color)) in TOPICS.iter().enumerate() {
        if i > 0 {
            chips.push(Span::raw(" "));
        }
        chips.push(Span::styled(
            format!(" {} ", topic),
            Style::default().fg(Color::Black).bg(*color),
        ));
    }

    vec![
        Line::from(""),
        Line::from(Span::styled("💡", Style::default())).centered(),
        Line::from(""),
        Line::from(Span::styled(
            format!("Welcome to {}!", title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            "I can help you with sensors, motors, Arduino, PID control, and more robotics concepts.",
            Style::default().fg(Color::Gray),
        ))
        .centered(),
        Line::from(""),
        Line::from(chips).centered(),
    ]
}
