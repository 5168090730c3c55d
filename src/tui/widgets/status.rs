// ABOUTME: Status bar widget: renders ask action, message count, session time, and pending indicator.
// ABOUTME: Displayed at the bottom of the screen as a single-line summary.

use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Inputs for the status bar.
pub struct StatusBarParams<'a> {
    pub action_label: &'a str,
    pub message_count: usize,
    pub session_start: Instant,
    pub pending: bool,
}

/// Render the status bar line.
pub fn status_line(params: &StatusBarParams) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(
            format!(" {} ", params.action_label),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("| ", dim),
        Span::styled(
            format!("{} ", format_count(params.message_count)),
            Style::default().fg(Color::White),
        ),
        Span::styled("| ", dim),
        Span::styled(
            format!("{} ", format_elapsed(params.session_start.elapsed().as_secs())),
            Style::default().fg(Color::White),
        ),
    ];

    if params.pending {
        spans.push(Span::styled("| ", dim));
        spans.push(Span::styled(
            "thinking... ",
            Style::default().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

fn format_count(count: usize) -> String {
    if count == 1 {
        "1 message".to_string()
    } else {
        format!("{} messages", count)
    }
}

/// Format elapsed seconds as "Xm YYs", or "Xh YYm" past an hour.
pub fn format_elapsed(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}
