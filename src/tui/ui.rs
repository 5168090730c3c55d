// ABOUTME: Main TUI rendering function: app header, floating widget, and status bar.
// ABOUTME: Places the launcher or the panel at the bottom-right and delegates to widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::state::{Visibility, WidgetState};
use crate::tui::widgets::chat::chat_lines;
use crate::tui::widgets::composer::{composer_lines, hint_line, send_button_line};
use crate::tui::widgets::header::{HeaderButton, buttons_line, header_buttons, title_line};
use crate::tui::widgets::launcher::launcher_line;
use crate::tui::widgets::status::{StatusBarParams, status_line};

/// Widest the open panel gets.
pub const PANEL_MAX_WIDTH: u16 = 64;
/// Tallest the expanded panel gets.
pub const PANEL_MAX_HEIGHT: u16 = 24;
/// Height of the minimized panel: borders plus the header row.
pub const MINIMIZED_HEIGHT: u16 = 3;
/// Draft rows visible before the composer scrolls.
const MAX_COMPOSER_LINES: u16 = 4;

/// Render the full screen to the given frame.
pub fn render(frame: &mut Frame, state: &mut WidgetState) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Header
    let mut header = vec![Span::styled(
        " robotutor",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if !state.is_open() {
        header.push(Span::styled(
            "  press Enter to open the tutor, q to quit",
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

    let page = chunks[1];
    match state.visibility {
        Visibility::Closed => render_launcher(frame, page),
        Visibility::Minimized | Visibility::Expanded => render_panel(frame, page, state),
    }

    // Status bar
    let status = status_line(&StatusBarParams {
        action_label: &state.action_label,
        message_count: state.history.len(),
        session_start: state.session_start,
        pending: state.is_pending(),
    });
    frame.render_widget(Paragraph::new(status), chunks[2]);
}

/// Where the launcher badge sits inside the page.
pub fn launcher_area(page: Rect) -> Rect {
    let content_width = launcher_line(page.width).width() as u16;
    // Borders plus one cell of padding each side.
    let width = (content_width + 4).min(page.width);
    let height = 3.min(page.height);
    bottom_right(page, width, height)
}

/// Where the open panel sits inside the page.
pub fn panel_area(page: Rect, visibility: Visibility) -> Rect {
    let width = if page.width > PANEL_MAX_WIDTH + 2 {
        PANEL_MAX_WIDTH
    } else {
        // Narrow screens: 95% of the page.
        (page.width * 95 / 100).max(1).min(page.width)
    };
    let height = match visibility {
        Visibility::Minimized => MINIMIZED_HEIGHT,
        _ => PANEL_MAX_HEIGHT,
    }
    .min(page.height);
    bottom_right(page, width, height)
}

/// Anchor a box to the bottom-right corner, one column in from the edge when there is room.
fn bottom_right(page: Rect, width: u16, height: u16) -> Rect {
    let margin = if page.width > width { 1 } else { 0 };
    Rect {
        x: page.x + page.width.saturating_sub(width + margin),
        y: page.y + page.height.saturating_sub(height),
        width,
        height,
    }
}

fn render_launcher(frame: &mut Frame, page: Rect) {
    let badge = launcher_area(page);
    if badge.width == 0 || badge.height == 0 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta));
    frame.render_widget(Clear, badge);
    frame.render_widget(
        Paragraph::new(launcher_line(page.width))
            .centered()
            .block(block),
        badge,
    );
}

fn render_panel(frame: &mut Frame, page: Rect, state: &mut WidgetState) {
    let panel = panel_area(page, state.visibility);
    if panel.width == 0 || panel.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(panel);
    frame.render_widget(Clear, panel);
    frame.render_widget(block, panel);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let buttons = header_buttons(state.visibility, !state.history.is_empty());

    if state.visibility == Visibility::Minimized {
        let header_row = Rect { height: 1, ..inner };
        render_header(frame, header_row, state, &buttons);
        return;
    }

    // Composer grows with the draft: one top border row plus its lines.
    let composer_height =
        state.draft_line_count().clamp(1, MAX_COMPOSER_LINES as usize) as u16 + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Header
            Constraint::Min(1),                  // Chat history
            Constraint::Length(composer_height), // Composer
            Constraint::Length(1),               // Footer
        ])
        .split(inner);

    render_header(frame, chunks[0], state, &buttons);
    render_chat(frame, chunks[1], state);
    render_composer(frame, chunks[2], state);

    frame.render_widget(Paragraph::new(hint_line()), chunks[3]);
    frame.render_widget(Paragraph::new(send_button_line(state)), chunks[3]);
}

fn render_header(
    frame: &mut Frame,
    row: Rect,
    state: &WidgetState,
    buttons: &[HeaderButton],
) {
    let buttons = buttons_line(buttons);
    let mut title = title_line(&state.title, &state.subtitle);
    // Drop the subtitle rather than let the buttons overwrite it.
    if title.width() + buttons.width() + 1 > row.width as usize {
        title = title_line(&state.title, "");
    }
    frame.render_widget(Paragraph::new(title), row);
    frame.render_widget(Paragraph::new(buttons), row);
}

fn render_chat(frame: &mut Frame, chunk: Rect, state: &mut WidgetState) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let chat_area = block.inner(chunk);
    frame.render_widget(block, chunk);

    // Use ratatui's own line_count() so the scroll math matches its wrapping.
    let chat_paragraph = Paragraph::new(chat_lines(state)).wrap(Wrap { trim: false });
    let total_lines = chat_paragraph.line_count(chat_area.width);
    let scroll = chat_scroll(total_lines, chat_area.height, &mut state.scroll_offset);
    frame.render_widget(chat_paragraph.scroll((scroll, 0)), chat_area);
}

/// Top row to render for a history of `total_lines` wrapped lines.
/// `scroll_offset` counts lines up from the bottom (0 = at bottom) and is
/// capped so it can't go past the top of the content.
fn chat_scroll(total_lines: usize, viewport: u16, scroll_offset: &mut u16) -> u16 {
    let total_lines = u16::try_from(total_lines).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(viewport);
    if *scroll_offset > max_scroll {
        *scroll_offset = max_scroll;
    }
    max_scroll.saturating_sub(*scroll_offset)
}

fn render_composer(frame: &mut Frame, chunk: Rect, state: &mut WidgetState) {
    let border_style = if state.is_pending() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Magenta)
    };
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(border_style);
    let input_area = block.inner(chunk);
    frame.render_widget(block, chunk);
    if input_area.height == 0 || input_area.width == 0 {
        return;
    }

    state.clamp_cursor();
    let cursor_line = state.cursor_line() as u16;
    // Keep the cursor line in view once the draft is taller than the composer.
    let scroll_y = cursor_line.saturating_sub(input_area.height - 1);

    frame.render_widget(
        Paragraph::new(composer_lines(state)).scroll((scroll_y, 0)),
        input_area,
    );

    // The composer is disabled while pending: no cursor.
    if state.is_pending() {
        return;
    }

    let lines = state.draft_lines();
    let line_text = lines.get(cursor_line as usize).copied().unwrap_or("");
    let prefix: String = line_text.chars().take(state.cursor_column()).collect();
    let visual_col = UnicodeWidthStr::width(prefix.as_str());
    let max_visual_col = input_area.width.saturating_sub(1) as usize;
    let clamped_visual_col = visual_col.min(max_visual_col) as u16;

    let cursor_x = input_area.x.saturating_add(clamped_visual_col);
    let cursor_y = input_area.y.saturating_add(cursor_line - scroll_y);
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));
}
