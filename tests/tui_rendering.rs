// ABOUTME: E2E tests for TUI rendering using ratatui's TestBackend.
// ABOUTME: Verifies the launcher, the expanded and minimized panel, history, and pending indicators.

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use robotutor::ask::{AskError, FALLBACK_ANSWER, Settlement};
use robotutor::tui::state::WidgetState;
use robotutor::tui::ui;

/// Extract a single row of text from the terminal buffer as a String.
fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buf = terminal.backend().buffer();
    let width = buf.area.width;
    (0..width)
        .map(|x| {
            buf.cell((x, y))
                .map(|c| c.symbol().chars().next().unwrap_or(' '))
                .unwrap_or(' ')
        })
        .collect()
}

/// Extract all text from the terminal buffer as a single string (rows joined by newlines).
fn all_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    let height = buf.area.height;
    (0..height)
        .map(|y| row_text(terminal, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn widget() -> WidgetState {
    let mut state = WidgetState::new("Robotics Tutor".to_string(), "AI-powered help".to_string());
    state.action_label = "echo".to_string();
    state
}

fn draw(terminal: &mut Terminal<TestBackend>, state: &mut WidgetState) {
    terminal
        .draw(|frame| ui::render(frame, state))
        .unwrap();
}

/// A closed widget shows only the launcher badge, anchored near the
/// bottom-right above the status bar.
#[test]
fn closed_widget_renders_launcher() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = widget();

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(
        text.contains("Ask Robotics Tutor"),
        "launcher label should be visible, got:\n{}",
        text,
    );
    assert!(
        !text.contains("AI-powered help"),
        "panel header should not render while closed, got:\n{}",
        text,
    );
    // Badge bottom border sits on the row just above the status bar.
    let badge_row = row_text(&terminal, 21);
    assert!(
        badge_row.contains("Ask Robotics Tutor"),
        "launcher should sit at the bottom of the page, got: {:?}",
        badge_row,
    );
}

/// Narrow terminals get the short launcher label.
#[test]
fn narrow_launcher_uses_short_label() {
    let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();
    let mut state = widget();

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("Ask AI"), "got:\n{}", text);
    assert!(!text.contains("Ask Robotics Tutor"), "got:\n{}", text);
}

/// An open widget with no history shows the header and the welcome screen.
#[test]
fn expanded_empty_widget_shows_welcome() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut state = widget();
    state.open();

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("Robotics Tutor"), "got:\n{}", text);
    assert!(text.contains("Welcome to Robotics Tutor!"), "got:\n{}", text);
    assert!(text.contains("PID Control"), "got:\n{}", text);
    assert!(text.contains("Ask anything about sensors"), "placeholder missing:\n{}", text);
    assert!(text.contains("Enter to send"), "hint missing:\n{}", text);
    assert!(
        !text.contains("Clear]"),
        "clear button should be hidden without history:\n{}",
        text,
    );
}

/// History renders question and answer; the Clear button appears.
#[test]
fn expanded_widget_renders_history() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut state = widget();
    state.open();
    state.push_message(
        "What is PID control?".to_string(),
        "A feedback loop.".to_string(),
    );

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("What is PID control?"), "got:\n{}", text);
    assert!(text.contains("A feedback loop."), "got:\n{}", text);
    assert!(text.contains("Clear]"), "clear button missing:\n{}", text);
    assert!(!text.contains("Welcome to"), "welcome should be gone:\n{}", text);
}

/// A minimized widget renders its header with an Expand button and nothing else.
#[test]
fn minimized_widget_renders_header_only() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut state = widget();
    state.open();
    state.push_message("q".to_string(), "hidden answer".to_string());
    state.minimize();

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("Expand]"), "got:\n{}", text);
    assert!(!text.contains("hidden answer"), "got:\n{}", text);
    assert!(!text.contains("Clear]"), "got:\n{}", text);
}

/// While a request is pending the panel shows the thinking indicator and
/// the send button reads "Sending...".
#[test]
fn pending_widget_shows_thinking_and_sending() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut state = widget();
    state.open();
    state.draft = "What is a servo?".to_string();
    state.submit().expect("submission should start");

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("Thinking..."), "got:\n{}", text);
    assert!(text.contains("Sending..."), "got:\n{}", text);
    let status = row_text(&terminal, 29);
    assert!(
        status.contains("thinking..."),
        "status bar should show pending state, got: {:?}",
        status,
    );
}

/// A failed ask renders the fallback text like any other answer.
#[test]
fn failed_ask_renders_fallback_answer() {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut state = widget();
    state.open();
    state.draft = "Why is my motor hot?".to_string();
    let ticket = state.submit().unwrap();
    state.settle(Settlement {
        ticket,
        outcome: Err(AskError::Timeout),
    });

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("Why is my motor hot?"), "got:\n{}", text);
    assert!(text.contains(FALLBACK_ANSWER), "got:\n{}", text);
    assert!(!text.contains("Thinking..."), "got:\n{}", text);
}

/// The status bar shows the action label and message count.
#[test]
fn renders_status_bar() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut state = widget();
    state.action_label = "convex:chat:askRobotics".to_string();
    state.push_message("a".to_string(), "b".to_string());
    state.push_message("c".to_string(), "d".to_string());

    draw(&mut terminal, &mut state);

    let status = row_text(&terminal, 23);
    assert!(status.contains("convex:chat:askRobotics"), "got: {:?}", status);
    assert!(status.contains("2 messages"), "got: {:?}", status);
}

/// Scroll offset clamps to the wrapped history height.
#[test]
fn scroll_clamp_accounts_for_wrapped_history() {
    let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
    let mut state = widget();
    state.open();
    for i in 0..10 {
        state.push_message(
            format!("question {}", i),
            "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu".to_string(),
        );
    }
    state.scroll_offset = u16::MAX;

    draw(&mut terminal, &mut state);

    assert!(state.scroll_offset > 0, "offset should clamp above zero");
    assert!(state.scroll_offset < u16::MAX, "offset should clamp to content height");
    let text = all_text(&terminal);
    assert!(
        text.contains("question 0"),
        "scrolled to top should show the oldest message, got:\n{}",
        text,
    );
}

/// New messages keep the view pinned to the newest content.
#[test]
fn view_stays_pinned_to_bottom() {
    let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
    let mut state = widget();
    state.open();
    for i in 0..12 {
        state.push_message(format!("question {}", i), format!("answer {}", i));
    }

    draw(&mut terminal, &mut state);

    let text = all_text(&terminal);
    assert!(text.contains("answer 11"), "got:\n{}", text);
    assert!(!text.contains("answer 0 "), "got:\n{}", text);
}

/// The cursor stays inside the composer even for long drafts.
#[test]
fn cursor_is_clamped_inside_composer() {
    let mut terminal = Terminal::new(TestBackend::new(30, 16)).unwrap();
    let mut state = widget();
    state.open();
    state.draft = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnop".to_string();
    state.cursor_pos = state.draft.chars().count();

    draw(&mut terminal, &mut state);

    let cursor = terminal.get_cursor_position().unwrap();
    assert!(
        cursor.x < 30,
        "cursor x should stay within terminal width, got {:?}",
        cursor,
    );
}

/// Tiny terminals must not panic in any visibility state.
#[test]
fn tiny_terminal_does_not_panic() {
    let mut terminal = Terminal::new(TestBackend::new(6, 3)).unwrap();
    let mut state = widget();
    draw(&mut terminal, &mut state);
    state.open();
    state.draft = "x\ny\nz".to_string();
    draw(&mut terminal, &mut state);
    state.minimize();
    draw(&mut terminal, &mut state);
}
