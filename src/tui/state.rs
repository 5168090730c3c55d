// ABOUTME: Widget state: visibility, draft input, pending request, and message history.
// ABOUTME: All transitions are plain methods so the widget can be tested without rendering.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::ask::{AskTicket, Settlement, resolve_answer};
use crate::config::WidgetConfig;

/// Which face of the widget is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only the launcher badge is visible.
    Closed,
    /// Full panel: header, history, composer.
    Expanded,
    /// Panel collapsed to its header.
    Minimized,
}

/// One answered question in the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// The request currently in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAsk {
    pub request_id: u64,
    pub generation: u64,
    pub question: String,
}

/// Full widget state.
pub struct WidgetState {
    pub visibility: Visibility,
    pub draft: String,
    pub cursor_pos: usize,
    /// Lines scrolled up from the bottom of the history (0 = pinned to bottom).
    pub scroll_offset: u16,
    pub history: Vec<Message>,
    pub pending: Option<PendingAsk>,
    pub title: String,
    pub subtitle: String,
    /// Label of the ask action, shown in the status bar.
    pub action_label: String,
    pub spinner_tick: usize,
    pub session_start: Instant,
    /// Number of questions submitted this session, including cleared ones.
    pub questions_asked: usize,
    generation: u64,
    next_request_id: u64,
    next_seq: u64,
}

impl WidgetState {
    /// Create a closed widget with an empty history.
    pub fn new(title: String, subtitle: String) -> Self {
        Self {
            visibility: Visibility::Closed,
            draft: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            history: Vec::new(),
            pending: None,
            title,
            subtitle,
            action_label: String::new(),
            spinner_tick: 0,
            session_start: Instant::now(),
            questions_asked: 0,
            generation: 0,
            next_request_id: 1,
            next_seq: 0,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        let mut state = Self::new(config.title.clone(), config.subtitle.clone());
        if config.start_open {
            state.open();
        }
        state
    }

    // --- Visibility ---

    pub fn is_open(&self) -> bool {
        self.visibility != Visibility::Closed
    }

    pub fn is_expanded(&self) -> bool {
        self.visibility == Visibility::Expanded
    }

    /// Launcher activated: Closed → Expanded.
    pub fn open(&mut self) {
        if self.visibility == Visibility::Closed {
            self.visibility = Visibility::Expanded;
            tracing::debug!("widget: opened");
        }
    }

    /// Expanded → Minimized.
    pub fn minimize(&mut self) {
        if self.visibility == Visibility::Expanded {
            self.visibility = Visibility::Minimized;
        }
    }

    /// Minimized → Expanded.
    pub fn expand(&mut self) {
        if self.visibility == Visibility::Minimized {
            self.visibility = Visibility::Expanded;
        }
    }

    pub fn toggle_minimized(&mut self) {
        match self.visibility {
            Visibility::Expanded => self.minimize(),
            Visibility::Minimized => self.expand(),
            Visibility::Closed => {}
        }
    }

    /// Close the panel and discard the draft. History stays in memory.
    pub fn close(&mut self) {
        if self.visibility != Visibility::Closed {
            self.visibility = Visibility::Closed;
            self.clear_draft();
            tracing::debug!(history = self.history.len(), "widget: closed");
        }
    }

    // --- Submission ---

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the send control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && !self.draft.trim().is_empty()
    }

    /// Commit the draft. Returns the ticket to run, or `None` when the draft
    /// is blank or a request is already in flight.
    pub fn submit(&mut self) -> Option<AskTicket> {
        if self.is_pending() {
            return None;
        }
        let question = self.draft.trim().to_string();
        if question.is_empty() {
            return None;
        }

        self.clear_draft();

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.questions_asked += 1;
        self.spinner_tick = 0;
        self.pending = Some(PendingAsk {
            request_id,
            generation: self.generation,
            question: question.clone(),
        });
        self.scroll_offset = 0;

        Some(AskTicket {
            request_id,
            generation: self.generation,
            question,
        })
    }

    /// Apply the outcome of an ask. Releases the pending flag when the
    /// settlement belongs to the outstanding request, and appends a message
    /// unless the history was cleared after the question was submitted.
    pub fn settle(&mut self, settlement: Settlement) -> Option<&Message> {
        let Settlement { ticket, outcome } = settlement;

        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.request_id == ticket.request_id)
        {
            self.pending = None;
        }

        if ticket.generation != self.generation {
            tracing::debug!(
                request_id = ticket.request_id,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "widget: discarding answer for cleared history"
            );
            return None;
        }

        let answer = resolve_answer(&outcome);
        self.push_message(ticket.question, answer);
        self.history.last()
    }

    /// Append a message and snap the view to the bottom.
    pub fn push_message(&mut self, question: String, answer: String) {
        let timestamp = Utc::now();
        let id = format!("{}-{}", timestamp.timestamp_millis(), self.next_seq);
        self.next_seq += 1;
        self.history.push(Message {
            id,
            question,
            answer,
            timestamp,
        });
        self.scroll_offset = 0;
    }

    /// Empty the history and the draft. An in-flight request keeps running,
    /// but its answer will be discarded.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.clear_draft();
        self.scroll_offset = 0;
        self.generation += 1;
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    // --- Draft editing ---

    fn clear_draft(&mut self) {
        self.draft.clear();
        self.cursor_pos = 0;
    }

    /// Clamp the cursor position to the valid character range of the draft.
    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.draft_char_len());
    }

    /// Return the current cursor byte index in the UTF-8 draft.
    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.draft, self.cursor_pos)
    }

    pub fn draft_char_len(&self) -> usize {
        self.draft.chars().count()
    }

    /// Insert a character at the cursor and advance by one character.
    pub fn insert_char_at_cursor(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.draft.insert(byte_index, c);
        self.cursor_pos += 1;
    }

    /// Insert pasted text at the cursor. Carriage returns are normalized to newlines.
    pub fn insert_str_at_cursor(&mut self, text: &str) {
        self.clamp_cursor();
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let byte_index = self.cursor_byte_index();
        self.draft.insert_str(byte_index, &normalized);
        self.cursor_pos += normalized.chars().count();
    }

    /// Delete the character before the cursor (backspace behavior).
    pub fn backspace_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }

        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.draft, self.cursor_pos - 1);
        self.draft.replace_range(start..end, "");
        self.cursor_pos -= 1;
    }

    /// Delete the character at the cursor (delete behavior).
    pub fn delete_char_at_cursor(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.draft_char_len() {
            return;
        }

        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.draft, self.cursor_pos + 1);
        self.draft.replace_range(start..end, "");
    }

    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.draft_char_len() {
            self.cursor_pos += 1;
        }
    }

    /// Move cursor to the start of its line.
    pub fn move_cursor_home(&mut self) {
        let line = self.cursor_line();
        self.cursor_pos = self.line_start(line);
    }

    /// Move cursor to the end of its line.
    pub fn move_cursor_end(&mut self) {
        let line = self.cursor_line();
        let lines = self.draft_lines();
        self.cursor_pos = self.line_start(line) + lines[line].chars().count();
    }

    // --- Multi-line draft helpers ---

    /// Draft split into lines. Always at least one (possibly empty) line.
    pub fn draft_lines(&self) -> Vec<&str> {
        self.draft.split('\n').collect()
    }

    pub fn draft_line_count(&self) -> usize {
        self.draft_lines().len()
    }

    /// Zero-based line index of the cursor.
    pub fn cursor_line(&self) -> usize {
        let pos = self.cursor_pos.min(self.draft_char_len());
        self.draft.chars().take(pos).filter(|&c| c == '\n').count()
    }

    /// Character column of the cursor within its line.
    pub fn cursor_column(&self) -> usize {
        let pos = self.cursor_pos.min(self.draft_char_len());
        pos - self.line_start(self.cursor_line())
    }

    /// Character index where the given line begins.
    fn line_start(&self, line: usize) -> usize {
        self.draft_lines()
            .iter()
            .take(line)
            .map(|l| l.chars().count() + 1)
            .sum()
    }

    /// Move the cursor one line up, keeping the column where possible.
    /// Returns false when already on the first line.
    pub fn move_cursor_up_in_draft(&mut self) -> bool {
        let line = self.cursor_line();
        if line == 0 {
            return false;
        }
        let col = self.cursor_column();
        let prev_len = self.draft_lines()[line - 1].chars().count();
        self.cursor_pos = self.line_start(line - 1) + col.min(prev_len);
        true
    }

    /// Move the cursor one line down, keeping the column where possible.
    /// Returns false when already on the last line.
    pub fn move_cursor_down_in_draft(&mut self) -> bool {
        let line = self.cursor_line();
        let lines = self.draft_lines();
        if line + 1 >= lines.len() {
            return false;
        }
        let col = self.cursor_column();
        let next_len = lines[line + 1].chars().count();
        self.cursor_pos = self.line_start(line + 1) + col.min(next_len);
        true
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}
