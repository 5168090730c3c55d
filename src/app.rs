// ABOUTME: App orchestrator: wires together the ask action, the widget state, and the terminal.
// ABOUTME: Runs the event loop over terminal events, ask settlements, and spinner ticks.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, EventStream};
use crossterm::execute;
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use crate::ask::{self, AskAction, AskTicket, Settlement};
use crate::config::Config;
use crate::tui::input::{InputResult, handle_event};
use crate::tui::state::WidgetState;
use crate::tui::ui;
use crate::tui::widgets::status::format_elapsed;

/// Spinner frame interval while a request is in flight.
const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Top-level application that owns the widget and drives the terminal.
pub struct App {
    config: Config,
    action: Arc<dyn AskAction>,
}

impl App {
    /// Create a new app with the given configuration and ask action.
    pub fn new(config: Config, action: Arc<dyn AskAction>) -> Self {
        Self { config, action }
    }

    /// Run the application: take over the terminal, loop until quit, restore it.
    pub async fn run(self) -> anyhow::Result<()> {
        let mut state = WidgetState::from_config(&self.config.widget);
        state.action_label = self.action.label();

        tracing::info!(action = %state.action_label, "app: starting");

        let mut terminal = ratatui::init();
        // Paste support is best-effort; not every terminal honors it.
        let _ = execute!(std::io::stdout(), EnableBracketedPaste);

        let result = self.event_loop(&mut terminal, &mut state).await;

        let _ = execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();

        tracing::info!(
            questions = state.questions_asked,
            history = state.history.len(),
            "app: exiting"
        );
        print_exit_screen(&state);

        result
    }

    async fn event_loop(
        &self,
        terminal: &mut DefaultTerminal,
        state: &mut WidgetState,
    ) -> anyhow::Result<()> {
        let (settle_tx, mut settle_rx) = mpsc::channel::<Settlement>(16);
        let mut events = EventStream::new();
        let mut spinner = spinner_interval();

        loop {
            terminal.draw(|frame| ui::render(frame, state))?;

            tokio::select! {
                maybe_event = events.next() => {
                    let Some(event) = maybe_event else {
                        break;
                    };
                    match handle_event(state, event?) {
                        InputResult::None => {}
                        InputResult::Submit(ticket) => {
                            spinner.reset();
                            spawn_ask(self.action.clone(), ticket, settle_tx.clone());
                        }
                        InputResult::Quit => break,
                    }
                }
                Some(settlement) = settle_rx.recv() => {
                    state.settle(settlement);
                }
                _ = spinner.tick(), if state.is_pending() => {
                    state.advance_spinner();
                }
            }
        }

        Ok(())
    }
}

/// Spinner ticker. It is only polled while a request is pending, so ticks
/// missed while idle are skipped instead of replayed in a burst.
fn spinner_interval() -> Interval {
    let mut spinner = tokio::time::interval(SPINNER_INTERVAL);
    spinner.set_missed_tick_behavior(MissedTickBehavior::Skip);
    spinner
}

/// Run one ticket in the background and deliver its settlement on `tx`.
///
/// In-flight asks are never cancelled; if the receiver is gone the
/// settlement is dropped.
pub fn spawn_ask(
    action: Arc<dyn AskAction>,
    ticket: AskTicket,
    tx: mpsc::Sender<Settlement>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let settlement = ask::run_ask(action.as_ref(), ticket).await;
        if tx.send(settlement).await.is_err() {
            tracing::debug!("app: settlement dropped, event loop has exited");
        }
    })
}

/// Print a farewell screen after the TUI exits.
fn print_exit_screen(state: &WidgetState) {
    let elapsed = format_elapsed(state.session_start.elapsed().as_secs());
    let asked = state.questions_asked;
    let noun = if asked == 1 { "question" } else { "questions" };

    println!();
    println!("  \u{1f916} \x1b[1mThanks for studying with {}!\x1b[0m", state.title);
    println!();
    println!("  \u{1f550} Session lasted {elapsed} with {asked} {noun} asked.");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ask::echo::EchoAction;

    #[tokio::test]
    async fn spawn_ask_delivers_settlement() {
        let (tx, mut rx) = mpsc::channel(1);
        let ticket = AskTicket {
            request_id: 1,
            generation: 0,
            question: "What is torque?".to_string(),
        };
        spawn_ask(Arc::new(EchoAction), ticket, tx).await.unwrap();

        let settlement = rx.recv().await.expect("settlement should arrive");
        assert_eq!(settlement.ticket.request_id, 1);
        assert_eq!(
            settlement.outcome,
            Ok(Some("You asked: What is torque?".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn spinner_does_not_replay_ticks_missed_while_idle() {
        let mut spinner = spinner_interval();
        spinner.tick().await;

        // Idle for two seconds without polling the ticker.
        tokio::time::advance(Duration::from_millis(2050)).await;

        // One overdue tick fires, then the cadence resumes.
        spinner.tick().await;
        let burst = tokio::time::timeout(Duration::from_millis(10), spinner.tick()).await;
        assert!(burst.is_err(), "missed ticks should be skipped, not replayed");
    }

    #[tokio::test]
    async fn spawn_ask_tolerates_closed_receiver() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let ticket = AskTicket {
            request_id: 2,
            generation: 0,
            question: "q".to_string(),
        };
        // Must not panic.
        spawn_ask(Arc::new(EchoAction), ticket, tx).await.unwrap();
    }
}
