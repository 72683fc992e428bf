use crate::event::{Event, EventResult, FetchCompletion};
use crate::outage::OutageSource;
use crate::tui::render::{self, DashboardView};
use crate::tui::state::DashboardState;
use crate::tui::theme::Theme;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Main application state
pub struct App {
    /// What is on screen
    state: DashboardState,
    /// Styles, fixed for the lifetime of the app
    theme: Theme,
    /// Where fetches go
    source: Arc<dyn OutageSource>,
    /// Fetch completions are sent back into the event loop here
    events_tx: mpsc::UnboundedSender<Event>,
    /// Shown in the help footer
    refresh_interval: Duration,
    /// Whether the application should quit
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(
        event_id: i64,
        source: Arc<dyn OutageSource>,
        events_tx: mpsc::UnboundedSender<Event>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            state: DashboardState::new(event_id),
            theme: Theme::default(),
            source,
            events_tx,
            refresh_interval,
            should_quit: false,
        }
    }

    /// Kick off the first fetch. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        tracing::info!(event_id = self.state.event_id(), "dashboard started");
        self.request_refresh();
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::RefreshTick => {
                tracing::debug!("auto refresh");
                self.request_refresh();
            }
            Event::BlinkTick => self.state.toggle_blink(),
            Event::SpinnerTick => self.state.advance_spinner(),
            Event::FetchCompleted(completion) => self.handle_fetch_completed(completion),
            Event::Quit => self.should_quit = true,
            Event::Resize(_, _) => {}
        }
        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => {
                tracing::debug!("manual refresh");
                self.request_refresh();
            }
            _ => {}
        }
    }

    fn handle_fetch_completed(&mut self, completion: FetchCompletion) {
        let FetchCompletion { seq, result } = completion;
        if let Err(e) = &result {
            tracing::warn!(seq, error = %e, "fetch failed");
        }

        if !self.state.apply_fetch(seq, result, Local::now()) {
            tracing::debug!(seq, "discarding stale fetch result");
        }
    }

    /// Start a fetch in the background. In-flight fetches are left running.
    fn request_refresh(&mut self) {
        let seq = self.state.begin_fetch();
        let event_id = self.state.event_id();
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = source.fetch(event_id).await;
            // The loop may already be gone if the user quit mid-fetch.
            let _ = tx.send(Event::FetchCompleted(FetchCompletion { seq, result }));
        });
    }

    /// Build the view for the current state
    pub fn view(&self) -> DashboardView {
        DashboardView::build(&self.state, &self.theme, self.refresh_interval)
    }

    /// Render the application UI
    pub fn render(&self, frame: &mut Frame) {
        render::draw(frame, &self.view(), &self.theme);
    }
}
