//! Terminal setup and the dashboard event loop.

use crate::config::Config;
use crate::event::Event;
use crate::outage::{NesClient, OutageSource};
use crate::tui::App;
use anyhow::{Context, Result};
use crossterm::{
    event::{Event as TermEvent, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::future::Future;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Periods of the three dashboard timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub refresh: Duration,
    pub blink: Duration,
    pub spinner: Duration,
}

impl Timers {
    pub fn from_config(config: &Config) -> Self {
        Self {
            refresh: config.refresh_interval(),
            blink: config.blink_interval(),
            spinner: config.spinner_interval(),
        }
    }
}

/// Run the dashboard for `event_id` until the user quits
pub async fn run(config: &Config, event_id: i64) -> Result<()> {
    let source: Arc<dyn OutageSource> = Arc::new(NesClient::from_config(config)?);
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let app = App::new(event_id, source, events_tx, config.refresh_interval());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    let mut terminal = setup_terminal().context("Failed to initialize terminal")?;
    let result = drive(
        app,
        events_rx,
        Timers::from_config(config),
        EventStream::new(),
        shutdown,
        |app| terminal.draw(|frame| app.render(frame)).map(|_| ()),
    )
    .await;
    let restored = restore_terminal(&mut terminal);

    tracing::info!(event_id, "dashboard stopped");
    finish(result, restored)
}

/// Raw mode plus alternate screen. Raw mode is undone if the rest fails.
fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    undo_on_error(enter_alternate_screen(), || {
        let _ = io::stdout().execute(LeaveAlternateScreen);
        disable_raw_mode()
    })
}

fn enter_alternate_screen() -> io::Result<Tui> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn undo_on_error<T>(
    result: io::Result<T>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    if result.is_err() {
        if let Err(e) = undo() {
            tracing::warn!(error = %e, "failed to undo partial terminal setup");
        }
    }
    result
}

/// The loop's own error wins over a failed terminal restore
fn finish(result: Result<()>, restored: io::Result<()>) -> Result<()> {
    result.and(restored.context("Failed to restore terminal"))
}

/// Periodic timer whose first tick comes one full period from now
fn periodic(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Map terminal input onto dashboard events. Mouse and focus input is dropped.
pub fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) => Some(Event::Key(key)),
        TermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

/// Drive `app` until it asks to quit.
///
/// Arms the refresh, blink and spinner timers, starts the first fetch, then
/// handles one event at a time from the timers, `term_events`, fetch
/// completions and `shutdown`, calling `draw` before each wait.
pub async fn drive<S, Q, D>(
    mut app: App,
    mut events_rx: mpsc::UnboundedReceiver<Event>,
    timers: Timers,
    mut term_events: S,
    shutdown: Q,
    mut draw: D,
) -> Result<()>
where
    S: Stream<Item = io::Result<TermEvent>> + Unpin,
    Q: Future<Output = ()>,
    D: FnMut(&App) -> io::Result<()>,
{
    let mut refresh = periodic(timers.refresh);
    let mut blink = periodic(timers.blink);
    let mut spinner = periodic(timers.spinner);
    tokio::pin!(shutdown);

    app.start();

    loop {
        draw(&app).context("Failed to draw dashboard")?;

        let event = tokio::select! {
            _ = refresh.tick() => Event::RefreshTick,
            _ = blink.tick() => Event::BlinkTick,
            _ = spinner.tick() => Event::SpinnerTick,
            Some(event) = events_rx.recv() => event,
            _ = &mut shutdown => Event::Quit,
            maybe_event = term_events.next() => match maybe_event {
                Some(Ok(term_event)) => match translate(term_event) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => Event::Quit,
            },
        };

        app.handle_event(event)?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
