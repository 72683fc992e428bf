use crate::outage::{FetchError, OutageEvent};
use crossterm::event::KeyEvent;

/// Everything the dashboard loop reacts to
#[derive(Debug)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal resize event, only forces a redraw
    Resize(u16, u16),
    /// Slow timer: time to fetch again
    RefreshTick,
    /// Fast timer: flip the status blink
    BlinkTick,
    /// Spinner animation frame
    SpinnerTick,
    /// A spawned fetch finished
    FetchCompleted(FetchCompletion),
    /// Interrupt signal or closed input stream
    Quit,
}

/// Result of one fetch, tagged with the sequence number it was issued under
#[derive(Debug)]
pub struct FetchCompletion {
    pub seq: u64,
    pub result: Result<OutageEvent, FetchError>,
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;
