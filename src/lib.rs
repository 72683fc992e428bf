//! nes-outage library
//!
//! Exports the outage fetcher, dashboard state machine and renderer for
//! testing and reuse by the binary.

pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod outage;
pub mod tui;
