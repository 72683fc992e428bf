//! Dashboard rendering.
//!
//! [`DashboardView::build`] is a pure function of the state: it decides what
//! text appears and how it is styled. [`draw`] only lays the view out.

use crate::outage::OutageEvent;
use crate::tui::state::DashboardState;
use crate::tui::theme::Theme;
use chrono::{DateTime, Local, TimeZone};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

const TITLE: &str = " NES Outage Status Checker ";

/// Everything the dashboard shows, grouped by screen region
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub title: Line<'static>,
    /// Loading spinner or error message
    pub notice: Vec<Line<'static>>,
    /// Event details shown inside the box; empty when there is no event
    pub details: Vec<Line<'static>>,
    /// Background refresh indicator
    pub activity: Option<Line<'static>>,
    pub footer: Vec<Line<'static>>,
}

impl DashboardView {
    pub fn build(state: &DashboardState, theme: &Theme, refresh_interval: Duration) -> Self {
        let spinner = Span::styled(state.spinner().frame(), theme.spinner);
        let mut notice = Vec::new();
        let mut details = Vec::new();
        let mut activity = None;

        if state.is_loading() && state.event().is_none() {
            notice.push(Line::from(vec![
                spinner,
                Span::raw(" Fetching outage data..."),
            ]));
        } else if let Some(err) = state.error() {
            notice.push(Line::from(Span::styled(format!("Error: {err}"), theme.error)));
        } else if let Some(event) = state.event() {
            details = event_lines(event, state, theme);
            if state.is_loading() {
                activity = Some(Line::from(vec![spinner, Span::raw(" Refreshing...")]));
            }
        }

        let mut footer = Vec::new();
        if let Some(checked) = state.last_checked() {
            footer.push(Line::from(Span::styled(
                format!("Last checked: {}", format_clock(&checked)),
                theme.time,
            )));
        }
        footer.push(Line::from(Span::styled(
            format!(
                "Press 'r' to refresh • 'q' to quit • Auto-refreshes every {}",
                format_interval(refresh_interval)
            ),
            theme.help,
        )));

        Self {
            title: Line::from(Span::styled(TITLE, theme.title)),
            notice,
            details,
            activity,
            footer,
        }
    }

    /// All lines top to bottom, without box decoration
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![self.title.clone()];
        lines.extend(self.notice.iter().cloned());
        lines.extend(self.details.iter().cloned());
        lines.extend(self.activity.iter().cloned());
        lines.extend(self.footer.iter().cloned());
        lines
    }
}

fn event_lines(event: &OutageEvent, state: &DashboardState, theme: &Theme) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), theme.label),
            Span::styled(value, theme.value),
        ])
    };

    let mut lines = vec![
        field("Event ID", event.id.to_string()),
        field("Identifier", event.identifier.clone()),
        field("Title", event.title.clone()),
        field("Affected", format!("{} people", event.num_people)),
    ];

    if let Some(cause) = event.cause_text() {
        lines.push(field("Cause", cause.to_string()));
    }

    lines.push(field("Started", format_timestamp(event.start_time)));
    lines.push(field("Last Updated", format_timestamp(event.last_updated_time)));
    lines.push(Line::default());

    if event.is_unassigned() {
        lines.push(Line::from(Span::styled(
            "STATUS: UNASSIGNED",
            theme.status_unassigned,
        )));
        lines.push(Line::from(Span::styled(
            "No technician assigned yet",
            theme.value,
        )));
    } else {
        let style = if !state.should_blink() || state.blink_on() {
            theme.status_assigned
        } else {
            theme.status_assigned_dim
        };
        lines.push(Line::from(Span::styled(
            format!("STATUS: {}", event.status),
            style,
        )));
        lines.push(Line::from(Span::styled(
            "A technician has been assigned!",
            theme.value,
        )));
    }

    lines
}

/// Epoch milliseconds as local time, e.g. "Mon Jan 2, 3:04 PM"
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%a %b %-d, %-I:%M %p").to_string(),
        None => "unknown".to_string(),
    }
}

/// Wall-clock time, e.g. "3:04:05 PM"
pub fn format_clock(time: &DateTime<Local>) -> String {
    time.format("%-I:%M:%S %p").to_string()
}

fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

/// Lay the view out on the frame
pub fn draw(frame: &mut Frame, view: &DashboardView, theme: &Theme) {
    let box_height = if view.details.is_empty() {
        0
    } else {
        view.details.len() as u16 + 4 // borders + vertical padding
    };
    let box_width = view.details.iter().map(Line::width).max().unwrap_or(0) as u16 + 6;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(1),                                   // Top gap
            Constraint::Length(2),                                   // Title
            Constraint::Length(view.notice.len() as u16),           // Spinner / error
            Constraint::Length(box_height),                          // Event box
            Constraint::Length(if view.activity.is_some() { 2 } else { 0 }),
            Constraint::Length(view.footer.len() as u16 + 1),       // Footer
            Constraint::Min(0),
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new(view.title.clone()), chunks[1]);

    if !view.notice.is_empty() {
        frame.render_widget(
            Paragraph::new(view.notice.clone()).wrap(Wrap { trim: false }),
            chunks[2],
        );
    }

    if !view.details.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border)
            .padding(Padding::new(2, 2, 1, 1));
        let area = Rect {
            width: box_width.min(chunks[3].width),
            ..chunks[3]
        };
        frame.render_widget(Paragraph::new(view.details.clone()).block(block), area);
    }

    if let Some(activity) = &view.activity {
        frame.render_widget(
            Paragraph::new(vec![Line::default(), activity.clone()]),
            chunks[4],
        );
    }

    let mut footer = vec![Line::default()];
    footer.extend(view.footer.iter().cloned());
    frame.render_widget(Paragraph::new(footer), chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(30)), "30s");
        assert_eq!(format_interval(Duration::from_secs(90)), "90s");
        assert_eq!(format_interval(Duration::from_secs(120)), "2m");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let formatted = format_timestamp(1_700_000_000_000);
        // Weekday, month, day then 12-hour clock; exact values depend on local TZ.
        assert!(formatted.ends_with(" AM") || formatted.ends_with(" PM"), "{formatted}");
        assert_eq!(formatted.split(' ').count(), 5, "{formatted}");
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), "unknown");
    }
}
