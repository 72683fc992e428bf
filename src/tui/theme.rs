use ratatui::style::{Color, Modifier, Style};

/// Read-only style table, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub label: Style,
    pub value: Style,
    pub status_unassigned: Style,
    pub status_assigned: Style,
    pub status_assigned_dim: Style,
    pub border: Style,
    pub error: Style,
    pub help: Style,
    pub time: Style,
    pub spinner: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let bold = Modifier::BOLD;
        Self {
            title: Style::default()
                .fg(Color::Indexed(229))
                .bg(Color::Indexed(57))
                .add_modifier(bold),
            label: Style::default().fg(Color::Indexed(252)).add_modifier(bold),
            value: Style::default().fg(Color::Indexed(252)),
            status_unassigned: Style::default().fg(Color::Indexed(196)).add_modifier(bold),
            status_assigned: Style::default().fg(Color::Indexed(46)).add_modifier(bold),
            status_assigned_dim: Style::default().fg(Color::Indexed(22)).add_modifier(bold),
            border: Style::default().fg(Color::Indexed(62)),
            error: Style::default().fg(Color::Indexed(196)),
            help: Style::default().fg(Color::Indexed(241)),
            time: Style::default()
                .fg(Color::Indexed(245))
                .add_modifier(Modifier::ITALIC),
            spinner: Style::default().fg(Color::Indexed(205)),
        }
    }
}
