use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::router::Route;
use crate::ui::theme::{GITHUB_BLUE, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_PENDING};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    /// Title, current route, and a marker while any request is in flight.
    pub fn widget(&self, route: &Route, fetching: bool) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "GitHub Profiles",
                Style::default().fg(GITHUB_BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(route.path(), text_style),
        ];
        if fetching {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled("fetching…", Style::default().fg(STATUS_PENDING)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
