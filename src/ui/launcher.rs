use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

/// Toggle button shown in the corner while the panel is closed
#[derive(Debug, Clone, Copy, Default)]
pub struct Launcher {
    /// A reply arrived while the panel was closed
    pub unread: bool,
}

impl Widget for Launcher {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let style = Style::default().fg(Color::White).bg(Color::Blue);
        let mut spans = vec![Span::styled("💬 Chat", style.add_modifier(Modifier::BOLD))];
        if self.unread {
            spans.push(Span::styled(" •", Style::default().fg(Color::Yellow).bg(Color::Blue)));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }
}
