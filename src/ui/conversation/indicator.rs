use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Animated "assistant is typing" line shown while a reply is pending
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadingIndicator {
    frame: usize,
}

impl LoadingIndicator {
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }

    fn dots(&self) -> &'static str {
        match self.frame % 4 {
            0 => "●∙∙",
            1 => "∙●∙",
            2 => "∙∙●",
            _ => "∙●∙",
        }
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let line = Line::from(vec![
            Span::styled(self.dots(), Style::default().fg(Color::Gray)),
            Span::styled(" thinking", Style::default().fg(Color::DarkGray)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
