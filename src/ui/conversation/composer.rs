use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Result returned when the user interacts with the composer
#[derive(Debug, PartialEq)]
pub enum ComposerResult {
    Submitted(String),
    None,
}

/// Single-line input at the bottom of the panel
#[derive(Debug, Clone)]
pub struct ConversationComposer {
    content: String,
    /// Cursor position in chars, not bytes
    cursor: usize,
    placeholder: String,
    enabled: bool,
}

impl ConversationComposer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
            enabled: true,
        }
    }

    /// Handle key input. Ignored entirely while disabled.
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerResult {
        if key.kind != KeyEventKind::Press || !self.enabled {
            return ComposerResult::None;
        }

        match key.code {
            KeyCode::Enter => {
                if !self.content.trim().is_empty() {
                    return ComposerResult::Submitted(self.take());
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.content.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.content.remove(at);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.char_count();
            }
            _ => {}
        }

        ComposerResult::None
    }

    /// Insert pasted or typed text at the cursor
    pub fn insert_str(&mut self, text: &str) {
        if !self.enabled {
            return;
        }
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Take the draft, leaving the composer empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl Widget for &ConversationComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.enabled {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let line = if !self.enabled {
            Line::from(Span::styled("Waiting for reply...", Style::default().fg(Color::DarkGray)))
        } else if self.content.is_empty() {
            Line::from(vec![
                Span::styled("▌", Style::default().fg(Color::Blue)),
                Span::styled(self.placeholder.as_str(), Style::default().fg(Color::DarkGray)),
            ])
        } else {
            // Keep the cursor visible by dropping chars off the left edge.
            let width = inner.width as usize;
            let chars: Vec<char> = self.content.chars().collect();
            let start = (self.cursor + 1).saturating_sub(width);
            let before: String = chars[start..self.cursor].iter().collect();
            let after: String = chars[self.cursor..].iter().collect();
            Line::from(vec![
                Span::raw(before),
                Span::styled("▌", Style::default().fg(Color::Blue)),
                Span::raw(after),
            ])
        };

        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
