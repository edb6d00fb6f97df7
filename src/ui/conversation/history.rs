//! Scrolling message list

use crate::events::{Author, Message};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use std::cell::Cell;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Append-only conversation shown oldest first
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: Vec<Message>,
    /// Rows scrolled up from the bottom; 0 follows the newest message
    scroll: usize,
    /// Furthest scroll the last render allowed; `None` before the first render
    max_scroll: Cell<Option<usize>>,
}

/// One wrapped row of a message bubble
struct Row {
    text: String,
    author: Option<Author>,
    header: bool,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new message and jump back to the bottom
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_to_bottom();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn scroll_limit(&self) -> usize {
        self.max_scroll.get().unwrap_or(usize::MAX)
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_add(rows).min(self.scroll_limit());
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll = self.scroll.min(self.scroll_limit()).saturating_sub(rows);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = 0;
    }

    fn rows(&self, width: usize) -> Vec<Row> {
        let bubble_width = (width * 4 / 5).max(1);
        let mut rows = Vec::new();

        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                rows.push(Row { text: String::new(), author: None, header: false });
            }
            let who = if message.is_user() { "You" } else { "Assistant" };
            rows.push(Row {
                text: format!("{} · {}", who, message.timestamp.format("%H:%M")),
                author: Some(message.author),
                header: true,
            });
            for line in wrap_text(&message.text, bubble_width) {
                rows.push(Row { text: line, author: Some(message.author), header: false });
            }
        }

        rows
    }
}

impl Widget for &ConversationHistory {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let rows = self.rows(area.width as usize);
        let height = area.height as usize;
        let max_scroll = rows.len().saturating_sub(height);
        self.max_scroll.set(Some(max_scroll));
        let end = rows.len() - self.scroll.min(max_scroll);
        let start = end.saturating_sub(height);

        for (i, row) in rows[start..end].iter().enumerate() {
            let style = match (row.author, row.header) {
                (_, true) => Style::default().fg(Color::DarkGray),
                (Some(Author::User), false) => Style::default().fg(Color::White).bg(Color::Blue),
                (Some(Author::Assistant), false) => Style::default().fg(Color::Gray),
                (None, false) => Style::default(),
            };

            let line = Line::from(Span::styled(row.text.as_str(), style));
            let x = match row.author {
                Some(Author::User) => area.x + area.width.saturating_sub(line.width() as u16),
                _ => area.x,
            };
            buf.set_line(x, area.y + i as u16, &line, area.width - (x - area.x));
        }
    }
}

/// Word-wrap `text` to `width` terminal columns, keeping explicit line breaks
/// and hard-splitting words that are longer than a line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for mut word in paragraph.split_whitespace() {
            while word.width() > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let split = fitting_prefix(word, width);
                if split == word.len() {
                    // a single glyph wider than the line
                    break;
                }
                let (head, rest) = word.split_at(split);
                lines.push(head.to_string());
                word = rest;
            }

            let word_width = word.width();
            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current_width += word_width;
            current.push_str(word);
        }

        lines.push(current);
    }

    lines
}

/// Byte length of the longest prefix of `word` that fits in `width` columns.
/// Always at least one character, so a glyph wider than the line still moves on.
fn fitting_prefix(word: &str, width: usize) -> usize {
    let mut used = 0;
    for (i, c) in word.char_indices() {
        used += c.width().unwrap_or(0);
        if used > width {
            return if i == 0 { c.len_utf8() } else { i };
        }
    }
    word.len()
}
