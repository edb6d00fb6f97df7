use crate::api::ApiClient;
use crate::config::UiConfig;
use crate::events::{Message, PanelEvent, PanelState};
use crate::router::Router;
use crate::ui::conversation::commands::{help_text, parse_slash_command, ParsedCommand, SlashCommand};
use crate::ui::conversation::composer::ComposerResult;
use crate::ui::conversation::{ConversationComposer, ConversationHistory, LoadingIndicator};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, BorderType, Borders, Clear, Widget},
};
use std::future::Future;
use tokio::sync::mpsc;

pub const TX_USAGE: &str = "Usage: /tx <transaction hash>";

const SCROLL_STEP: usize = 5;

/// Actions the panel asks the surrounding app to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    Exit,
}

/// The chat panel: message list, composer and the single outstanding request
pub struct ChatPanel {
    history: ConversationHistory,
    composer: ConversationComposer,
    router: Router,
    client: ApiClient,
    title: String,
    is_open: bool,
    is_loading: bool,
    frame: usize,
    reply_tx: mpsc::UnboundedSender<PanelEvent>,
    reply_rx: mpsc::UnboundedReceiver<PanelEvent>,
}

impl ChatPanel {
    pub fn new(router: Router, client: ApiClient, ui: &UiConfig) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let mut history = ConversationHistory::new();
        if !ui.greeting.trim().is_empty() {
            history.push(Message::assistant(ui.greeting.clone()));
        }

        Self {
            history,
            composer: ConversationComposer::new(ui.placeholder.clone()),
            router,
            client,
            title: ui.title.clone(),
            is_open: false,
            is_loading: false,
            frame: 0,
            reply_tx,
            reply_rx,
        }
    }

    pub fn state(&self) -> PanelState {
        match (self.is_open, self.is_loading) {
            (false, _) => PanelState::Closed,
            (true, false) => PanelState::OpenIdle,
            (true, true) => PanelState::OpenLoading,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn messages(&self) -> &[Message] {
        self.history.messages()
    }

    pub fn composer(&self) -> &ConversationComposer {
        &self.composer
    }

    pub fn open(&mut self) {
        if !self.is_open {
            tracing::debug!("chat panel opened");
            self.is_open = true;
        }
    }

    /// Hide the panel. A pending request keeps running.
    pub fn close(&mut self) {
        if self.is_open {
            tracing::debug!(loading = self.is_loading, "chat panel closed");
            self.is_open = false;
        }
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Advance the loading animation
    pub fn tick(&mut self) {
        if self.is_loading {
            self.frame = self.frame.wrapping_add(1);
        }
    }

    /// Handle a key while the panel is open
    pub fn handle_key(&mut self, key: KeyEvent) -> PanelAction {
        if key.kind != KeyEventKind::Press {
            return PanelAction::None;
        }

        match key.code {
            KeyCode::Esc => {
                self.close();
                PanelAction::None
            }
            KeyCode::PageUp => {
                self.history.scroll_up(SCROLL_STEP);
                PanelAction::None
            }
            KeyCode::PageDown => {
                self.history.scroll_down(SCROLL_STEP);
                PanelAction::None
            }
            _ => match self.composer.handle_key(key) {
                ComposerResult::Submitted(input) => self.submit(&input),
                ComposerResult::None => PanelAction::None,
            },
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.composer.insert_str(text);
    }

    /// Accept a user message.
    ///
    /// Blank input and anything sent while a reply is pending are ignored.
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, input: &str) -> PanelAction {
        if self.is_loading {
            tracing::debug!("submission ignored while a reply is pending");
            return PanelAction::None;
        }

        let text = input.trim();
        if text.is_empty() {
            return PanelAction::None;
        }

        if let Some(command) = parse_slash_command(text) {
            return self.run_command(command, text);
        }

        tracing::info!(chars = text.chars().count(), "user message submitted");
        self.history.push(Message::user(text));

        let router = self.router.clone();
        let text = text.to_string();
        self.start_request(async move { router.route(&text).await });
        PanelAction::None
    }

    fn run_command(&mut self, command: ParsedCommand, text: &str) -> PanelAction {
        tracing::info!(command = command.command.command(), "slash command");

        match command.command {
            SlashCommand::Tx => {
                self.history.push(Message::user(text));
                match command.argument() {
                    Some(hash) => {
                        let client = self.client.clone();
                        let hash = hash.to_string();
                        self.start_request(async move { client.transaction_status(&hash).await });
                    }
                    None => self.history.push(Message::assistant(TX_USAGE)),
                }
                PanelAction::None
            }
            SlashCommand::Help => {
                self.history.push(Message::user(text));
                let queries = self.router.table().queries();
                self.history.push(Message::assistant(help_text(&queries)));
                PanelAction::None
            }
            SlashCommand::Close => {
                self.close();
                PanelAction::None
            }
            SlashCommand::Quit => PanelAction::Exit,
        }
    }

    fn start_request<F>(&mut self, request: F)
    where
        F: Future<Output = String> + Send + 'static,
    {
        self.set_loading(true);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let reply = request.await;
            // The receiver only goes away when the panel is dropped.
            let _ = tx.send(PanelEvent::ReplyReady(reply));
        });
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.composer.set_enabled(!loading);
        self.frame = 0;
    }

    /// Wait for the next background event
    pub async fn next_event(&mut self) -> Option<PanelEvent> {
        self.reply_rx.recv().await
    }

    pub fn apply(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::ReplyReady(reply) => {
                tracing::debug!(chars = reply.chars().count(), "reply received");
                self.history.push(Message::assistant(reply));
                self.set_loading(false);
            }
        }
    }
}

impl Widget for &ChatPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue))
            .title(Line::from(Span::styled(
                format!(" {} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .title(
                Title::from(Span::styled(" Esc ✕ ", Style::default().fg(Color::DarkGray)))
                    .alignment(Alignment::Right),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        let indicator_height = if self.is_loading { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),                   // History
                Constraint::Length(indicator_height), // Loading
                Constraint::Length(3),                // Composer
            ])
            .split(inner);

        (&self.history).render(chunks[0], buf);
        if self.is_loading {
            LoadingIndicator::new(self.frame).render(chunks[1], buf);
        }
        (&self.composer).render(chunks[2], buf);
    }
}
