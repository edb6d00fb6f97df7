//! Full-screen terminal host for the floating chat widget

use crate::api::ApiClient;
use crate::config::Config;
use crate::events::PanelEvent;
use crate::router::Router;
use crate::ui::layout::{launcher_area, panel_area};
use crate::ui::{ChatPanel, Launcher, PanelAction};
use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use tokio::time::{interval, Duration};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Host screen plus the chat widget floating over it
pub struct App {
    panel: ChatPanel,
    unread: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let client = ApiClient::new(config)?;
        let router = Router::standard(&client);
        Ok(Self {
            panel: ChatPanel::new(router, client, &config.ui),
            unread: false,
            should_quit: false,
        })
    }

    pub fn panel(&self) -> &ChatPanel {
        &self.panel
    }

    /// Route a key to the panel or the host screen
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('o') if ctrl => self.toggle_panel(),
            _ if self.panel.is_open() => {
                if self.panel.handle_key(key) == PanelAction::Exit {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_panel(),
            _ => {}
        }
    }

    fn toggle_panel(&mut self) {
        self.panel.toggle();
        if self.panel.is_open() {
            self.unread = false;
        }
    }

    /// A reply finished in the background
    pub fn on_reply(&mut self, event: PanelEvent) {
        self.panel.apply(event);
        if !self.panel.is_open() {
            self.unread = true;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn render(&self, frame: &mut Frame) {
        let screen = frame.size();
        render_host(frame, screen);

        if self.panel.is_open() {
            frame.render_widget(&self.panel, panel_area(screen));
        } else {
            frame.render_widget(Launcher { unread: self.unread }, launcher_area(screen));
        }
    }
}

fn render_host(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("finbot", Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from("Your AI financial assistant lives in the corner."),
        Line::from(""),
        Line::from(Span::styled(
            "Ctrl+O open/close chat · Enter send · PgUp/PgDn scroll · Esc close · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let host = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" finbot "));
    frame.render_widget(host, area);
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Undo the screen modes `setup_terminal` switched on
fn leave_screen<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, DisableBracketedPaste, LeaveAlternateScreen)
}

fn restore_terminal(terminal: &mut Tui) {
    let _ = disable_raw_mode();
    let _ = leave_screen(terminal.backend_mut());
    let _ = terminal.show_cursor();
}

/// Run the terminal UI until the user quits
pub async fn run(config: Config) -> Result<()> {
    let mut app = App::new(&config)?;
    let mut terminal = setup_terminal()?;

    // Leave the alternate screen before a panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
        default_hook(info);
    }));

    tracing::info!(model = %config.model, "terminal UI started");
    let result = event_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal);
    tracing::info!("terminal UI stopped");
    result
}

async fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = interval(Duration::from_millis(250));

    terminal.draw(|f| app.render(f))?;

    while !app.should_quit() {
        tokio::select! {
            _ = ticker.tick() => {
                if app.panel().is_loading() {
                    app.panel.tick();
                    terminal.draw(|f| app.render(f))?;
                }
            }

            Some(event) = app.panel.next_event() => {
                app.on_reply(event);
                terminal.draw(|f| app.render(f))?;
            }

            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(Event::Paste(text))) => {
                        if app.panel.is_open() {
                            app.panel.handle_paste(&text);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => break,
                }
                terminal.draw(|f| app.render(f))?;
            }
        }
    }

    Ok(())
}
