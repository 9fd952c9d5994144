//! Application state and main loop.
//!
//! `App` owns the four panes, the shell engine and the two event sources.
//! One pane is visible at a time; Ctrl+B enters command mode for app-level
//! keys (pane switching, quit, language, clipboard).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::Settings;
use crate::engine::{ShellEngine, SHELL_VOCABULARY};
use crate::event::{chat as chat_event, contact as contact_event, terminal as terminal_event};
use crate::event::{init_app_eventsource, init_user_event, AppEvent, UserEvent};
use crate::i18n::{self, Language};
use crate::mail::MailRelay;
use crate::session::TranscriptEntry;
use crate::ui::chat::TuiChat;
use crate::ui::contact::TuiContact;
use crate::ui::hero::TuiHero;
use crate::ui::layout::AppLayout;
use crate::ui::terminal::{RevealPolicy, TuiTerminal};
use crate::utils::{clipboard, links};

/// Entries of the terminal pane that type themselves out.
const TERMINAL_TYPING_ENTRIES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Hero,
    Terminal,
    Chat,
    Contact,
}

impl ActivePane {
    pub const ALL: [ActivePane; 4] = [
        ActivePane::Hero,
        ActivePane::Terminal,
        ActivePane::Chat,
        ActivePane::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ActivePane::Hero => "HOME",
            ActivePane::Terminal => "TERMINAL",
            ActivePane::Chat => "CHAT",
            ActivePane::Contact => "CONTACT",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ActivePane::Hero => ActivePane::Terminal,
            ActivePane::Terminal => ActivePane::Chat,
            ActivePane::Chat => ActivePane::Contact,
            ActivePane::Contact => ActivePane::Hero,
        }
    }
}

/// Welcome entries for the terminal pane, staggered one after another.
fn terminal_banner(engine: &ShellEngine, settings: &Settings) -> Vec<TranscriptEntry> {
    let stagger = settings.banner_stagger();
    engine
        .banner()
        .into_iter()
        .enumerate()
        .map(|(i, line)| TranscriptEntry::banner(line, stagger.saturating_mul(i as u32)))
        .collect()
}

pub struct App {
    // backend
    engine: ShellEngine,
    settings: Settings,
    preferences_path: PathBuf,

    // frontend widgets, public to the ui module
    pub(in super) tui_hero: TuiHero,
    pub(in super) tui_terminal: TuiTerminal,
    pub(in super) tui_chat: TuiChat,
    pub(in super) tui_contact: TuiContact,

    // App State
    active_pane: ActivePane,
    exit: bool,
    command_mode: bool,
    force_redraw_flag: bool,
    /// One-line message in the status bar, cleared by the next key.
    notice: Option<String>,

    layout: AppLayout,

    // events sources
    user_events: Receiver<std::io::Result<UserEvent>>,
    app_events: UnboundedReceiver<AppEvent>,
    animation: Interval,
}

impl App {
    pub fn new(settings: Settings, relay: Arc<dyn MailRelay>) -> Self {
        Self::with_user_events(settings, relay, init_user_event())
    }

    /// Build the app around an existing input stream. Needs a tokio runtime.
    pub fn with_user_events(
        settings: Settings,
        relay: Arc<dyn MailRelay>,
        user_events: Receiver<std::io::Result<UserEvent>>,
    ) -> Self {
        let (event_sink, app_events) = init_app_eventsource();

        let preferences_path = settings.preferences_path();
        let lang = i18n::load_language(&preferences_path).unwrap_or_default();
        info!("Starting with language {}", lang.code());
        let engine = ShellEngine::new(lang);

        let tick = settings.typing_tick();
        let mut tui_terminal = TuiTerminal::new(SHELL_VOCABULARY, RevealPolicy::Newest(TERMINAL_TYPING_ENTRIES), tick);
        tui_terminal.reset(terminal_banner(&engine, &settings));

        let mut animation = tokio::time::interval(tick);
        animation.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            tui_hero: TuiHero::new(&engine, &settings, event_sink.clone()),
            tui_terminal,
            tui_chat: TuiChat::new(settings.chat_delay(), event_sink.clone()),
            tui_contact: TuiContact::new(relay, settings.success_display(), lang, event_sink),
            engine,
            settings,
            preferences_path,
            active_pane: ActivePane::Hero,
            exit: false,
            command_mode: false,
            force_redraw_flag: false,
            notice: None,
            layout: AppLayout::default(),
            user_events,
            app_events,
            animation,
        }
    }

    pub fn get_active_pane(&self) -> ActivePane {
        self.active_pane
    }

    pub fn switch_pane(&mut self, pane: ActivePane) {
        self.active_pane = pane;
        if pane == ActivePane::Chat {
            self.tui_chat.on_open(i18n::t(self.language(), "chat_hint"));
        }
    }

    pub fn next_pane(&mut self) {
        self.switch_pane(self.active_pane.next());
    }

    pub fn get_command_mode(&self) -> bool {
        self.command_mode
    }

    pub fn set_command_mode(&mut self, flag: bool) {
        self.command_mode = flag;
    }

    pub fn language(&self) -> Language {
        self.engine.language()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Switch to the next language, persist it and re-print the terminal banner.
    pub fn cycle_language(&mut self) {
        let lang = self.language().next();
        self.engine.set_language(lang);
        self.tui_contact.set_language(lang);
        self.tui_terminal.reset(terminal_banner(&self.engine, &self.settings));

        match i18n::save_language(&self.preferences_path, lang) {
            Ok(()) => self.notice = Some(format!("Language: {}", lang.display_name())),
            Err(e) => {
                warn!("Language preference not saved: {:#}", e);
                self.notice = Some(format!("Language: {} (not saved)", lang.display_name()));
            }
        }
    }

    /// Plain text of whatever the active pane shows.
    pub fn active_pane_text(&self) -> String {
        match self.active_pane {
            ActivePane::Hero => self.tui_hero.terminal().to_plain_text(),
            ActivePane::Terminal => self.tui_terminal.to_plain_text(),
            ActivePane::Chat => self.tui_chat.to_plain_text(),
            ActivePane::Contact => self.tui_contact.to_plain_text(),
        }
    }

    fn copy_active_pane(&mut self) {
        let text = self.active_pane_text();
        self.notice = Some(match clipboard::copy_to_clipboard(&text) {
            Ok(()) => "Copied to clipboard".to_string(),
            Err(e) => {
                warn!("{:#}", e);
                "Clipboard unavailable".to_string()
            }
        });
    }

    /// A failed launch is only logged; the pane already shows its confirmation.
    fn open_link(&self, url: &str) {
        if let Err(e) = links::open(url) {
            warn!("{:#}", e);
        }
    }

    fn is_animating(&self) -> bool {
        let now = Instant::now();
        match self.active_pane {
            ActivePane::Hero => self.tui_hero.terminal().is_animating(now),
            ActivePane::Terminal => self.tui_terminal.is_animating(now),
            ActivePane::Chat | ActivePane::Contact => false,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            if self.exit {
                break Ok(());
            }
            let animating = self.is_animating();
            tokio::select! {
                res = self.user_events.recv() => {
                    let usr_evt = res.with_context(|| anyhow::anyhow!("User event stream is ended."))?;
                    self.handle_user_event(usr_evt?)?;
                }
                res = self.app_events.recv() => {
                    let app_evt = res.with_context(|| anyhow::anyhow!("App event stream is ended"))?;
                    self.handle_app_event(app_evt);
                }
                // redraw only, the typewriters read the clock themselves
                _ = self.animation.tick(), if animating => {}
            }
            if self.force_redraw_flag {
                self.force_redraw_flag = false;
                self.force_redraw(terminal)?;
            } else {
                self.draw(terminal)?;
            }
        }
    }

    pub fn draw(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            if self.layout.full_area != area {
                self.layout = AppLayout::build(area);
            }

            use ratatui::widgets::Widget;
            (&*self).render(area, frame.buffer_mut());
        })?;

        self.update_cursor_position(terminal)?;
        Ok(())
    }

    /// Clear the screen and draw everything again.
    pub fn force_redraw(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        terminal.clear()?;
        self.draw(terminal)?;
        Ok(())
    }

    pub fn layout(&self) -> &AppLayout {
        &self.layout
    }

    fn update_cursor_position(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        if self.get_command_mode() {
            terminal.hide_cursor()?;
            return Ok(());
        }

        let area = self.layout.pane;
        let position = match self.active_pane {
            ActivePane::Hero => self.tui_hero.terminal().cursor_position(area),
            ActivePane::Terminal => self.tui_terminal.cursor_position(area),
            ActivePane::Chat => self.tui_chat.cursor_position(area),
            ActivePane::Contact => self.tui_contact.cursor_position(area),
        };
        match position {
            Some(pos) => {
                terminal.show_cursor()?;
                terminal.set_cursor_position(pos)?;
            }
            None => terminal.hide_cursor()?,
        }
        Ok(())
    }
}

impl App {
    pub fn handle_user_event(&mut self, event: UserEvent) -> Result<()> {
        let UserEvent::Key(key_evt) = event else {
            // resize and focus changes are picked up by the next draw
            return Ok(());
        };
        if !matches!(key_evt.kind, KeyEventKind::Press) {
            return Ok(());
        }

        let ctrl = key_evt.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key_evt.code, KeyCode::Char('c') | KeyCode::Char('C')) {
            self.exit = true;
            return Ok(());
        }

        if self.command_mode {
            self.handle_command_mode_key(key_evt);
            return Ok(());
        }

        // Ctrl + B => Command Mode
        if ctrl && matches!(key_evt.code, KeyCode::Char('b') | KeyCode::Char('B')) {
            self.set_command_mode(true);
            return Ok(());
        }

        self.notice = None;
        match self.active_pane {
            ActivePane::Hero => {
                terminal_event::handle_hero_key_event(&mut self.tui_hero, &self.engine, key_evt);
            }
            ActivePane::Terminal => {
                if let Some(url) = terminal_event::handle_key_event(&mut self.tui_terminal, &mut self.engine, key_evt) {
                    self.open_link(url);
                }
            }
            ActivePane::Chat => chat_event::handle_key_event(&mut self.tui_chat, key_evt),
            ActivePane::Contact => contact_event::handle_key_event(&mut self.tui_contact, key_evt),
        }
        Ok(())
    }

    fn handle_command_mode_key(&mut self, key_evt: KeyEvent) {
        match key_evt.code {
            // n => next pane
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_pane(),
            // q => exit application
            KeyCode::Char('q') | KeyCode::Char('Q') => self.exit = true,
            // l => force redraw
            KeyCode::Char('l') | KeyCode::Char('L') => self.force_redraw_flag = true,
            // g => next language
            KeyCode::Char('g') | KeyCode::Char('G') => self.cycle_language(),
            // y => copy pane text
            KeyCode::Char('y') | KeyCode::Char('Y') => self.copy_active_pane(),
            _ => {}
        }
        self.set_command_mode(false);
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ChatReply { text } => self.tui_chat.on_reply(text),
            AppEvent::HeroBoot => {
                let line = self.engine.boot_line();
                self.tui_hero.on_boot(line);
            }
            AppEvent::MailDelivered => self.tui_contact.on_delivered(),
            AppEvent::MailFailed { reason } => self.tui_contact.on_failed(reason),
            AppEvent::ContactSuccessExpired => self.tui_contact.on_success_expired(),
        }
    }

    /// Wait for the next background event and apply it.
    pub async fn pump_app_event(&mut self) -> Result<()> {
        let event = self
            .app_events
            .recv()
            .await
            .context("App event stream is ended")?;
        self.handle_app_event(event);
        Ok(())
    }
}
