//! Intro pane: a short banner, a delayed boot line and the small command table.

use std::time::Duration;

use ratatui::prelude::{Buffer, Rect};
use ratatui::widgets::Widget;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::Settings;
use crate::engine::{ShellEngine, HERO_VOCABULARY};
use crate::event::AppEvent;
use crate::session::{Deferred, TranscriptEntry};
use crate::ui::terminal::{RevealPolicy, TuiTerminal};

pub struct TuiHero {
    terminal: TuiTerminal,
    boot: Deferred<AppEvent>,
    boot_delay: Duration,
}

impl TuiHero {
    /// Print the banner and arm the boot timer. Needs a tokio runtime.
    pub fn new(engine: &ShellEngine, settings: &Settings, sink: UnboundedSender<AppEvent>) -> Self {
        let mut terminal = TuiTerminal::new(HERO_VOCABULARY, RevealPolicy::All, settings.typing_tick());
        let stagger = settings.banner_stagger();
        terminal.reset(
            engine
                .hero_banner()
                .into_iter()
                .enumerate()
                .map(|(i, line)| TranscriptEntry::banner(line, stagger.saturating_mul(i as u32)))
                .collect(),
        );

        let boot_delay = settings.hero_boot_delay();
        let mut boot = Deferred::new(sink);
        boot.schedule(boot_delay, AppEvent::HeroBoot);

        Self {
            terminal,
            boot,
            boot_delay,
        }
    }

    /// The boot timer fired. The line waits as long again before it types.
    pub fn on_boot(&mut self, line: String) {
        self.terminal.push(TranscriptEntry::banner(line, self.boot_delay));
    }

    pub fn terminal(&self) -> &TuiTerminal {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }
}

impl Widget for &TuiHero {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.terminal.render(area, buf);
    }
}
