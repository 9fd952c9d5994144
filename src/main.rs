//! Main entry point for termfolio.
//!
//! This file initializes logging and the TUI terminal, creates the
//! application state, runs the main event loop, and restores the terminal
//! on exit.

use std::sync::Arc;

use anyhow::Result;
use termfolio::app::App;
use termfolio::config::Settings;
use termfolio::mail::{EmailJsRelay, MailRelay};
use termfolio::utils;
use termfolio::utils::guard::DropGuard;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before anything else, the guard flushes on exit
    let _log_guard = utils::logger::init_logging();

    let settings = Settings::load();
    let relay: Arc<dyn MailRelay> = Arc::new(EmailJsRelay::new(&settings.emailjs)?);

    let mut terminal = ratatui::init();
    // restores the terminal on both normal exit and panic
    let _restore = DropGuard::new(ratatui::restore);

    let mut app = App::new(settings, relay);
    // draw 1st frame
    app.draw(&mut terminal)?;
    // run event-driven main loop of app
    app.run(&mut terminal).await
}
