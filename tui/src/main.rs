//! Samvaad TUI Entry Point
//!
//! Shows the conference landing page in the terminal.
//!
//! Keys:
//!   j/k, arrows, PgUp/PgDn  scroll
//!   m                       menu (narrow terminals)
//!   1-9                     jump to a section
//!   Tab/Shift-Tab           committee tabs
//!   Enter                   reveal the active committee
//!   p                       pause autoplay
//!   s                       show or hide the secretariat
//!   q/Esc                   quit
//!
//! Environment:
//!   SAMVAAD_CONFIG          config file path
//!   SAMVAAD_BREAKPOINT etc  configuration overrides
//!   RUST_LOG                log filter (logs go to stderr)

use std::io::{self, IsTerminal};
use std::panic;

use anyhow::Context;
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use samvaad_tui::signals::{CellMetrics, TerminalSignals};
use samvaad_tui::App;
use shell_core::config::{default_config_path, load_config_from_path};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: samvaad-tui requires a terminal (TTY)");
        eprintln!("Use shell-replay to drive the shell without one.");
        std::process::exit(1);
    }

    let config_path = std::env::var_os("SAMVAAD_CONFIG")
        .map(Into::into)
        .or_else(default_config_path);
    let config = load_config_from_path(config_path).context("Failed to load configuration")?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal::size()?;
    let signals = TerminalSignals::new(size.0, CellMetrics::default());
    let mut app = App::new(config.shell, config.content, signals, size);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
