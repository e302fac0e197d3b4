//! hn-intel-feed — a live, fading Hacker News feed for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  PollMsg   ┌──────────┐  draw()  ┌──────────┐
//! │  poll.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread) │  (channel) │ (state)  │          │ (render) │
//! └──────────┘            └──────────┘          └──────────┘
//!   │     │                    ▲
//!   │     │                    │ handle_*_event()
//!   ▼     ▼               ┌──────────┐
//! source/ classifier      │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`source/`** — the `StorySource` trait and the Hacker News client.
//! * **`classifier`** — runs the local model and parses its verdict.
//! * **`feed`** — the bounded, newest-first buffer and its fade rendering.
//! * **`poll`** — background thread that owns the feed and runs cycles.
//! * **`markup`** — turns the feed's color tags into styled text.
//! * **`app`** — UI-side state (latest snapshot, scroll, status).
//! * **`ui`** — pure rendering of the single feed pane.
//! * **`input`** — maps key and mouse events to `App` mutations.
//! * **`main`** — wires everything together and runs the event loop.

mod app;
mod classifier;
mod config;
mod error;
mod feed;
mod input;
mod markup;
mod poll;
mod source;
mod ui;

use std::fs::File;
use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use app::App;
use classifier::{Classify, CommandClassifier};
use config::Config;
use poll::Poller;
use source::HackerNewsSource;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Holds raw mode, the alternate screen and mouse capture for as long as
/// it lives, and restores the terminal when dropped.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default hook prints a panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send tracing output to `path`.  `RUST_LOG` overrides the default filter.
fn init_logging(path: &str) -> Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hn_intel_feed=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(file)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    install_panic_hook();

    let config = Config::default();
    if let Err(e) = init_logging(&config.log_file) {
        eprintln!("logging disabled: {e}");
    }

    // -- wire the poller -----------------------------------------------------
    let source = HackerNewsSource::new(&config);
    let classifier: Option<Box<dyn Classify>> = if config.classify {
        Some(Box::new(CommandClassifier::new(&config)))
    } else {
        warn!("classification disabled; stories will be unrated");
        None
    };
    let poller = Poller::new(
        Box::new(source),
        classifier,
        config.max_entries,
        config.stories_per_cycle,
    );

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();

    info!(interval = ?config.poll_interval, "starting poller");
    let rx = poll::spawn(poller, config.poll_interval);

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Drain any messages from the poller.
    //   2. Render the UI.
    //   3. Poll for keyboard / mouse input (up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => input::handle_key_event(&mut app, key),
                Event::Mouse(mouse) => input::handle_mouse_event(&mut app, mouse),
                _ => {}
            }
        }

        if app.quit {
            break;
        }
    }

    info!("shutting down");
    Ok(())
}
