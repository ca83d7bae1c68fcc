mod app;
mod config;
mod event;
mod firmware;
mod grid;
mod pattern;
mod snapshot;
mod ui;
mod units;

use std::fs::File;
use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Args;
use event::{Event, EventHandler};
use pattern::gemini::GeminiInterpreter;
use snapshot::Snapshot;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let interpreter = GeminiInterpreter::new(&args.api_base, &args.model, args.api_key.clone())
        .context("failed to build the pattern client")?;
    let snapshot = Snapshot::new(args.state_path());
    tracing::info!(state = %snapshot.path().display(), ip = %args.ip, "starting");

    let mut app = App::new(
        snapshot,
        args.hardware(),
        Arc::new(interpreter),
        args.blink_interval(),
        Instant::now(),
    );

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)
        .context("failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, args.tick_ms);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    app.flush(Instant::now());
    tracing::info!("exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_ms: u64,
) -> anyhow::Result<()> {
    let event_handler = EventHandler::new(tick_ms);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(Instant::now()),
            Event::Key(key) => app.on_key(key, Instant::now()),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::FocusLost => app.on_focus_lost(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let path = args.log_path();
    let file = File::create(&path).with_context(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
