// ABOUTME: Main entry point for stepwise with TUI and CLI support
//
// Binary: stepwise
// Usage: stepwise [--config PATH] [--allow-skip] [COMMAND]
// - No command: runs the wizard in the terminal
// - show: print saved progress
// - clear: delete saved progress
// - steps: list configured steps and rules

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

use stepwise::app::{AppState, EventHandler};
use stepwise::components::LayoutComponent;
use stepwise::config::WizardConfig;
use stepwise::persistence::SnapshotStore;

mod cli;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();

    let mut config = WizardConfig::load(args.config.as_deref())?;
    if args.allow_skip {
        config.allow_skip_steps = true;
    }

    let result = match args.command {
        Some(cli::Commands::Show) => cli::snapshot::show(&config, args.format),
        Some(cli::Commands::Clear) => cli::snapshot::clear(&config),
        Some(cli::Commands::Steps) => cli::steps::execute(&config, args.format),

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => run_tui(config),
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

fn run_tui(config: WizardConfig) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    let definition = config.definition()?;
    let store = match config.persistence.store() {
        Ok(store) => store.map(|s| Box::new(s) as Box<dyn SnapshotStore>),
        Err(e) => {
            // Run without saving rather than refusing to start
            tracing::warn!("Snapshot storage unavailable: {}", e);
            None
        }
    };
    tracing::info!(
        steps = definition.total_steps(),
        persistence = store.is_some(),
        "Starting wizard '{}'",
        definition.title
    );

    let mut state = AppState::new(config, definition, store);
    let mut layout = LayoutComponent::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure terminal cleanup happens even if there's an error
    let result = run_tui_loop(&mut state, &mut layout, &mut terminal);

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

fn run_tui_loop(
    state: &mut AppState,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Windows reports releases too
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, state) {
                        EventHandler::process_event(app_event, state);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            state.tick(Instant::now());
            last_tick = Instant::now();
        }

        if state.should_quit {
            tracing::info!(
                step = state.controller.current_step(),
                complete = state.controller.is_complete(),
                "Leaving wizard"
            );
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::home_dir()
        .map(|home| home.join(".stepwise").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".stepwise/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "stepwise-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // Logging is best effort; the wizard still runs without a log file
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepwise=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
