//! coursedeck - Terminal Course Catalog
//!
//! Browse a course catalog loaded from a JSON file or URL, filter it by
//! category, sort it by rating, price or title, page through the results and
//! register for a course through a validated sign-up form.

use std::io;
use std::time::Instant;

use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing::info;

use coursedeck::application::{App, AppMode};
use coursedeck::domain::{Course, LoadError, LoadResult};
use coursedeck::infrastructure::{Config, LogConfig, init_logging, source_for, spawn_loader};
use coursedeck::presentation::{InputHandler, render_ui};

/// Entry point for the coursedeck terminal application.
///
/// Parses the command line, starts the one-shot course load in the
/// background, sets up the terminal and runs the event loop until the user
/// quits.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened, if terminal setup
/// fails, or if the terminal interface fails during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(&LogConfig::from_verbosity(config.verbose, config.log_file.clone()))?;
    info!(source = %config.source, per_page = config.per_page, "starting coursedeck");

    let loader = spawn_loader(source_for(&config.source));
    let mut app = App::with_settings(config.items_per_page(), config.timings());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, loader);
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Applies the course load result once it arrives, advances registration
/// timers, redraws, and waits for input no longer than the next timer
/// deadline. Continues until the user presses 'q' while browsing.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    loader: Receiver<LoadResult<Vec<Course>>>,
) -> io::Result<()> {
    let mut loader = Some(loader);

    loop {
        if let Some(rx) = &loader {
            match rx.try_recv() {
                Ok(result) => {
                    app.catalog.apply_load_result(result);
                    loader = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    app.catalog.apply_load_result(Err(LoadError::Transport(
                        "loader stopped before delivering courses".to_string(),
                    )));
                    loader = None;
                }
            }
        }

        app.tick(Instant::now());
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.mode == AppMode::Browse => return Ok(()),
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }
    }
}
