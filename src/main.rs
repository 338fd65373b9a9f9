mod app;
mod fetch;
mod tmdb;
mod ui;

use app::{App, DetailsOverlay, Focus, InputMode, PagePhase};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fetch::{FetchOutcome, Fetcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tmdb::{MediaType, TmdbClient};
use tokio::sync::mpsc::UnboundedReceiver;

/// Shipped fallback key, kept from the original client. Prefer passing your
/// own via --api-key or TMDB_API_KEY.
const DEFAULT_API_KEY: &str = "dd6a1c2659ff600488f3594f684456ce";

/// Input poll timeout. Also bounds how late a debounce deadline can fire.
const TICK: Duration = Duration::from_millis(100);

/// TUI browser for movies and TV series from the TMDB catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TMDB API key
    #[arg(short, long, env = "TMDB_API_KEY")]
    api_key: Option<String>,

    /// Append tracing output to this file (logging is off when unset)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let api_key = cli.api_key.unwrap_or_else(|| DEFAULT_API_KEY.to_string());
    let client = Arc::new(TmdbClient::new(api_key).map_err(|e| e.user_message())?);

    let (fetcher, rx) = Fetcher::new(client);
    let mut app = App::new(fetcher);
    app.init();

    // Init terminal
    let mut terminal = ratatui::init();

    // Main loop
    let result = run_app(&mut terminal, &mut app, rx).await;

    // Restore terminal
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Tracing goes to a file: the TUI owns the terminal while raw mode is on.
fn init_tracing(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    mut outcomes: UnboundedReceiver<FetchOutcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Apply everything the fetch tasks have settled since the last pass.
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply_outcome(outcome);
        }

        // Fire the search lookup once the query has been quiescent long enough.
        app.search_tick(Instant::now());

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key);
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = true;
        return;
    }

    if app.overlay.is_some() {
        handle_overlay_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Searching => handle_search_key(app, key),
        InputMode::Normal => handle_browse_key(app, key),
    }
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.dismiss_overlay();
        }
        KeyCode::Char('o') => {
            if matches!(app.overlay, Some(DetailsOverlay::Ready { .. })) {
                app.open_overlay_in_browser();
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.dismiss_search();
        }
        KeyCode::Enter => {
            if app.search.open {
                app.select_search_result();
            } else {
                app.dismiss_search();
            }
        }
        KeyCode::Down => {
            app.search_next();
        }
        KeyCode::Up => {
            app.search_prev();
        }
        KeyCode::Backspace => {
            app.search_backspace();
        }
        KeyCode::Char(c) => {
            app.search_push(c);
        }
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.start_search();
        }
        KeyCode::Char('1') => {
            app.switch_page(MediaType::Movie);
        }
        KeyCode::Char('2') => {
            app.switch_page(MediaType::Series);
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            if app.focus == Focus::Genres {
                app.genre_cursor_left();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.focus == Focus::Genres {
                app.genre_cursor_right();
            }
        }
        KeyCode::Enter => {
            if app.focus == Focus::Genres {
                app.select_genre_at_cursor();
            } else {
                app.open_focused_details();
            }
        }
        KeyCode::Char('r') => {
            // On a failed page this is the full reload (movies page only);
            // otherwise it resets the genre filter to the default.
            if matches!(app.page().phase, PagePhase::Failed(_)) {
                if app.active == MediaType::Movie {
                    app.retry_page();
                }
            } else {
                app.reset_genre();
            }
        }
        KeyCode::Char('o') => {
            app.open_focused_in_browser();
        }
        _ => {}
    }
}
