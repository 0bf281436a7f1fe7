//! BLOCKFALL - a falling-block puzzle for the terminal

use blockfall::game::{Game, GameEvent};
use blockfall::input::{Input, InputMapper};
use blockfall::settings::Settings;
use blockfall::ui::{self, Screen};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: Could not create {}: {}", dir.display(), e);
    }
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Log to a file so the terminal UI stays clean
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    match &result {
        Ok(Some(score)) => {
            println!("\nThanks for playing BLOCKFALL!");
            println!("Final Score: {}", score);
        }
        Ok(None) => println!("\nThanks for playing BLOCKFALL!"),
        Err(e) => tracing::error!("Terminal error: {}", e),
    }

    result.map(|_| ())
}

/// Event loop. Returns the last final score, if any game ended
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Option<u64>> {
    let mapper = InputMapper::from_settings(settings);
    let mut game = Game::new(settings.game_config());
    let mut screen = Screen::Title;
    let mut last_score: Option<u64> = None;
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, &game.snapshot(), settings, screen))?;

        // Input and gravity share this one loop, handled in arrival order
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                match mapper.map(key) {
                    Some(Input::Quit) => return Ok(last_score),
                    Some(Input::Start) if screen == Screen::Title || game.is_over() => {
                        game.start();
                        screen = Screen::Playing;
                    }
                    Some(Input::Command(command)) if screen == Screen::Playing => {
                        game.process_command(command);
                    }
                    _ => {}
                }
            }
        }

        let now = Instant::now();
        if screen == Screen::Playing {
            game.update(now - last_frame);
        }
        last_frame = now;

        for event in game.take_events() {
            match event {
                GameEvent::Merged { rows_cleared, points } if rows_cleared > 0 => {
                    tracing::debug!("Cleared {} rows for {} points", rows_cleared, points);
                }
                GameEvent::Merged { .. } => {}
                GameEvent::GameOver { final_score } => {
                    tracing::info!("Session ended with score {}", final_score);
                    last_score = Some(final_score);
                }
            }
        }
    }
}
