use std::env;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use torus_life::app::App;
use torus_life::app::Flow;
use torus_life::config::Config;
use torus_life::io::convert_event;

const DEFAULT_LOG_FILTER: &str = "torus_life=info";

/// `RUST_LOG` when it's set, our own info events otherwise
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

/// Logs go to a file, if at all, since stdout belongs to the grid
fn init_tracing(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn draw(stdout: &mut io::Stdout, frame: &str) -> io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in frame.lines() {
        queue!(
            stdout,
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            cursor::MoveToNextLine(1)
        )?;
    }

    stdout.flush()
}

fn run(app: &mut App, stdout: &mut io::Stdout, frametime: Duration) -> anyhow::Result<()> {
    loop {
        let t = Instant::now();

        // Handle everything that arrives within one frame
        let mut timeout = frametime;
        while event::poll(timeout)? {
            if let Some(event) = convert_event(event::read()?) {
                if app.handle(event)? == Flow::Exit {
                    return Ok(());
                }
            }

            timeout = frametime.saturating_sub(t.elapsed());
        }

        app.tick();

        let frame = app.frame(Instant::now());
        draw(stdout, &frame).context("Failed to draw frame")?;

        let time_left = frametime.saturating_sub(t.elapsed());
        thread::sleep(time_left);
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_file.as_deref())?;

    let mut app = App::new(&config).context("Failed to set up the simulation")?;

    info!(
        rows = config.rows,
        columns = config.columns,
        fps = config.fps,
        "starting"
    );

    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    )?;

    let res = run(&mut app, &mut stdout, config.frame_time());

    // Give the terminal back even if the loop failed
    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    info!(generations = app.simulation().generations(), "exiting");

    res
}
