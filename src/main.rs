//! # Color Life
//!
//! A terminal-based, colorized Game of Life using `ratatui` for drawing and
//! `crossterm` for terminal and mouse handling.
//!
//! ## Controls
//!
//! * Mouse: paint living cells, one color per stroke
//! * Letters r o y h g s c d b p v m k w: pick a brush color
//! * x: pick a random hue for every stroke
//! * Space: Play/Pause, Enter: Step while paused
//! * Backspace: clear the grid
//! * q / Esc: Quit

use std::{
    fs::File,
    io::{self, Stdout},
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use color_life::{app::App, config::Cli, keymap, ui, viewport::Viewport, Color, Grid};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to build terminal backend")?;
    terminal.hide_cursor().ok();

    let result = run(&mut terminal, &cli);

    // Restore the terminal even if the loop failed, without masking its error.
    if let Err(err) = disable_raw_mode() {
        tracing::error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    ) {
        tracing::error!(?err, "failed to leave alternate screen");
    }
    terminal.show_cursor().ok();

    result
}

/// Sends logs to `--log-file`. Without one nothing is installed, since
/// anything written to the terminal would land on top of the UI.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(cli.log_level)
        .init();

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, cli: &Cli) -> Result<()> {
    let size = terminal.size().context("failed to query terminal size")?;
    let (width, height) = cli.dimensions(ui::grid_area(size));

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut app = App::new(Grid::new(width, height, Color::blend), cli.color, rng);
    if cli.density > 0.0 {
        app.scatter(cli.density);
    }
    app.running = !cli.paused;

    info!(
        width,
        height,
        tick_ms = cli.tick_ms,
        density = cli.density,
        seed = ?cli.seed,
        paused = cli.paused,
        "starting simulation"
    );

    let tick_rate = cli.tick();
    let mut last_tick = Instant::now();
    let mut viewport = Viewport::default();

    loop {
        terminal
            .draw(|f| viewport = ui::draw(f, &app))
            .context("failed to draw")?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = keymap::command_for(key) {
                        app.apply(command);
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, &viewport),
                Event::Resize(columns, rows) => debug!(columns, rows, "terminal resized"),
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    info!(
        generation = app.stats.generation,
        population = app.stats.current_population,
        "simulation stopped"
    );
    Ok(())
}
