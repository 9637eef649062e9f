//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use ratatui::layout::Rect;
use tracing::Level;

use crate::{color::Color, viewport};

/// Milliseconds between generations.
pub const DEFAULT_TICK_MS: u64 = 125;

/// A colorful Game of Life on a torus. Paint cells with the mouse; each
/// newborn takes the blended color of its parents.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Milliseconds between generations.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub tick_ms: u64,

    /// Number of grid columns. Derived from the terminal size when omitted.
    #[arg(long, value_name = "COLUMNS", requires = "height", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Number of grid rows. Derived from the terminal size when omitted.
    #[arg(long, value_name = "ROWS", requires = "width", value_parser = clap::value_parser!(u16).range(1..))]
    pub height: Option<u16>,

    /// Cells along the shorter side of the grid when deriving its size.
    #[arg(long = "min-dimension", value_name = "CELLS", value_parser = clap::value_parser!(u16).range(1..))]
    pub min_dimension: Option<u16>,

    /// Use the smaller minimum dimension meant for small, touch-sized screens.
    #[arg(long)]
    pub compact: bool,

    /// Fraction of cells brought to life at startup, between 0 and 1.
    #[arg(long, value_name = "FRACTION", default_value_t = 0.0, value_parser = parse_density)]
    pub density: f64,

    /// Seed for the random number generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Paint with this color (#rrggbb) instead of a random hue per stroke.
    #[arg(long, value_name = "HEX")]
    pub color: Option<Color>,

    /// Start with the simulation paused.
    #[arg(long)]
    pub paused: bool,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Cli {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Grid dimensions: the explicit `--width`/`--height` if given, otherwise
    /// derived from the area the grid will be drawn into.
    pub fn dimensions(&self, grid_area: Rect) -> (usize, usize) {
        if let (Some(width), Some(height)) = (self.width, self.height) {
            return (width as usize, height as usize);
        }

        let minimum = viewport::minimum_dimension(grid_area, self.min_dimension, self.compact);
        let (w, h) = viewport::units_of(grid_area);
        viewport::determine_dimensions(w, h, minimum)
    }
}

fn parse_density(value: &str) -> Result<f64, String> {
    let density: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;

    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("density must be between 0 and 1, got {density}"))
    }
}
