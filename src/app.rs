//! Application state around the grid: what the user has selected, which
//! strokes are in progress, and running statistics.

use std::collections::HashMap;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use rand::{rngs::StdRng, Rng};
use sysinfo::{System, SystemExt};
use tracing::{debug, trace};

use crate::{
    color::Color,
    grid::{Generation, Grid},
    keymap::Command,
    viewport::Viewport,
};

/// Identifies one pointer taking part in a stroke. Every mouse button draws
/// its own stroke, the same way simultaneous touches would.
pub type PointerId = MouseButton;

/// Stores statistics about the simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Current generation number
    pub generation: u64,
    /// Total number of cells born since start
    pub cells_created: u64,
    /// Total number of cells that died since start
    pub cells_destroyed: u64,
    /// Current number of living cells
    pub current_population: u64,
}

impl Stats {
    fn record(&mut self, generation: Generation) {
        self.generation += 1;
        self.cells_created += generation.births as u64;
        self.cells_destroyed += generation.deaths as u64;
        self.current_population = generation.population as u64;
    }

    /// Average births per generation.
    pub fn birth_rate(&self) -> f64 {
        self.cells_created as f64 / self.generation.max(1) as f64
    }

    /// Average deaths per generation.
    pub fn death_rate(&self) -> f64 {
        self.cells_destroyed as f64 / self.generation.max(1) as f64
    }
}

/// The color new strokes are painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    /// The selected color, or the hue picked for the latest stroke
    pub color: Color,
    /// Pick a fresh random hue at the start of every stroke
    pub random: bool,
}

impl Brush {
    pub fn random_hue<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            color: Color::random_hue(rng),
            random: true,
        }
    }

    pub fn fixed(color: Color) -> Self {
        Self {
            color,
            random: false,
        }
    }
}

/// Main application state container.
#[derive(Debug)]
pub struct App {
    /// The world being simulated
    pub grid: Grid,
    /// Whether generations advance on each tick
    pub running: bool,
    pub brush: Brush,
    /// Blend of every living cell, used for the grid dots and border
    pub grid_color: Color,
    pub stats: Stats,
    /// Colors of the strokes currently being drawn
    strokes: HashMap<PointerId, Color>,
    /// System information for resource monitoring
    sys: System,
    rng: StdRng,
    should_quit: bool,
}

impl App {
    /// Creates the application around an existing grid.
    ///
    /// # Arguments
    ///
    /// * `grid` - The world to simulate, possibly already seeded
    /// * `brush` - The brush to start with, `None` for random hues
    /// * `rng` - Source of random hues
    pub fn new(grid: Grid, brush: Option<Color>, mut rng: StdRng) -> App {
        let brush = match brush {
            Some(color) => Brush::fixed(color),
            None => Brush::random_hue(&mut rng),
        };

        let mut sys = System::new();
        sys.refresh_memory();

        let mut app = App {
            grid,
            running: true,
            brush,
            grid_color: Color::WHITE,
            stats: Stats::default(),
            strokes: HashMap::new(),
            sys,
            rng,
            should_quit: false,
        };
        app.refresh();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Brings every cell to life with probability `density`, each with a
    /// random hue.
    pub fn scatter(&mut self, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if self.rng.gen_bool(density) {
                    let hue = Color::random_hue(&mut self.rng);
                    self.grid.set(x, y, hue);
                }
            }
        }

        debug!(density, population = self.grid.population(), "scattered cells");
        self.refresh();
    }

    /// One timer tick: advance a generation unless paused.
    pub fn tick(&mut self) {
        if self.running {
            self.advance();
        }
        self.refresh();
    }

    /// Advances exactly one generation, only while paused.
    pub fn step(&mut self) {
        if !self.running {
            self.advance();
            self.refresh();
        }
    }

    /// Toggles the simulation between running and paused states.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        debug!(running = self.running, "toggled simulation");
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.toggle_running(),
            Command::Step => self.step(),
            Command::RandomHue => {
                self.brush.random = true;
                debug!("brush set to random hues");
            }
            Command::Select(color) => {
                self.brush = Brush::fixed(color);
                debug!(color = %color, "brush color selected");
            }
            Command::Clear => {
                self.grid.clear();
                self.strokes.clear();
                self.refresh();
                debug!("grid cleared");
            }
            Command::Quit => self.should_quit = true,
        }
    }

    /// Routes a mouse event to the stroke it belongs to.
    ///
    /// `viewport` must be the one the grid was last drawn with, so positions
    /// match what the user sees.
    pub fn handle_mouse(&mut self, event: MouseEvent, viewport: &Viewport) {
        let cell = viewport.to_grid(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(button) => self.begin_stroke(button, cell),
            MouseEventKind::Drag(button) => self.extend_stroke(button, cell),
            MouseEventKind::Up(button) => self.end_stroke(button),
            _ => {}
        }
    }

    /// Starts a stroke for `pointer`, choosing its color once, and paints the
    /// cell under it if there is one.
    pub fn begin_stroke(&mut self, pointer: PointerId, cell: Option<(usize, usize)>) {
        if self.brush.random {
            self.brush.color = Color::random_hue(&mut self.rng);
        }

        let color = self.brush.color;
        let _ = self.strokes.insert(pointer, color);
        trace!(?pointer, color = %color, "stroke started");

        if let Some((x, y)) = cell {
            self.paint(x, y, color);
        }
    }

    /// Paints with the color chosen when `pointer`'s stroke began. Does
    /// nothing if that pointer has no stroke in progress.
    pub fn extend_stroke(&mut self, pointer: PointerId, cell: Option<(usize, usize)>) {
        if let (Some(&color), Some((x, y))) = (self.strokes.get(&pointer), cell) {
            self.paint(x, y, color);
        }
    }

    pub fn end_stroke(&mut self, pointer: PointerId) {
        if self.strokes.remove(&pointer).is_some() {
            trace!(?pointer, "stroke ended");
        }
    }

    /// Color of the stroke `pointer` is drawing, if any.
    pub fn stroke_color(&self, pointer: PointerId) -> Option<Color> {
        self.strokes.get(&pointer).copied()
    }

    /// Used and total memory in kilobytes.
    pub fn memory_kb(&self) -> (u64, u64) {
        (self.sys.used_memory() / 1024, self.sys.total_memory() / 1024)
    }

    fn paint(&mut self, x: usize, y: usize, color: Color) {
        self.grid.set(x, y, color);
        self.stats.current_population = self.grid.population() as u64;
    }

    fn advance(&mut self) {
        let generation = self.grid.iterate();
        self.stats.record(generation);
        self.sys.refresh_memory();
        trace!(
            generation = self.stats.generation,
            births = generation.births,
            deaths = generation.deaths,
            population = generation.population,
            "advanced"
        );
    }

    /// Recomputes what is derived from the cells. The grid color keeps its
    /// last value while nothing lives.
    fn refresh(&mut self) {
        let living: Vec<Color> = self.grid.living().collect();
        self.stats.current_population = living.len() as u64;
        if !living.is_empty() {
            self.grid_color = Color::blend(&living);
        }
    }
}
