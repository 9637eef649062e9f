//! # Toroidal Life Grid
//!
//! A fixed-size grid of colored cells that wraps at both edges. Each
//! generation follows Conway's B3/S23 rule: survivors keep their color, and
//! newborns take the blend of their three parents.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::color::Color;

/// A grid position: empty, or alive with a color.
pub type Cell = Option<Color>;

/// Combines the colors of a newborn's parents into the newborn's color.
pub type BlendFn = fn(&[Color]) -> Color;

/// What changed during one call to [`Grid::iterate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    /// Empty cells that came alive
    pub births: usize,
    /// Living cells that emptied
    pub deaths: usize,
    /// Living cells after the step
    pub population: usize,
}

impl Generation {
    fn merge(self, other: Generation) -> Generation {
        Generation {
            births: self.births + other.births,
            deaths: self.deaths + other.deaths,
            population: self.population + other.population,
        }
    }
}

/// The world. Cells are stored row-major, and a second buffer of the same
/// size receives each new generation before the two are swapped.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    blend: BlendFn,
    cells: Vec<Cell>,
    next: Vec<Cell>,
}

impl Grid {
    /// Creates an empty `width` x `height` grid.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of columns, must be positive
    /// * `height` - Number of rows, must be positive
    /// * `blend` - Colors newborn cells from their parents
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize, blend: BlendFn) -> Self {
        assert!(
            width > 0 && height > 0,
            "precondition violated: grid dimensions must be positive, got {width}x{height}"
        );

        let size = width * height;
        Self {
            width,
            height,
            blend,
            cells: vec![None; size],
            next: vec![None; size],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` addresses a cell without wrapping.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Returns the cell at `(x, y)`. Both coordinates wrap, so any pair of
    /// integers is valid and `(-1, 0)` is the last cell of the first row.
    pub fn get(&self, x: isize, y: isize) -> Cell {
        self.lattice().get(x, y)
    }

    /// Makes the cell at `(x, y)` alive with `color`, overriding whatever the
    /// rule decided for it.
    ///
    /// Writes do not wrap.
    ///
    /// # Panics
    ///
    /// Panics unless `x < width` and `y < height`.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        assert!(
            self.contains(x, y),
            "precondition violated: Grid::set({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );

        let idx = x + y * self.width;
        self.cells[idx] = Some(color);
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Colors of all living cells, row by row.
    pub fn living(&self) -> impl Iterator<Item = Color> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Advances the whole grid by one generation.
    ///
    /// Every cell is computed from the previous generation only. The new
    /// generation is written to the back buffer, which then becomes current.
    pub fn iterate(&mut self) -> Generation {
        let width = self.width;
        let blend = self.blend;
        let lattice = Lattice {
            cells: &self.cells,
            width: self.width,
            height: self.height,
        };

        #[cfg(feature = "parallel")]
        let generation = self
            .next
            .par_chunks_mut(width)
            .enumerate()
            .map(|(y, row)| lattice.evolve_row(y, row, blend))
            .reduce(Generation::default, Generation::merge);

        #[cfg(not(feature = "parallel"))]
        let generation = self
            .next
            .chunks_mut(width)
            .enumerate()
            .map(|(y, row)| lattice.evolve_row(y, row, blend))
            .fold(Generation::default(), Generation::merge);

        std::mem::swap(&mut self.cells, &mut self.next);
        generation
    }

    fn lattice(&self) -> Lattice<'_> {
        Lattice {
            cells: &self.cells,
            width: self.width,
            height: self.height,
        }
    }
}

/// Read-only toroidal view over one generation's cells.
#[derive(Clone, Copy)]
struct Lattice<'a> {
    cells: &'a [Cell],
    width: usize,
    height: usize,
}

impl Lattice<'_> {
    #[inline]
    fn get(&self, x: isize, y: isize) -> Cell {
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        self.cells[x + y * self.width]
    }

    /// Collects the colors of the living cells among the eight neighbors of
    /// `(x, y)` into `out`, returning how many there are.
    fn neighbors(&self, x: usize, y: usize, out: &mut [Color; 8]) -> usize {
        let mut count = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                if let Some(color) = self.get(x as isize + dx, y as isize + dy) {
                    out[count] = color;
                    count += 1;
                }
            }
        }
        count
    }

    fn evolve_row(&self, y: usize, row: &mut [Cell], blend: BlendFn) -> Generation {
        let mut generation = Generation::default();
        let mut parents = [Color::default(); 8];

        for (x, next) in row.iter_mut().enumerate() {
            let live_neighbors = self.neighbors(x, y, &mut parents);
            let cell = self.cells[x + y * self.width];

            *next = match (cell, live_neighbors) {
                (Some(color), 2) | (Some(color), 3) => Some(color),
                (Some(_), _) => {
                    generation.deaths += 1;
                    None
                }
                (None, 3) => {
                    generation.births += 1;
                    Some(blend(&parents[..3]))
                }
                (None, _) => None,
            };

            if next.is_some() {
                generation.population += 1;
            }
        }

        generation
    }
}
