//! Mapping between the terminal and the grid.
//!
//! Grid cells are drawn as `2 * unit` columns by `unit` rows so they look
//! roughly square in a typical terminal font.

use ratatui::layout::Rect;

/// Minimum grid dimension on touch-class (compact) terminals.
pub const COMPACT_MINIMUM_DIMENSION: u16 = 20;
/// Minimum grid dimension everywhere else.
pub const DEFAULT_MINIMUM_DIMENSION: u16 = 40;

/// Terminal columns per unit of width, keeping cells square.
const COLUMNS_PER_UNIT: u16 = 2;

/// Derives grid dimensions from the shape of the drawing area.
///
/// The shorter side gets `minimum` cells and the longer side is scaled by the
/// aspect ratio. Dimensions are measured in square units, see
/// [`units_of`].
///
/// # Returns
///
/// `(width, height)`, both at least 1.
pub fn determine_dimensions(width_units: u16, height_units: u16, minimum: u16) -> (usize, usize) {
    let minimum = minimum.max(1) as f64;
    let ratio = width_units.max(1) as f64 / height_units.max(1) as f64;

    let (width, height) = if ratio > 1.0 {
        ((ratio * minimum).floor(), minimum)
    } else {
        (minimum, ((1.0 / ratio) * minimum).floor())
    };

    ((width as usize).max(1), (height as usize).max(1))
}

/// Size of `area` in square units.
pub fn units_of(area: Rect) -> (u16, u16) {
    (area.width / COLUMNS_PER_UNIT, area.height)
}

/// Picks the minimum dimension for a device class, then clamps it to the
/// shorter side of `area` so the derived grid fits on screen.
pub fn minimum_dimension(area: Rect, requested: Option<u16>, compact: bool) -> u16 {
    let requested = requested.unwrap_or(if compact {
        COMPACT_MINIMUM_DIMENSION
    } else {
        DEFAULT_MINIMUM_DIMENSION
    });

    let (w, h) = units_of(area);
    requested.min(w.min(h)).max(1)
}

/// Where the grid sits on screen and how big each cell is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Terminal area the grid is drawn into
    pub area: Rect,
    /// Terminal columns per grid cell
    pub cell_width: u16,
    /// Terminal rows per grid cell
    pub cell_height: u16,
    /// Grid dimensions
    pub columns: usize,
    pub rows: usize,
}

impl Viewport {
    /// Chooses the largest square cell size at which the grid still fits in
    /// `area`. Cells never shrink below one unit; a grid that is too big is
    /// clipped at the right and bottom.
    pub fn fit(area: Rect, columns: usize, rows: usize) -> Self {
        let (w, h) = units_of(area);
        let unit = (w as usize / columns.max(1))
            .min(h as usize / rows.max(1))
            .clamp(1, u16::MAX as usize) as u16;

        Self {
            area,
            cell_width: unit * COLUMNS_PER_UNIT,
            cell_height: unit,
            columns,
            rows,
        }
    }

    /// Translates a terminal position into the grid cell drawn there.
    ///
    /// Returns `None` for positions outside the grid, including the parts of
    /// a clipped grid that are not on screen.
    pub fn to_grid(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.area;
        if column < area.x
            || row < area.y
            || column >= area.x.saturating_add(area.width)
            || row >= area.y.saturating_add(area.height)
        {
            return None;
        }

        let x = ((column - area.x) / self.cell_width.max(1)) as usize;
        let y = ((row - area.y) / self.cell_height.max(1)) as usize;

        (x < self.columns && y < self.rows).then_some((x, y))
    }

    /// Terminal rectangle covering grid cell `(x, y)`, clipped to the area.
    pub fn to_terminal(&self, x: usize, y: usize) -> Option<Rect> {
        if x >= self.columns || y >= self.rows {
            return None;
        }

        let left = x * self.cell_width as usize;
        let top = y * self.cell_height as usize;
        if left >= self.area.width as usize || top >= self.area.height as usize {
            return None;
        }

        let left = left as u16;
        let top = top as u16;
        Some(Rect {
            x: self.area.x + left,
            y: self.area.y + top,
            width: self.cell_width.min(self.area.width - left),
            height: self.cell_height.min(self.area.height - top),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    // Landscape: the height gets the minimum
    #[case(100, 50, 40, (80, 40))]
    #[case(160, 90, 40, (71, 40))]
    // Portrait: the width gets the minimum
    #[case(50, 100, 20, (20, 40))]
    #[case(9, 16, 20, (20, 35))]
    // Square counts as portrait
    #[case(30, 30, 25, (25, 25))]
    fn dimensions_follow_the_aspect_ratio(
        #[case] w: u16,
        #[case] h: u16,
        #[case] minimum: u16,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(determine_dimensions(w, h, minimum), expected);
    }

    #[test]
    fn degenerate_areas_still_give_a_grid() {
        assert_eq!(determine_dimensions(0, 0, 0), (1, 1));
        assert_eq!(determine_dimensions(10, 0, 4), (40, 4));
    }

    #[rstest]
    #[case(None, false, 40)]
    #[case(None, true, 20)]
    #[case(Some(25), true, 25)]
    // Clamped to the 50 rows available
    #[case(Some(90), false, 50)]
    fn minimum_dimension_depends_on_device_class(
        #[case] requested: Option<u16>,
        #[case] compact: bool,
        #[case] expected: u16,
    ) {
        let area = Rect::new(0, 0, 200, 50);
        assert_eq!(minimum_dimension(area, requested, compact), expected);
    }

    #[test]
    fn fit_picks_the_largest_square_cells() {
        let viewport = Viewport::fit(Rect::new(1, 1, 80, 20), 10, 5);
        // 40 units wide / 10 = 4, 20 rows / 5 = 4
        assert_eq!(viewport.cell_width, 8);
        assert_eq!(viewport.cell_height, 4);

        let viewport = Viewport::fit(Rect::new(1, 1, 80, 20), 30, 5);
        assert_eq!(viewport.cell_width, 2);
        assert_eq!(viewport.cell_height, 1);
    }

    #[test]
    fn oversized_grids_use_one_unit_cells() {
        let viewport = Viewport::fit(Rect::new(0, 0, 10, 5), 100, 100);
        assert_eq!((viewport.cell_width, viewport.cell_height), (2, 1));
    }

    #[test]
    fn terminal_positions_map_to_cells() {
        let viewport = Viewport::fit(Rect::new(1, 1, 40, 10), 5, 5);
        // unit = min(20 / 5, 10 / 5) = 2, so cells are 4x2
        assert_eq!(viewport.to_grid(1, 1), Some((0, 0)));
        assert_eq!(viewport.to_grid(4, 2), Some((0, 0)));
        assert_eq!(viewport.to_grid(5, 3), Some((1, 1)));
        assert_eq!(viewport.to_grid(20, 10), Some((4, 4)));

        // Border, right margin and beyond
        assert_eq!(viewport.to_grid(0, 0), None);
        assert_eq!(viewport.to_grid(21, 5), None);
        assert_eq!(viewport.to_grid(5, 11), None);
        assert_eq!(viewport.to_grid(200, 200), None);
    }

    #[test]
    fn cells_round_trip_through_the_terminal() {
        let viewport = Viewport::fit(Rect::new(3, 2, 60, 18), 7, 6);
        for y in 0..6 {
            for x in 0..7 {
                let rect = viewport.to_terminal(x, y).expect("cell is on screen");
                assert_eq!(viewport.to_grid(rect.x, rect.y), Some((x, y)));
                assert_eq!(
                    viewport.to_grid(rect.x + rect.width - 1, rect.y + rect.height - 1),
                    Some((x, y))
                );
            }
        }
        assert_eq!(viewport.to_terminal(7, 0), None);
    }

    #[test]
    fn clipped_cells_are_off_screen() {
        let viewport = Viewport::fit(Rect::new(0, 0, 10, 4), 8, 8);
        assert_eq!(viewport.to_terminal(4, 0), Some(Rect::new(8, 0, 2, 1)));
        assert_eq!(viewport.to_terminal(5, 0), None);
        assert_eq!(viewport.to_terminal(0, 4), None);
        assert_eq!(viewport.to_grid(9, 3), Some((4, 3)));
    }
}
