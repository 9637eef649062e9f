//! Drawing the grid and the statistics panel.

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{app::App, viewport::Viewport};

const LIVE: &str = "█";
const DOT: &str = "·";

/// Splits the screen into the grid panel and the statistics panel.
pub fn panels(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
        .split(area)
}

fn grid_block(app: &App) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.grid_color.into()))
        .title("Color Life [Space: Play/Pause | Enter: Step | x: Random | q: Quit]")
}

/// The terminal area grid cells are drawn into, for a screen of `size`.
pub fn grid_area(size: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(panels(size)[0])
}

/// Draws the whole screen.
///
/// # Returns
///
/// The viewport the grid was drawn with, for mapping mouse positions back to
/// cells.
pub fn draw(f: &mut Frame, app: &App) -> Viewport {
    let chunks = panels(f.size());
    let viewport = draw_grid(f, app, chunks[0]);
    draw_stats(f, app, chunks[1]);
    viewport
}

/// Draws the grid. Living cells are solid blocks in their own color; where
/// cells meet, a dot in the grid color marks the corner.
fn draw_grid(f: &mut Frame, app: &App, area: Rect) -> Viewport {
    let block = grid_block(app);
    let viewport = Viewport::fit(block.inner(area), app.grid.width(), app.grid.height());

    let solid = LIVE.repeat(viewport.cell_width as usize);
    let blank = " ".repeat(viewport.cell_width as usize);
    let dotted = format!("{DOT}{}", " ".repeat(viewport.cell_width as usize - 1));
    let dot_style = Style::default().fg(app.grid_color.into());

    let mut lines = Vec::with_capacity(app.grid.height() * viewport.cell_height as usize);
    for y in 0..app.grid.height() {
        for sub_row in 0..viewport.cell_height {
            let spans: Vec<Span> = (0..app.grid.width())
                .map(|x| match app.grid.get(x as isize, y as isize) {
                    Some(color) => Span::styled(solid.clone(), Style::default().fg(color.into())),
                    None if x > 0 && y > 0 && sub_row == 0 => {
                        Span::styled(dotted.clone(), dot_style)
                    }
                    None => Span::raw(blank.clone()),
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
    viewport
}

/// Draws the statistics panel.
fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let (memory_used, memory_total) = app.memory_kb();
    let brush = if app.brush.random {
        format!("random ({})", app.brush.color)
    } else {
        app.brush.color.to_hex_string()
    };

    let stats_text = format!(
        "Statistics:\n\
        Generation: {}\n\
        Status: {}\n\
        Current Population: {}\n\
        Cells Created: {}\n\
        Cells Destroyed: {}\n\
        Birth Rate: {:.2}/gen\n\
        Death Rate: {:.2}/gen\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Brush: {}\n\
        Grid Color: {}\n\
        Size: {}x{}\n",
        app.stats.generation,
        if app.running { "Running" } else { "Paused" },
        app.stats.current_population,
        app.stats.cells_created,
        app.stats.cells_destroyed,
        app.stats.birth_rate(),
        app.stats.death_rate(),
        memory_used,
        memory_total as f64 / 1024.0,
        brush,
        app.grid_color,
        app.grid.width(),
        app.grid.height(),
    );

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Color as TermColor, Terminal};

    use crate::{color::Color, grid::Grid, keymap::Command};

    fn app(width: usize, height: usize) -> App {
        let grid = Grid::new(width, height, Color::blend);
        App::new(grid, Some(Color::RED), StdRng::seed_from_u64(1))
    }

    fn render(app: &App, width: u16, height: u16) -> (Viewport, Buffer) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        let mut viewport = Viewport::default();
        terminal
            .draw(|f| viewport = draw(f, app))
            .expect("draw to test backend");
        (viewport, terminal.backend().buffer().clone())
    }

    fn text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(&buffer.get(x, y).symbol);
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn grid_area_matches_the_drawn_viewport() {
        let app = app(5, 5);
        let (viewport, _) = render(&app, 120, 30);

        assert_eq!(grid_area(Rect::new(0, 0, 120, 30)), Rect::new(1, 1, 88, 28));
        assert_eq!(viewport, Viewport::fit(Rect::new(1, 1, 88, 28), 5, 5));
    }

    #[test]
    fn living_cells_are_drawn_in_their_color() {
        let mut app = app(5, 5);
        app.grid.set(0, 0, Color::RED);
        app.grid.set(3, 2, Color::DODGER_BLUE);
        app.apply(Command::TogglePause);
        app.tick();

        let (viewport, buffer) = render(&app, 120, 30);

        let expected = [
            (0, 0, TermColor::Rgb(255, 0, 0)),
            (3, 2, TermColor::Rgb(0, 128, 255)),
        ];
        for (x, y, color) in expected {
            let rect = viewport.to_terminal(x, y).expect("on screen");
            for row in rect.top()..rect.bottom() {
                for column in rect.left()..rect.right() {
                    let cell = buffer.get(column, row);
                    assert_eq!(cell.symbol, LIVE, "({column}, {row})");
                    assert_eq!(cell.fg, color, "({column}, {row})");
                }
            }
        }
    }

    #[test]
    fn empty_cells_show_corner_dots_in_the_grid_color() {
        let mut app = app(5, 5);
        app.grid.set(0, 0, Color::GREEN);
        app.apply(Command::TogglePause);
        app.tick();
        assert_eq!(app.grid_color, Color::GREEN);

        let (viewport, buffer) = render(&app, 120, 30);

        let inner = viewport.to_terminal(2, 3).expect("on screen");
        let dot = buffer.get(inner.x, inner.y);
        assert_eq!(dot.symbol, DOT);
        assert_eq!(dot.fg, TermColor::Rgb(0, 255, 0));
        assert_eq!(buffer.get(inner.x + 1, inner.y).symbol, " ");
        assert_eq!(buffer.get(inner.x, inner.y + 1).symbol, " ");

        // No dots along the outer edges
        let edge = viewport.to_terminal(2, 0).expect("on screen");
        assert_eq!(buffer.get(edge.x, edge.y).symbol, " ");
        let edge = viewport.to_terminal(0, 3).expect("on screen");
        assert_eq!(buffer.get(edge.x, edge.y).symbol, " ");
    }

    #[test]
    fn stats_panel_reports_the_simulation() {
        let mut app = app(5, 5);
        app.grid.set(1, 2, Color::RED);
        app.grid.set(2, 2, Color::GREEN);
        app.grid.set(3, 2, Color::BLUE);
        app.tick();
        app.apply(Command::TogglePause);

        let (_, buffer) = render(&app, 120, 30);
        let screen = text(&buffer);

        for expected in [
            "Statistics",
            "Generation: 1",
            "Status: Paused",
            "Cells Created: 2",
            "Cells Destroyed: 2",
            "Brush: #ff0000",
            "Size: 5x5",
        ] {
            assert!(screen.contains(expected), "missing {expected:?} in\n{screen}");
        }
    }
}
