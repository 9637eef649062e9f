//! # Color Life
//!
//! Conway's Game of Life on a torus, where every living cell carries a color
//! and newborns inherit the blend of their parents. The engine lives in
//! [`color`] and [`grid`]; the remaining modules put it on a terminal.

pub mod app;
pub mod color;
pub mod config;
pub mod grid;
pub mod keymap;
pub mod ui;
pub mod viewport;

pub use color::Color;
pub use grid::{Cell, Generation, Grid};
