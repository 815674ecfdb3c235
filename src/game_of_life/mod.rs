//! Game of Life core functionality

pub mod cell;
pub mod engine;
pub mod io;
pub mod rules;

pub use cell::{Bounds, Cell, LiveSet};
pub use engine::LifeEngine;
pub use io::{create_example_patterns, load_cells_from_file, save_cells_to_file, Snapshot};
pub use rules::GameOfLifeRules;
