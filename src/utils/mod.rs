//! Utility functions and helpers

pub mod display;

pub use display::{CellFormatter, Color, ColorOutput, Viewport};
