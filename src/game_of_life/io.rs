//! File I/O for plain-text patterns and live-cell snapshots

use super::cell::{Cell, LiveSet};
use super::engine::LifeEngine;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Load a pattern from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells.
/// The first character of the first row is cell (0, 0).
pub fn load_cells_from_file<P: AsRef<Path>>(path: P) -> Result<LiveSet> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_cells_from_string(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse live cells from a string representation
pub fn parse_cells_from_string(content: &str) -> Result<LiveSet> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern file is empty or contains no valid rows");
    }

    let mut cells = LiveSet::new();

    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => {
                    cells.insert(Cell::new(x as i64, y as i64));
                }
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    x,
                    y
                ),
            }
        }
    }

    Ok(cells)
}

/// Largest bounding box, in cells, that is drawn as '0'/'1' rows
pub const MAX_TEXT_AREA: u64 = 1 << 22;

/// Render live cells as '0'/'1' rows covering their bounding box.
///
/// Fails when the bounding box is larger than [`MAX_TEXT_AREA`], since the output grows with
/// the box rather than with the population.
pub fn cells_to_string(cells: &LiveSet) -> Result<String> {
    let engine = LifeEngine::from_cells(cells.iter().copied());
    let Some(bounds) = engine.bounds() else {
        return Ok(String::new());
    };

    if bounds.area() > MAX_TEXT_AREA {
        anyhow::bail!(
            "Pattern spans {}x{} cells, more than the {} cells a text pattern may cover",
            bounds.width(),
            bounds.height(),
            MAX_TEXT_AREA
        );
    }

    let mut result = String::with_capacity((bounds.area() + bounds.height()) as usize);
    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            result.push(if cells.contains(&Cell::new(x, y)) { '1' } else { '0' });
        }
        result.push('\n');
    }

    Ok(result)
}

/// Save live cells to a text file
pub fn save_cells_to_file<P: AsRef<Path>>(cells: &LiveSet, path: P) -> Result<()> {
    let content = cells_to_string(cells)?;

    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Serializable record of one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub population: usize,
    /// Live cells in (y, x) order
    pub cells: Vec<Cell>,
}

impl Snapshot {
    pub fn of(engine: &LifeEngine) -> Self {
        let mut cells: Vec<Cell> = engine.alive().iter().copied().collect();
        cells.sort_by_key(|cell| (cell.y, cell.x));

        Self {
            generation: engine.generation(),
            population: cells.len(),
            cells,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Create example pattern files for testing
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        ("glider.txt", "010\n001\n111\n"),
        ("blinker.txt", "111\n"),
        ("block.txt", "11\n11\n"),
        ("beacon.txt", "1100\n1100\n0011\n0011\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
