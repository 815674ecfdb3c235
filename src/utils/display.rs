//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{io, Bounds, Cell, LifeEngine, LiveSet, Snapshot};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Rectangular window onto the unbounded grid, measured in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Grid cell shown in the top-left corner
    pub origin: Cell,
    pub cols: u32,
    pub rows: u32,
}

impl Viewport {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            origin: Cell::new(0, 0),
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Move the view so `center` sits in the middle
    pub fn center_on(&mut self, center: Cell) {
        self.origin = Cell::new(
            center.x.saturating_sub(i64::from(self.cols / 2)),
            center.y.saturating_sub(i64::from(self.rows / 2)),
        );
    }

    pub fn pan(&mut self, dx: i64, dy: i64) {
        self.origin = self.origin.offset(dx, dy);
    }

    /// Grid cells covered by the view
    pub fn visible_bounds(&self) -> Bounds {
        Bounds {
            min_x: self.origin.x,
            min_y: self.origin.y,
            max_x: self.origin.x.saturating_add(i64::from(self.cols) - 1),
            max_y: self.origin.y.saturating_add(i64::from(self.rows) - 1),
        }
    }
}

/// Format live cells for display
pub struct CellFormatter;

impl CellFormatter {
    /// Render the cells visible through `viewport`, one text row per grid row
    pub fn format_viewport(
        cells: &LiveSet,
        viewport: &Viewport,
        alive: char,
        dead: char,
    ) -> String {
        let visible = viewport.visible_bounds();
        let capacity = (viewport.cols as usize + 1) * viewport.rows as usize;
        let mut output = String::with_capacity(capacity);

        for y in visible.min_y..=visible.max_y {
            for x in visible.min_x..=visible.max_x {
                output.push(if cells.contains(&Cell::new(x, y)) { alive } else { dead });
            }
            output.push('\n');
        }

        output
    }

    /// Format a live set in compact form, cropped to its bounding box.
    /// Sets spread over too large a box are described instead of drawn.
    pub fn format_cells_compact(cells: &LiveSet) -> String {
        match io::cells_to_string(cells) {
            Ok(rows) => rows
                .chars()
                .map(|ch| match ch {
                    '1' => '█',
                    '0' => '·',
                    other => other,
                })
                .collect(),
            Err(err) => format!("({})\n", err),
        }
    }

    /// One-line summary of an engine's state
    pub fn format_summary(engine: &LifeEngine) -> String {
        match engine.bounds() {
            Some(bounds) => format!(
                "Generation {} | Population {} | Bounds {}",
                engine.generation(),
                engine.population(),
                bounds
            ),
            None => format!("Generation {} | Population 0 | Empty", engine.generation()),
        }
    }

    /// Save the engine's current generation into `output_dir`, returning the written path
    pub fn save_snapshot<P: AsRef<Path>>(
        engine: &LifeEngine,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => match engine.bounds() {
                Some(bounds) if bounds.area() > io::MAX_TEXT_AREA => {
                    warn!(
                        width = bounds.width(),
                        height = bounds.height(),
                        "pattern too large for a text snapshot, writing JSON instead"
                    );
                    Self::save_json(engine, output_dir)?
                }
                _ => {
                    let name = format!("generation_{:06}.txt", engine.generation());
                    let path = output_dir.join(name);
                    io::save_cells_to_file(engine.alive(), &path)?;
                    path
                }
            },
            OutputFormat::Json => Self::save_json(engine, output_dir)?,
        };

        Ok(path)
    }

    fn save_json(engine: &LifeEngine, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(format!("generation_{:06}.json", engine.generation()));
        let json = Snapshot::of(engine)
            .to_json()
            .context("Failed to serialize snapshot")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
