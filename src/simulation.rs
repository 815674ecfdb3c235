//! Tick-driven animation of a [`LifeEngine`]
//!
//! The driver alternates `step` and a render of the fresh snapshot. Renderers only ever see
//! an immutable snapshot, never the engine itself.

use crate::config::ViewConfig;
use crate::game_of_life::{Cell, LifeEngine, LiveSet};
use crate::utils::{CellFormatter, Viewport};
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Consumer of rendered generations
pub trait FrameSink {
    fn render(&mut self, generation: u64, cells: &LiveSet) -> Result<()>;
}

/// Outcome of [`Simulation::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub generations_run: u64,
    pub final_population: usize,
    /// The run ended before the requested number of generations
    pub stopped_early: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub generations: u64,
    pub interval: Duration,
    pub stop_when_static: bool,
}

pub struct Simulation<S> {
    engine: LifeEngine,
    sink: S,
}

impl<S: FrameSink> Simulation<S> {
    pub fn new(engine: LifeEngine, sink: S) -> Self {
        Self { engine, sink }
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (LifeEngine, S) {
        (self.engine, self.sink)
    }

    /// Hand the current generation to the sink
    pub fn render(&mut self) -> Result<()> {
        let snapshot = self.engine.snapshot();
        self.sink.render(self.engine.generation(), &snapshot)
    }

    /// Step once and render. Returns whether the generation changed.
    pub fn tick(&mut self) -> Result<bool> {
        let previous = self.engine.snapshot();
        self.engine.step();
        self.render()?;

        Ok(*previous != *self.engine.alive())
    }

    /// Render the current state, then tick `generations` times with `interval` between ticks
    pub fn run(&mut self, options: RunOptions) -> Result<RunSummary> {
        info!(
            generations = options.generations,
            interval_ms = options.interval.as_millis() as u64,
            population = self.engine.population(),
            "starting simulation"
        );

        self.render()?;

        let mut generations_run = 0;
        let mut stopped_early = false;

        for _ in 0..options.generations {
            if !options.interval.is_zero() {
                std::thread::sleep(options.interval);
            }

            let changed = self.tick()?;
            generations_run += 1;

            if !changed && options.stop_when_static {
                info!(generation = self.engine.generation(), "pattern is static, stopping");
                stopped_early = true;
                break;
            }
        }

        let summary = RunSummary {
            generations_run,
            final_population: self.engine.population(),
            stopped_early,
        };

        info!(
            generations = summary.generations_run,
            population = summary.final_population,
            "simulation finished"
        );

        Ok(summary)
    }
}

/// Draws each generation as a block of text into any writer
pub struct TextRenderer<W> {
    out: W,
    viewport: Viewport,
    alive_glyph: char,
    dead_glyph: char,
    clear_screen: bool,
    frames: u64,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, viewport: Viewport, alive_glyph: char, dead_glyph: char) -> Self {
        Self {
            out,
            viewport,
            alive_glyph,
            dead_glyph,
            clear_screen: false,
            frames: 0,
        }
    }

    /// Build a renderer from view settings, centering on the origin or on `engine`'s content
    pub fn from_config(out: W, view: &ViewConfig, engine: &LifeEngine) -> Self {
        let mut viewport = Viewport::new(view.width, view.height);
        match engine.bounds() {
            Some(bounds) if !view.origin_centered => viewport.center_on(bounds.center()),
            _ => viewport.center_on(Cell::new(0, 0)),
        }

        Self::new(out, viewport, view.alive_glyph, view.dead_glyph)
    }

    /// Clear the terminal before every frame
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TextRenderer<W> {
    fn render(&mut self, generation: u64, cells: &LiveSet) -> Result<()> {
        // The whole frame is built first and written in one go.
        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str("\x1b[2J\x1b[H");
        }
        frame.push_str(&format!("generation {} | population {}\n", generation, cells.len()));
        frame.push_str(&CellFormatter::format_viewport(
            cells,
            &self.viewport,
            self.alive_glyph,
            self.dead_glyph,
        ));

        self.out
            .write_all(frame.as_bytes())
            .context("Failed to write frame")?;
        self.out.flush().context("Failed to flush frame")?;

        self.frames += 1;
        debug!(generation, frame = self.frames, "rendered frame");
        Ok(())
    }
}
