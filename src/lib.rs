//! Image-seeded Game of Life
//!
//! Simulates Conway's Game of Life on an unbounded grid using a sparse set of live cells,
//! seeded from the pure white pixels of an image.

pub mod config;
pub mod game_of_life;
pub mod seed;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Bounds, Cell, LifeEngine, LiveSet};
pub use seed::{SeedError, SeedLoader};

use anyhow::{Context, Result};

/// Load the seed image named by `settings` into a fresh engine
pub fn seed_from_settings(settings: &Settings) -> Result<LifeEngine> {
    let seed = &settings.seed;
    SeedLoader::load(&seed.image_path, seed.sample_step, seed.crop_to_content)
        .with_context(|| format!("Failed to seed from {}", seed.image_path.display()))
}
