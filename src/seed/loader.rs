//! Image to live-cell conversion
//!
//! Only pixels that are exactly (255, 255, 255) become live cells. Every other color,
//! near-white included, is dead. Alpha is dropped before the comparison.

use super::error::{Result, SeedError};
use crate::game_of_life::{Cell, LifeEngine, LiveSet};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, info, warn};

/// The only pixel value treated as alive
pub const ALIVE_PIXEL: Rgb<u8> = Rgb([255, 255, 255]);

/// Builds a [`LifeEngine`] from a raster image
pub struct SeedLoader;

impl SeedLoader {
    /// Load a seed image from disk.
    ///
    /// Source pixels are visited every `sample_step` pixels on both axes, and a white pixel at
    /// `(x, y)` becomes cell `(x / sample_step, y / sample_step)`. With `crop_to_content` the
    /// resulting cells are shifted so the smallest x and y are both 0.
    pub fn load<P: AsRef<Path>>(
        path: P,
        sample_step: i64,
        crop_to_content: bool,
    ) -> Result<LifeEngine> {
        let path = path.as_ref();
        let stride = Self::validate_step(sample_step)?;

        let image = image::open(path).map_err(|source| SeedError::ImageDecode {
            source_name: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), "loaded seed image");
        Ok(Self::seed_engine(&image, stride, crop_to_content))
    }

    /// Load a seed from an encoded image held in memory
    pub fn load_from_memory(
        bytes: &[u8],
        sample_step: i64,
        crop_to_content: bool,
    ) -> Result<LifeEngine> {
        let stride = Self::validate_step(sample_step)?;

        let image = image::load_from_memory(bytes).map_err(|source| SeedError::ImageDecode {
            source_name: format!("<{} bytes in memory>", bytes.len()),
            source,
        })?;

        Ok(Self::seed_engine(&image, stride, crop_to_content))
    }

    /// Seed from an already decoded image
    pub fn from_image(
        image: &DynamicImage,
        sample_step: i64,
        crop_to_content: bool,
    ) -> Result<LifeEngine> {
        let stride = Self::validate_step(sample_step)?;
        Ok(Self::seed_engine(image, stride, crop_to_content))
    }

    /// Collect the live cells of an RGB image at the given stride
    pub fn cells_from_rgb(image: &RgbImage, stride: u32) -> LiveSet {
        let stride = stride.max(1);
        let (width, height) = image.dimensions();

        let mut cells = LiveSet::new();
        for y in (0..height).step_by(stride as usize) {
            for x in (0..width).step_by(stride as usize) {
                if *image.get_pixel(x, y) == ALIVE_PIXEL {
                    cells.insert(Cell::new(i64::from(x / stride), i64::from(y / stride)));
                }
            }
        }

        cells
    }

    fn validate_step(sample_step: i64) -> Result<u32> {
        if sample_step < 1 {
            return Err(SeedError::InvalidArgument(format!(
                "sample_step must be at least 1, got {}",
                sample_step
            )));
        }

        // Strides past u32::MAX visit only pixel 0 on each axis, same as u32::MAX.
        Ok(u32::try_from(sample_step).unwrap_or(u32::MAX))
    }

    fn seed_engine(image: &DynamicImage, stride: u32, crop_to_content: bool) -> LifeEngine {
        let rgb = image.to_rgb8();
        let cells = Self::cells_from_rgb(&rgb, stride);

        debug!(
            width = rgb.width(),
            height = rgb.height(),
            stride,
            population = cells.len(),
            "sampled seed image"
        );

        if cells.is_empty() {
            warn!(
                width = rgb.width(),
                height = rgb.height(),
                stride,
                "no white pixels sampled, seed is empty"
            );
        }

        let mut engine = LifeEngine::from_cells(cells);

        if crop_to_content {
            if let Some(bounds) = engine.bounds() {
                engine.translate(-bounds.min_x, -bounds.min_y);
                debug!(dx = -bounds.min_x, dy = -bounds.min_y, "cropped seed to content");
            }
        }

        engine
    }
}
