//! Configuration settings for the image-seeded Game of Life

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub seed: SeedConfig,
    pub simulation: SimulationConfig,
    pub view: ViewConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub image_path: PathBuf,
    pub sample_step: i64,
    pub crop_to_content: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: u64,
    pub tick_interval_ms: u64,
    /// Stop as soon as a generation equals the one before it
    #[serde(default)]
    pub stop_when_static: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    /// Center the viewport on (0, 0) instead of on the seed's bounding box
    pub origin_centered: bool,
    pub alive_glyph: char,
    pub dead_glyph: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_final: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: SeedConfig {
                image_path: PathBuf::from("seed.png"),
                sample_step: 1,
                crop_to_content: true,
            },
            simulation: SimulationConfig {
                generations: 100,
                tick_interval_ms: 120,
                stop_when_static: false,
            },
            view: ViewConfig {
                width: 80,
                height: 40,
                origin_centered: true,
                alive_glyph: '█',
                dead_glyph: '·',
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_final: false,
                output_directory: PathBuf::from("output"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if self.seed.sample_step < 1 {
            anyhow::bail!("Sample step must be at least 1, got {}", self.seed.sample_step);
        }

        if self.view.width == 0 || self.view.height == 0 {
            anyhow::bail!(
                "Viewport must be at least 1x1, got {}x{}",
                self.view.width,
                self.view.height
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref image_path) = cli_overrides.image_path {
            self.seed.image_path = image_path.clone();
        }
        if let Some(sample_step) = cli_overrides.sample_step {
            self.seed.sample_step = sample_step;
        }
        if cli_overrides.no_crop {
            self.seed.crop_to_content = false;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(interval) = cli_overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = interval;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save_final = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub image_path: Option<PathBuf>,
    pub sample_step: Option<i64>,
    pub no_crop: bool,
    pub generations: Option<u64>,
    pub tick_interval_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
}
