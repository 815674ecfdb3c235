//! Command line driver for the image-seeded Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image_life::{
    config::{CliOverrides, Settings},
    game_of_life::{create_example_patterns, load_cells_from_file, LifeEngine},
    seed_from_settings,
    simulation::{RunOptions, Simulation, TextRenderer},
    utils::{CellFormatter, ColorOutput},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image_life")]
#[command(about = "Conway's Game of Life seeded from the white pixels of an image")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed from an image and animate it in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed image (overrides config)
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Pixel sampling stride (overrides config)
        #[arg(long, allow_negative_numbers = true)]
        sample_step: Option<i64>,

        /// Keep the image's own coordinates instead of cropping to content
        #[arg(long)]
        no_crop: bool,

        /// Milliseconds between generations (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Save the final generation into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load a seed image and report what it contains
    Inspect {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed image (overrides config)
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Pixel sampling stride (overrides config)
        #[arg(long, allow_negative_numbers = true)]
        sample_step: Option<i64>,

        /// Keep the image's own coordinates instead of cropping to content
        #[arg(long)]
        no_crop: bool,
    },

    /// Advance a plain-text pattern file headlessly and print the result
    Pattern {
        /// Pattern file of '0'/'1' rows
        #[arg(short, long)]
        file: PathBuf,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: u64,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = dispatch(cli.command) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", err)));
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            seed,
            generations,
            sample_step,
            no_crop,
            interval_ms,
            output,
        } => {
            let overrides = CliOverrides {
                image_path: seed,
                sample_step,
                no_crop,
                generations,
                tick_interval_ms: interval_ms,
                output_dir: output,
            };
            run_command(config, overrides)
        }
        Commands::Inspect {
            config,
            seed,
            sample_step,
            no_crop,
        } => {
            let overrides = CliOverrides {
                image_path: seed,
                sample_step,
                no_crop,
                ..Default::default()
            };
            inspect_command(config, overrides)
        }
        Commands::Pattern { file, generations } => pattern_command(file, generations),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    Ok(settings)
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let engine = seed_from_settings(&settings)?;

    let renderer = TextRenderer::from_config(std::io::stdout(), &settings.view, &engine)
        .with_clear_screen(ColorOutput::supports_color());
    let mut simulation = Simulation::new(engine, renderer);

    let summary = simulation.run(RunOptions {
        generations: settings.simulation.generations,
        interval: Duration::from_millis(settings.simulation.tick_interval_ms),
        stop_when_static: settings.simulation.stop_when_static,
    })?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Ran {} generation(s), final population {}{}",
            summary.generations_run,
            summary.final_population,
            if summary.stopped_early { " (static)" } else { "" }
        ))
    );

    if settings.output.save_final {
        let path = CellFormatter::save_snapshot(
            simulation.engine(),
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save final generation")?;
        println!("Saved final generation to {}", path.display());
    }

    Ok(())
}

fn inspect_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    let engine = seed_from_settings(&settings)?;

    println!("Seed: {}", settings.seed.image_path.display());
    println!("  Sample step: {}", settings.seed.sample_step);
    println!("  Cropped: {}", settings.seed.crop_to_content);
    println!("{}", CellFormatter::format_summary(&engine));

    if engine.is_empty() {
        println!(
            "{}",
            ColorOutput::warning("No pure white (255, 255, 255) pixels were sampled")
        );
    } else {
        println!("\n{}", CellFormatter::format_cells_compact(engine.alive()));
    }

    Ok(())
}

fn pattern_command(file: PathBuf, generations: u64) -> Result<()> {
    let cells = load_cells_from_file(&file)?;
    let mut engine = LifeEngine::from_cells(cells);

    println!("{}", CellFormatter::format_summary(&engine));
    engine.step_n(generations);
    println!("{}", CellFormatter::format_summary(&engine));
    println!("\n{}", CellFormatter::format_cells_compact(engine.alive()));

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Put a seed image at the path named in {}", config_path.display());
    println!("2. Run: cargo run -- run --config {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "image_life",
            "run",
            "--seed",
            "seed.png",
            "--generations",
            "5",
            "--no-crop",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["image_life", "inspect", "--sample-step", "-2"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_missing_pattern_file_fails_dispatch() {
        let command = Commands::Pattern {
            file: PathBuf::from("missing/pattern.txt"),
            generations: 1,
        };
        assert!(dispatch(command).is_err());
    }

    #[test]
    fn test_invalid_sample_step_is_rejected() {
        let overrides = CliOverrides {
            sample_step: Some(0),
            ..Default::default()
        };
        assert!(load_settings(&PathBuf::from("missing/config.yaml"), &overrides).is_err());
    }
}
