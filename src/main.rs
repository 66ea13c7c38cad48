//! CLI entry point for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conway_life::config::{CliOverrides, FrontendKind, Settings};
use conway_life::frontend::{TermInput, TermRenderer, TerminalSession};
use conway_life::life::Grid;
use conway_life::sim::{PacingMode, SimulationLoop};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "conway_life")]
#[command(about = "Interactive Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid dimensions (overrides config)
        #[arg(short, long, num_args = 2, value_names = ["WIDTH", "HEIGHT"],
              value_parser = clap::value_parser!(u64).range(1..))]
        dims: Option<Vec<u64>>,

        /// Advance on a fixed timer instead of waiting for ENTER; optional
        /// interval between generations in seconds (default 0.5)
        #[arg(short, long, num_args = 0..=1, default_missing_value = "0.5",
              value_name = "SECONDS", value_parser = positive_seconds)]
        timer: Option<f64>,

        /// RNG seed for a reproducible starting grid
        #[arg(long)]
        seed: Option<u64>,

        /// Start from an all-dead grid instead of random seeding
        #[arg(long)]
        empty: bool,

        /// Render to a graphical window instead of the terminal
        #[arg(short, long)]
        window: bool,

        /// Cell size in pixels for the window front-end
        #[arg(long, value_name = "PIXELS")]
        cell_size: Option<u32>,
    },

    /// Write a default configuration file
    Setup {
        /// Path of the configuration file to create
        #[arg(short, long, default_value = "config/default.yaml")]
        path: PathBuf,

        /// Force overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Timer values must be positive, mirroring the grid-dimension rule.
fn positive_seconds(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|e| format!("invalid number of seconds: {e}"))?;
    if seconds > 0.0 && seconds.is_finite() {
        Ok(seconds)
    } else {
        Err("interval must be a positive number of seconds".to_string())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            dims,
            timer,
            seed,
            empty,
            window,
            cell_size,
        } => {
            let overrides = CliOverrides {
                dims: dims.map(|d| (d[0] as usize, d[1] as usize)),
                timer,
                seed,
                empty,
                window,
                cell_size,
            };
            run_command(config, overrides)
        }
        Commands::Setup { path, force } => setup_command(path, force),
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;

    let mut rng = match settings.grid.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let grid = if settings.grid.seeded {
        Grid::random(settings.grid.width, settings.grid.height, &mut rng)?
    } else {
        Grid::dead(settings.grid.width, settings.grid.height)?
    };
    let pacing = settings.pacing.to_mode()?;

    match settings.display.frontend {
        FrontendKind::Terminal => {
            let session = TerminalSession::enter()?;
            let mut sim =
                SimulationLoop::new(grid, pacing, TermRenderer::new(pacing), TermInput::new());
            let outcome = sim.run();
            // Restore the normal screen before printing anything
            drop(session);
            outcome?;

            println!("{}", sim.grid());
            println!(
                "Exited after {} generation(s), {} cell(s) alive",
                sim.control().generation(),
                sim.grid().living_count()
            );
            Ok(())
        }
        FrontendKind::Window => launch_window(grid, pacing, settings.display.cell_size),
    }
}

/// The window paces itself; wait-for-signal has no window equivalent and
/// degrades to 15 generations per second.
#[cfg(feature = "gui")]
fn launch_window(grid: Grid, pacing: PacingMode, cell_size: u32) -> Result<()> {
    let base = match pacing {
        PacingMode::FixedInterval(interval) => interval,
        PacingMode::WaitForSignal => std::time::Duration::from_secs_f64(1.0 / 15.0),
    };
    conway_life::frontend::run_window(grid, base, cell_size)
}

#[cfg(not(feature = "gui"))]
fn launch_window(_grid: Grid, _pacing: PacingMode, _cell_size: u32) -> Result<()> {
    anyhow::bail!("this build has no window front-end; rebuild with `--features gui`")
}

fn setup_command(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists, use --force)", path.display());
        return Ok(());
    }

    Settings::default()
        .to_file(&path)
        .context("Failed to create default configuration")?;
    println!("Created: {}", path.display());
    println!("\nNext steps:");
    println!("1. Edit {}", path.display());
    println!("2. Run: cargo run -- run --config {}", path.display());

    Ok(())
}
