use anyhow::{Context, Result};
use clap::Parser;
use robot_treasure::game::{GameConfig, StepPolicy};
use robot_treasure::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "robot_treasure")]
#[command(
    version,
    about = "Program a robot with SPACE and the arrow keys, then press ENTER to watch it collect the treasures"
)]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Treasures per round
    #[arg(long)]
    treasures: Option<usize>,

    /// Milliseconds between replayed commands
    #[arg(long)]
    step_ms: Option<u64>,

    /// Seed for treasure placement
    #[arg(long)]
    seed: Option<u64>,

    /// Replay every overdue command after a stall instead of at most one per tick
    #[arg(long)]
    catch_up: bool,

    /// Write logs here (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(treasures) = self.treasures {
            config.treasure_count = treasures;
        }
        if let Some(step_ms) = self.step_ms {
            config.step_interval_ms = step_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.catch_up {
            config.step_policy = StepPolicy::CatchUp;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = cli.game_config().context("Invalid game configuration")?;
    tracing::info!(?config, "config_loaded");

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

/// Send logs to a file; the terminal belongs to the game screen
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}
