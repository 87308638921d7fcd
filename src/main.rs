use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use floorplan::config::EditorConfig;
use floorplan::engine::EngineCore;
use floorplan::preset::{PresetCatalog, PresetError};
use floorplan::script::{self, ScriptError, ScriptRunner};
use floorplan::units::UnitScale;
use tracing::{Level, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to read presets: {0}")]
    PresetsIo(#[from] std::io::Error),
    #[error("invalid presets: {0}")]
    Presets(#[from] PresetError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", about = "Floor-plan geometry engine: replay editing scripts")]
struct Cli {
    /// Log every engine decision to stderr.
    #[arg(long, short)]
    verbose: bool,

    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for `FLOORPLAN_*` environment settings.
#[derive(Args, Debug)]
struct Tuning {
    #[arg(long)]
    snap_step: Option<f64>,
    #[arg(long)]
    grid_step: Option<f64>,
    #[arg(long)]
    min_width: Option<f64>,
    #[arg(long)]
    min_height: Option<f64>,
    #[arg(long)]
    door_drag_reach: Option<f64>,
    #[arg(long)]
    history_depth: Option<usize>,
    #[arg(long)]
    cm_per_unit: Option<f64>,
    /// JSON preset table to load on top of the built-in presets.
    #[arg(long, env = "FLOORPLAN_PRESETS")]
    presets: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON script through the engine and print the final scene.
    Replay { script: PathBuf },
    /// Print the preset catalog.
    Presets,
}

impl Tuning {
    fn config(&self) -> EditorConfig {
        let mut config = EditorConfig::from_env();
        config.snap_step = self.snap_step.unwrap_or(config.snap_step);
        config.grid_step = self.grid_step.unwrap_or(config.grid_step);
        config.min_width = self.min_width.unwrap_or(config.min_width);
        config.min_height = self.min_height.unwrap_or(config.min_height);
        config.door_drag_reach = self.door_drag_reach.unwrap_or(config.door_drag_reach);
        config.history_depth = self.history_depth.unwrap_or(config.history_depth);
        if let Some(cm) = self.cm_per_unit {
            config.units = UnitScale::new(cm);
        }
        config
    }

    fn catalog(&self) -> Result<PresetCatalog, CliError> {
        let mut catalog = PresetCatalog::builtin();
        if let Some(path) = &self.presets {
            let extra = PresetCatalog::from_json(&std::fs::read_to_string(path)?)?;
            for row in extra.entries() {
                catalog.insert(row.kind, &row.name, row.preset);
            }
        }
        Ok(catalog)
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    match &cli.command {
        Command::Replay { script: path } => run_replay(&cli.tuning, path),
        Command::Presets => run_presets(&cli.tuning),
    }
}

fn run_replay(tuning: &Tuning, path: &Path) -> Result<(), CliError> {
    let steps = script::load(path)?;
    let engine = EngineCore::new(tuning.config(), tuning.catalog()?);
    let mut runner = ScriptRunner::new(engine);
    runner.run(&steps)?;

    let report = runner.report();
    info!(
        steps = steps.len(),
        objects = report.objects.len(),
        history = report.history.len,
        "replay finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_presets(tuning: &Tuning) -> Result<(), CliError> {
    let catalog = tuning.catalog()?;
    println!("{}", serde_json::to_string_pretty(&catalog.entries())?);
    Ok(())
}
