use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shape_editor::config::{ConfigError, EditorConfig};
use shape_editor::engine::EngineCore;
use shape_editor::script::{self, ScriptError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "shape-editor", about = "Headless rectangle editor driven by gesture scripts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON gesture script and print the resulting rectangle.
    Replay {
        /// Script file; falls back to `EDITOR_SCRIPT`.
        #[arg(env = "EDITOR_SCRIPT")]
        path: PathBuf,
        /// Also print the final scene as JSON.
        #[arg(long)]
        scene: bool,
    },
    /// Print the effective configuration as JSON.
    Config,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env()?;

    match cli.command {
        Command::Replay { path, scene } => run_replay(&config, path, scene),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn run_replay(config: &EditorConfig, path: PathBuf, print_scene: bool) -> Result<(), CliError> {
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(source) => return Err(CliError::Read { path, source }),
    };
    let events = script::parse(&json)?;

    let mut core = EngineCore::new(config);
    let summary = script::run(&mut core, &events);
    tracing::info!(
        events = summary.events,
        actions = summary.actions,
        frames = summary.frames,
        "replay finished"
    );

    println!("{}", core.info());
    if print_scene {
        println!("{}", serde_json::to_string_pretty(&core.scene())?);
    }
    Ok(())
}
