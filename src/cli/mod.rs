//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations. The CLI plays the part of the
//! presentation layer: it opens a project, drives a [`Session`] with editor
//! commands, and writes the project back.

mod draw;
mod export;
mod frame;
mod info;
mod new;
mod run;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, SpriteConfig};
use crate::edit::Tool;
use crate::session::Session;

pub use frame::FrameAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Spritekit - edit multi-frame pixel sprites stored in .ssp project files
#[derive(Parser)]
#[command(name = "spr")]
#[command(about = "Spritekit - edit multi-frame pixel sprites stored in .ssp project files")]
#[command(version)]
pub struct Cli {
    /// Log every editor command (debug level; RUST_LOG overrides otherwise)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to sprite.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project with a single blank frame
    New {
        /// Project file to create (.ssp)
        file: PathBuf,

        /// Sprite width and height in pixels (1-64, default from config: 16)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
        width: Option<u32>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show width and frame count of a project, or of every project in a directory
    Info {
        /// Project file or directory to scan
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a tool at one or more points on a frame
    Draw {
        /// Project file to edit
        file: PathBuf,

        /// Frame to edit (0-based, default: 0)
        #[arg(short, long)]
        frame: Option<usize>,

        /// Tool to apply (default from config: pen)
        #[arg(short, long, value_enum)]
        tool: Option<Tool>,

        /// Drawing color: hex, rgb(), hsl() or a CSS name (default from config)
        #[arg(short, long)]
        color: Option<String>,

        /// Point to apply the tool at: x,y (repeatable, applied in order)
        #[arg(long = "at", value_name = "X,Y", required = true)]
        points: Vec<String>,

        /// Output file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Apply the edits without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage frames: add, delete, duplicate, list
    Frame {
        /// Project file to edit
        file: PathBuf,

        #[command(subcommand)]
        action: FrameAction,
    },

    /// Run a JSON-lines command script against a project and print the events
    Run {
        /// Project file (created from config defaults if missing)
        file: PathBuf,

        /// Script with one command per line ("-" for stdin)
        script: PathBuf,

        /// Do not write the project back after the script
        #[arg(long)]
        no_save: bool,
    },

    /// Export a frame as PNG, the animation as GIF, or a spritesheet
    Export {
        /// Project file to read
        file: PathBuf,

        /// Output image path
        output: PathBuf,

        /// Frame to export as PNG (0-based, default: 0)
        #[arg(short, long, conflicts_with_all = ["gif", "sheet"])]
        frame: Option<usize>,

        /// Export every frame as an animated GIF
        #[arg(long, conflicts_with = "sheet")]
        gif: bool,

        /// Export every frame as a spritesheet
        #[arg(long)]
        sheet: bool,

        /// Scale output by integer factor (1-64, default from config: 1)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: Option<u32>,

        /// Spritesheet columns (default: all frames in one row)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        columns: Option<u32>,

        /// GIF frame duration in milliseconds (default from config: 100)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        frame_ms: Option<u32>,
    },
}

/// Parse CLI arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::New { file, width, force } => {
            let overrides = CliOverrides { width, ..Default::default() };
            new::run_new(&file, config, &overrides, force)
        }
        Commands::Info { path, json } => info::run_info(&path, json),
        Commands::Draw { file, frame, tool, color, points, output, dry_run } => {
            let overrides = CliOverrides { tool, color, ..Default::default() };
            draw::run_draw(&file, config, &overrides, frame, &points, output.as_deref(), dry_run)
        }
        Commands::Frame { file, action } => frame::run_frame(&file, action),
        Commands::Run { file, script, no_save } => run::run_script(&file, &script, config, no_save),
        Commands::Export { file, output, frame, gif, sheet, scale, columns, frame_ms } => {
            let overrides = CliOverrides { scale, columns, frame_ms, ..Default::default() };
            export::run_export(&file, &output, config, &overrides, frame, gif, sheet)
        }
    }
}

/// Install the stderr log subscriber.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when run() is called twice in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load sprite.toml and apply command-line overrides, reporting failures.
pub(crate) fn load_settings(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<SpriteConfig, ExitCode> {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    if let Err(e) = merge_cli_overrides(&mut config, overrides) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Build a session with the configured tool and color and no project loaded yet.
pub(crate) fn configured_session(config: &SpriteConfig) -> Result<Session, ExitCode> {
    let mut session = match Session::new(config.editor.width) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    session.select_tool(config.editor.tool);
    match config.initial_color() {
        Ok(color) => session.select_color(color),
        Err(e) => {
            eprintln!("Error: invalid color '{}': {}", config.editor.color, e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    }
    Ok(session)
}

/// Load a project into a session, reporting failures.
pub(crate) fn open_project(session: &mut Session, file: &Path) -> Result<(), ExitCode> {
    match session.load_project(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: cannot open '{}': {}", file.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Parse an `x,y` coordinate pair. Negative values are accepted here and
/// rejected later by the bounds check.
pub(crate) fn parse_point(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("invalid point '{}', expected x,y", s))?;
    let x = x.trim().parse::<i32>().map_err(|_| format!("invalid x coordinate in '{}'", s))?;
    let y = y.trim().parse::<i32>().map_err(|_| format!("invalid y coordinate in '{}'", s))?;
    Ok((x, y))
}
