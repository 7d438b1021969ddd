//! Blockwright headless editor
//!
//! Replays a pointer and keyboard script through the block editor, using the
//! analytic grid picker in place of a renderer, and prints the resulting
//! structure as JSON.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p blockwright-editor -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `-c, --config <PATH>`: JSON editor configuration (defaults otherwise)
//! - `-s, --script <PATH>`: JSON input script (built-in demo otherwise)
//! - `--print-config`: Print the effective configuration and exit
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod script;

use std::path::PathBuf;

use anyhow::Context;
use blockwright_app::{CameraSink, Editor, EditorConfig, SceneSink, ToolMode};
use blockwright_core::{BlockId, ColorIndex, GridCell};
use blockwright_render::{Camera, CameraOrbitState, GridPicker};
use blockwright_world::{Block, GhostPreview};
use glam::Vec2;
use serde::Serialize;
use tracing::{debug, info};

/// Command line options.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    print_config: bool,
}

impl Args {
    fn from_args() -> anyhow::Result<Self> {
        let mut args = Self::default();
        let argv: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < argv.len() {
            match argv[i].as_str() {
                "-c" | "--config" => {
                    let path = argv.get(i + 1).context("--config needs a path")?;
                    args.config = Some(PathBuf::from(path));
                    i += 1;
                }
                "-s" | "--script" => {
                    let path = argv.get(i + 1).context("--script needs a path")?;
                    args.script = Some(PathBuf::from(path));
                    i += 1;
                }
                "--print-config" => args.print_config = true,
                other => anyhow::bail!("unknown argument {other:?} (try --help)"),
            }
            i += 1;
        }

        Ok(args)
    }
}

/// Logs scene changes and counts structural edits.
#[derive(Debug, Default)]
struct LoggingScene {
    added: usize,
    removed: usize,
}

impl SceneSink for LoggingScene {
    fn block_added(&mut self, block: &Block) {
        self.added += 1;
        info!(id = %block.id, cell = %block.cell, color = block.color.0, "scene: block added");
    }

    fn block_removed(&mut self, block: &Block) {
        self.removed += 1;
        info!(id = %block.id, cell = %block.cell, "scene: block removed");
    }

    fn selection_changed(&mut self, id: BlockId, selected: bool) {
        info!(%id, selected, "scene: selection changed");
    }

    fn ghost_changed(&mut self, ghost: GhostPreview) {
        debug!(cell = ?ghost.cell(), "scene: ghost moved");
    }

    fn transparency_changed(&mut self, transparent: bool) {
        info!(transparent, "scene: transparency changed");
    }

    fn tool_changed(&mut self, tool: ToolMode) {
        info!(?tool, "scene: tool changed");
    }
}

struct LoggingCamera;

impl CameraSink for LoggingCamera {
    fn camera_changed(&mut self, camera: &Camera, orbit: &CameraOrbitState) {
        debug!(position = ?camera.position, distance = orbit.distance, "camera moved");
    }
}

#[derive(Serialize)]
struct BlockRecord {
    id: BlockId,
    cell: GridCell,
    color: ColorIndex,
    /// Palette colour as `#RRGGBB`.
    rgb: String,
}

/// Final editor state printed on stdout.
#[derive(Serialize)]
struct Summary {
    blocks: Vec<BlockRecord>,
    selected: Vec<BlockId>,
    tool: ToolMode,
    color: ColorIndex,
    orbit: CameraOrbitState,
    added: usize,
    removed: usize,
}

fn main() -> anyhow::Result<()> {
    // Check for help flag before parsing anything else
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }
    let args = Args::from_args()?;

    blockwright_app::init_logging("info");

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    #[allow(clippy::cast_precision_loss)]
    let viewport = Vec2::new(config.viewport[0] as f32, config.viewport[1] as f32);
    let steps = match &args.script {
        Some(path) => script::load(path)?,
        None => script::demo(viewport),
    };

    let mut editor = Editor::new(
        config,
        GridPicker::new(viewport),
        LoggingScene::default(),
        LoggingCamera,
    )?;
    info!(steps = steps.len(), "replaying script");
    for (index, step) in steps.iter().enumerate() {
        step.apply(&mut editor)
            .with_context(|| format!("step {index}: {step:?}"))?;
    }

    let mut selected: Vec<BlockId> = editor.store().selection().collect();
    selected.sort_unstable();
    let summary = Summary {
        blocks: editor
            .store()
            .blocks()
            .iter()
            .map(|b| BlockRecord {
                id: b.id,
                cell: b.cell,
                color: b.color,
                rgb: format!("#{:06X}", editor.palette().rgb(b.color)),
            })
            .collect(),
        selected,
        tool: editor.tool(),
        color: editor.color(),
        orbit: *editor.orbit(),
        added: editor.scene().added,
        removed: editor.scene().removed,
    };
    info!(
        blocks = summary.blocks.len(),
        added = summary.added,
        removed = summary.removed,
        "script finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn print_help() {
    eprintln!(
        "Blockwright headless editor

USAGE:
    cargo run -p blockwright-editor -- [OPTIONS]

OPTIONS:
    -c, --config <PATH>     JSON editor configuration (default: built-in)
    -s, --script <PATH>     JSON input script (default: built-in demo)
    --print-config          Print the effective configuration and exit
    -h, --help              Print this help message

SCRIPT FORMAT:
    A JSON array of steps tagged by \"op\":
    mouse_down/mouse_move/mouse_up {{x, y, t_ms, button?}},
    touch_down/touch_move/touch_up {{id, x, y, t_ms}}, wheel {{delta}},
    key {{key, pressed?}}, tool {{tool}}, color {{index}}, tick {{count?}},
    resize {{width, height}}

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
