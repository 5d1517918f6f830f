//! `vantage` command-line shell.
//!
//! Loads a scene manifest into the headless engine, replays a JSON input
//! script through the viewer and reports the resulting camera and playback
//! state as JSON on stdout.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use vantage::camera::CameraPose;
use vantage::engine::HeadlessEngine;
use vantage::options::Options;
use vantage::sidebar::SidebarState;
use vantage::{InputEvent, Viewer};

#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(about = "Replay viewer input against a scene manifest", long_about = None)]
struct Cli {
    /// Scene manifest (.toml) with bounds and an optional animation range
    #[arg(required_unless_present_any = ["dump_options", "schema"])]
    scene: Option<PathBuf>,
    /// Options preset (.toml) overriding the defaults
    #[arg(long)]
    options: Option<PathBuf>,
    /// JSON array of input events to replay, one frame apart
    #[arg(long)]
    script: Option<PathBuf>,
    /// Extra frames to run after the script
    #[arg(long, default_value_t = 60)]
    frames: u32,
    /// Print the effective options as TOML and exit
    #[arg(long)]
    dump_options: bool,
    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,
}

/// State reported after the replay.
#[derive(Serialize)]
struct Report {
    camera: CameraPose,
    animation_time: f64,
    playing: bool,
    frames_rendered: u64,
    sidebar: SidebarState,
}

fn load_script(path: &Path) -> Result<Vec<InputEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing script {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = match &cli.options {
        Some(path) => Options::load(path)
            .with_context(|| format!("loading options {}", path.display()))?,
        None => Options::default(),
    };

    let mut out = io::stdout().lock();
    if cli.schema {
        serde_json::to_writer_pretty(&mut out, &Options::json_schema())?;
        writeln!(out)?;
        return Ok(());
    }
    if cli.dump_options {
        write!(out, "{}", options.to_toml()?)?;
        return Ok(());
    }

    let Some(scene) = cli.scene else {
        bail!("a scene manifest is required");
    };
    let script = match &cli.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let dt = options.playback.tick_interval();
    let mut viewer = Viewer::builder()
        .with_path(&scene)
        .with_options(options)
        .with_size(1280, 720)
        .build();
    viewer
        .start(HeadlessEngine::new())
        .with_context(|| format!("starting viewer on {}", scene.display()))?;

    let step = |viewer: &mut Viewer<HeadlessEngine>| {
        let _ = viewer.on_tick(dt);
        let _ = viewer.on_frame(dt);
    };
    for event in &script {
        log::debug!("replaying {event:?}");
        let _ = viewer.handle_input(event);
        step(&mut viewer);
    }
    for _ in 0..cli.frames {
        step(&mut viewer);
    }

    let Some(engine) = viewer.engine() else {
        bail!("viewer has no engine");
    };
    let Some(camera) = viewer.camera_pose() else {
        bail!("viewer has no camera");
    };
    let report = Report {
        camera,
        animation_time: engine.animation_time(),
        playing: viewer.clock().is_playing(),
        frames_rendered: engine.frames_rendered(),
        sidebar: viewer.sidebar_state(),
    };
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}
