// SPDX-License-Identifier: MIT OR Apache-2.0
//! `camrail` - headless camera rail tool.
//!
//! - `sample`: print poses along a saved rail
//! - `demo`: drive a scripted pointer session and save the resulting rail

use camrail_editor::{
    EditorCamera, EditorMode, EditorSettings, EditorState, PointerButton, PointerEvent,
    RailInteraction, RailVisuals, Result, Viewport, SETTINGS_FILE_NAME,
};
use camrail_rail::RailDocument;
use clap::{Parser, Subcommand};
use glam::{Vec2, Vec3};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "camrail", version, about = "Author and inspect camera rails")]
struct Cli {
    /// Editor settings file
    #[arg(long, global = true, default_value = SETTINGS_FILE_NAME)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print camera poses along a rail document
    Sample {
        /// Rail document to read
        file: PathBuf,
        /// Number of evenly spaced samples
        #[arg(long, default_value_t = 11)]
        steps: usize,
    },
    /// Run a scripted editing session and save the rail
    Demo {
        /// Where to write the rail document
        #[arg(long, default_value = "demo.rail.json")]
        output: PathBuf,
        /// Scene reference stored in the document
        #[arg(long, default_value = "scenes/demo.glb")]
        scene: String,
    },
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("camrail_editor=debug,camrail_rail=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("camrail v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("camrail failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = EditorSettings::load(&cli.settings)?;
    match cli.command {
        Command::Sample { file, steps } => sample(&file, steps, &settings),
        Command::Demo { output, scene } => demo(&output, scene, &settings),
    }
}

fn sample(file: &Path, steps: usize, settings: &EditorSettings) -> Result<()> {
    let document = RailDocument::load(file)?;
    let rail = document.to_rail();
    if rail.is_empty() {
        tracing::warn!("Rail in {:?} has no control points", file);
        return Ok(());
    }

    let steps = steps.max(2);
    let mut playback = settings.playback_controller();
    let seconds = playback.duration;
    for i in 0..steps {
        playback.seek(i as f32 / (steps - 1) as f32);
        if let Some(pose) = playback.pose(&rail) {
            let p = pose.position;
            let q = pose.orientation;
            println!(
                "t={:.3} time={:.2}s position=({:.3}, {:.3}, {:.3}) orientation=({:.4}, {:.4}, {:.4}, {:.4})",
                playback.progress(),
                playback.progress() * seconds,
                p.x,
                p.y,
                p.z,
                q.x,
                q.y,
                q.z,
                q.w
            );
        }
    }
    Ok(())
}

fn demo(output: &Path, scene: String, settings: &EditorSettings) -> Result<()> {
    let viewport = Viewport::new(800.0, 600.0);
    let mut state = EditorState::new(scene);
    let mut camera = EditorCamera::looking_at(Vec3::new(0.0, 2.0, 12.0), Vec3::ZERO);
    camera.aspect = viewport.aspect();
    let mut visuals = RailVisuals::new(settings);
    let mut interaction = RailInteraction::new(viewport, settings);

    let click = |position: Vec2| {
        [
            PointerEvent::Down {
                position,
                button: PointerButton::Primary,
            },
            PointerEvent::Up {
                position,
                button: PointerButton::Primary,
            },
        ]
    };

    // Place three points, orbiting between placements
    for (x, orbit) in [(200.0, 0.0), (400.0, 40.0), (600.0, 40.0)] {
        camera.orbit(orbit, 0.0);
        state.set_mode(EditorMode::Create);
        for event in click(Vec2::new(x, 300.0)) {
            interaction.handle_pointer(event, &mut state, &mut camera, &mut visuals);
        }
    }

    // Frame the placed points before editing them
    if !state.rail.is_empty() {
        let centroid = state.rail.points().iter().map(|p| p.position).sum::<Vec3>() / state.rail.len() as f32;
        camera.focus(centroid, None);
        camera.zoom(0.5);
    }

    // Drag the last point upward from its projected screen position
    if let Some(last) = state.rail.points().last().map(|p| p.id.clone()) {
        if let Some(start) = project(&camera, viewport, state.rail.get_point(&last).map(|p| p.position)) {
            let events = [
                PointerEvent::Down {
                    position: start,
                    button: PointerButton::Primary,
                },
                PointerEvent::Move {
                    position: start - Vec2::new(0.0, 60.0),
                },
                PointerEvent::Up {
                    position: start - Vec2::new(0.0, 60.0),
                    button: PointerButton::Primary,
                },
            ];
            for event in events {
                interaction.handle_pointer(event, &mut state, &mut camera, &mut visuals);
            }
        }
    }

    // Delete the first point the way a point list panel would
    if let Some(first) = state.rail.points().first().map(|p| p.id.clone()) {
        interaction.command_sender().delete_point(first);
        interaction.process_commands(&mut state, &mut visuals);
    }

    for event in state.take_events() {
        tracing::debug!("Editor event: {:?}", event);
    }

    preview(&state, &mut camera, settings);

    state.save_document_to_path(output)?;
    println!("Saved {} control points to {}", state.rail.len(), output.display());
    Ok(())
}

/// Fly the editor camera along the rail for one pass of the playback duration
fn preview(state: &EditorState, camera: &mut EditorCamera, settings: &EditorSettings) {
    const PREVIEW_FRAMES: usize = 60;

    let mut playback = settings.playback_controller();
    let dt = playback.duration / PREVIEW_FRAMES as f32;
    playback.play();
    for _ in 0..PREVIEW_FRAMES {
        playback.update(dt);
        if let Some(pose) = playback.pose(&state.rail) {
            camera.set_pose(&pose);
        }
    }
    tracing::info!(
        "Previewed rail: progress {:.2}, camera at {:?}{}",
        playback.progress(),
        camera.position,
        if playback.looping { " (looping)" } else { "" }
    );
}

/// Project a world position to viewport pixels through the editor camera
fn project(camera: &EditorCamera, viewport: Viewport, world: Option<Vec3>) -> Option<Vec2> {
    let world = world?;
    let to_point = world - camera.position;
    let depth = to_point.dot(camera.get_forward());
    if depth <= 0.0 {
        return None;
    }

    let half_height = (camera.fov.to_radians() * 0.5).tan();
    let half_width = half_height * camera.aspect;
    let ndc = Vec2::new(
        to_point.dot(camera.right()) / (depth * half_width),
        to_point.dot(camera.camera_up()) / (depth * half_height),
    );
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    ))
}
