//! Dot Arena entry point
//!
//! Headless native driver: the seeded autopilot steers the dot around the
//! arena described by a settings file, rendering into a software canvas.
//!
//! Usage: `dot-arena [SETTINGS.json] [--frames N] [--dump FRAME.ppm] [--realtime]`

use std::path::PathBuf;

use anyhow::{Context, bail};

use dot_arena::Settings;
use dot_arena::platform::{ManualClock, RandomInput, SystemClock, TickSource};
use dot_arena::renderer::Canvas;
use dot_arena::sim::{RunLimits, RunSummary, Scene, run};

#[derive(Debug, Default)]
struct Args {
    settings: Option<PathBuf>,
    frames: Option<u64>,
    dump: Option<PathBuf>,
    realtime: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                let n = iter.next().context("--frames needs a value")?;
                args.frames = Some(n.parse().with_context(|| format!("bad frame count {n:?}"))?);
            }
            "--dump" => {
                args.dump = Some(iter.next().context("--dump needs a path")?.into());
            }
            "--realtime" => args.realtime = true,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => args.settings = Some(path.into()),
        }
    }
    Ok(args)
}

fn run_with_clock(
    settings: &Settings,
    frames: u64,
    clock: &impl TickSource,
    canvas: &mut Canvas,
) -> RunSummary {
    let mut scene = Scene::from_settings(settings);
    let mut input = RandomInput::new(settings.demo_seed, frames);
    let summary = run(
        &mut scene,
        &mut input,
        clock,
        canvas,
        RunLimits {
            // Autopilot quits after `frames`; one extra frame to drain it
            max_frames: Some(frames + 1),
            fps_cap: settings.fps_cap,
        },
    );
    log::info!("Dot finished at {:?}", scene.dot.position());
    summary
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Dot Arena (headless) starting...");

    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let frames = args.frames.unwrap_or(settings.demo_frames);

    let mut canvas = Canvas::new(
        settings.screen_width.round() as u32,
        settings.screen_height.round() as u32,
    );
    let summary = if args.realtime {
        run_with_clock(&settings, frames, &SystemClock::new(), &mut canvas)
    } else {
        run_with_clock(&settings, frames, &ManualClock::new(0), &mut canvas)
    };

    println!(
        "frames: {}  elapsed: {} ms  avg fps: {:.1}  blocked frames: {}",
        summary.frames, summary.elapsed_ms, summary.average_fps, summary.blocked_frames
    );

    if let Some(path) = &args.dump {
        canvas
            .write_ppm(path)
            .with_context(|| format!("dumping final frame to {}", path.display()))?;
    }
    Ok(())
}
