//! Headless water simulation runner.
//!
//! Usage: cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>       JSON config file (default: built-in defaults)
//!   --frames <N>          Frames to simulate (default: 600)
//!   --dt <SECS>           Fixed time step (default: 1/60)
//!   --seed <SEED>         Seed for initial heights (overrides config)
//!   --width <N>           Grid cells along X (overrides config)
//!   --length <N>          Grid cells along Z (overrides config)
//!   --splash <AMOUNT>     Add AMOUNT to the centre cell before the first frame
//!   --report-every <N>    Log field statistics every N frames (default: 60)
//!   --realtime            Pace frames at 60 Hz and use measured frame deltas
//!   --stats-json <PATH>   Write the final statistics as JSON

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use watersim::core::config::SimConfig;
use watersim::core::input::InputState;
use watersim::core::logging;
use watersim::core::time::FrameTimer;
use watersim::render::{CountingRenderer, TextureHandle};
use watersim::scene::WaterScene;

const TARGET_FRAME: Duration = Duration::from_micros(16_667);

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` if the field became non-finite.
fn run() -> watersim::core::Result<bool> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => SimConfig::load(&PathBuf::from(path))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = parse_arg::<u64>(&args, "--seed") {
        config.seed = Some(seed);
    }
    if let Some(width) = parse_arg::<usize>(&args, "--width") {
        config.width = width;
    }
    if let Some(length) = parse_arg::<usize>(&args, "--length") {
        config.length = length;
    }
    let frames = parse_arg::<u64>(&args, "--frames").unwrap_or(600);
    let fixed_dt = parse_arg::<f32>(&args, "--dt").unwrap_or(1.0 / 60.0);
    let report_every = parse_arg::<u64>(&args, "--report-every").unwrap_or(60).max(1);
    let splash = parse_arg::<f32>(&args, "--splash");
    let realtime = args.iter().any(|a| a == "--realtime");
    let stats_path = parse_str_arg(&args, "--stats-json").map(PathBuf::from);

    let mut scene = WaterScene::new(&config, 16.0 / 9.0)?;
    if let Some(amount) = splash {
        let (ci, cj) = (config.width / 2, config.length / 2);
        scene.field_mut().disturb(ci, cj, amount);
        log::info!("Splash of {} at ({}, {})", amount, ci, cj);
    }

    let input = InputState::new();
    let mut renderer = CountingRenderer::default();
    let texture = TextureHandle(0);
    let mut timer = FrameTimer::new().with_max_delta(config.max_frame_delta);

    log::info!(
        "Simulating {} frames ({})",
        frames,
        if realtime { "realtime".to_string() } else { format!("dt = {:.4}s", fixed_dt) }
    );

    let start = Instant::now();
    let mut stable = true;
    for frame in 1..=frames {
        let frame_start = Instant::now();
        let dt = if realtime { timer.tick() } else { fixed_dt };

        scene.update(dt, &input);
        // Counting renderer never fails
        let _ = scene.draw(&mut renderer, texture);

        if frame % report_every == 0 || frame == frames {
            let stats = scene.stats();
            log::info!(
                "frame {:>6}: height [{:.3}, {:.3}] mean {:.3}, max |v| {:.4}",
                frame,
                stats.min_height,
                stats.max_height,
                stats.mean_height,
                stats.max_speed
            );
            if !stats.is_finite() {
                log::error!("Field diverged at frame {}; use a smaller time step", frame);
                stable = false;
                break;
            }
        }

        if realtime {
            if let Some(rest) = TARGET_FRAME.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let elapsed = start.elapsed();
    log::info!(
        "{} frames in {:.2}s ({:.1} MB uploaded, {} triangles per draw)",
        scene.frames(),
        elapsed.as_secs_f64(),
        renderer.bytes_uploaded as f64 / (1024.0 * 1024.0),
        renderer.last_triangle_count
    );
    if realtime {
        log::info!("Measured {:.1} fps", timer.fps());
    }

    if let Some(path) = stats_path {
        let json = serde_json::to_string_pretty(&scene.stats())?;
        std::fs::write(&path, json)?;
        log::info!("Wrote statistics to {}", path.display());
    }

    Ok(stable)
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
