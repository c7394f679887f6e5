// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Headless frame renderer.
//!
//! Runs the animation against a recording surface for a fixed number of
//! ticks and writes every Nth frame as SVG, plus per-tick statistics as JSON.
//! `--update <tick>:<json>` queues a configuration patch that is applied at
//! the start of that tick, the same way a host thread would push one.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use neuroglow::burst_engine::{FrameLoopRunner, FrameStats, ManualFrameScheduler, ManualResizeNotifier};
use neuroglow::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config, ConfigPatch,
    NeuroglowConfig,
};
use neuroglow::observability::{debug_flags_help, init_console_logging, parse_debug_flags, LoggingConfig};
#[cfg(feature = "file-logging")]
use neuroglow::observability::{init_logging, LoggingGuard};
use neuroglow::viz::RecordingSurface;
use tracing::{info, warn};

/// Simulated display rate used for the pulse phase
const FRAME_INTERVAL_SECS: f64 = 1.0 / 60.0;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: render_frames [--config <path>] [--ticks <n>] [--every <n>] [--out-dir <path>]\n\
         \x20                    [--width <px>] [--height <px>] [--seed <u64>] [--layers <a,b,c>]\n\
         \x20                    [--update <tick>:<json-patch>]... [--log-dir <path>]\n\
         \x20                    [--debug-<crate>] [--debug-all]\n\n\
         --log-dir needs the `file-logging` feature.\n\n\
         Defaults:\n\
         - ticks: 300\n\
         - every: 30\n\
         - out-dir: frames\n\
         - width x height: 800 x 600\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

struct Args {
    config_path: Option<PathBuf>,
    ticks: u64,
    every: u64,
    out_dir: PathBuf,
    width: f32,
    height: f32,
    overrides: HashMap<String, String>,
    /// (tick, patch) in command-line order
    updates: Vec<(u64, ConfigPatch)>,
    log_dir: Option<PathBuf>,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {flag}: {value}");
        usage_and_exit()
    })
}

/// `<tick>:<json>`; the JSON itself may contain colons
fn parse_update(value: &str) -> (u64, ConfigPatch) {
    let Some((tick, json)) = value.split_once(':') else {
        eprintln!("Invalid value for --update (expected <tick>:<json>): {value}");
        usage_and_exit()
    };
    let tick = parse_number("--update", tick.trim());
    let patch = ConfigPatch::from_json(json).unwrap_or_else(|e| {
        eprintln!("Invalid patch for --update: {e}");
        usage_and_exit()
    });
    (tick, patch)
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config_path: None,
        ticks: 300,
        every: 30,
        out_dir: PathBuf::from("frames"),
        width: 800.0,
        height: 600.0,
        overrides: HashMap::new(),
        updates: Vec::new(),
        log_dir: None,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config_path = Some(PathBuf::from(v));
            }
            "--ticks" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.ticks = parse_number(&arg, &v);
            }
            "--every" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.every = parse_number::<u64>(&arg, &v).max(1);
            }
            "--out-dir" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.out_dir = PathBuf::from(v);
            }
            "--width" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.width = parse_number(&arg, &v);
            }
            "--height" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.height = parse_number(&arg, &v);
            }
            "--seed" | "--layers" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.overrides.insert(arg.trim_start_matches("--").to_string(), v);
            }
            "--update" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.updates.push(parse_update(&v));
            }
            "--log-dir" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.log_dir = Some(PathBuf::from(v));
            }
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

/// Explicit file, then a discovered `neuroglow.toml`, then built-in defaults
fn resolve_config(args: &Args) -> Result<NeuroglowConfig> {
    if let Some(path) = args.config_path.as_deref() {
        return load_config(Some(path), Some(&args.overrides))
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    if let Ok(path) = find_config_file() {
        return load_config(Some(&path), Some(&args.overrides))
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let mut config = NeuroglowConfig::default();
    apply_environment_overrides(&mut config);
    apply_cli_overrides(&mut config, &args.overrides);
    Ok(config)
}

/// Console logging, plus a JSON run folder under `--log-dir`
///
/// The returned guard must live until the end of the run.
#[cfg(feature = "file-logging")]
fn init_tool_logging(args: &Args, level: &str) -> Result<Option<LoggingGuard>> {
    let logging = LoggingConfig {
        level: level.to_string(),
        log_dir: args.log_dir.clone(),
        ..Default::default()
    };
    if args.log_dir.is_none() {
        init_console_logging(&parse_debug_flags(), &logging)?;
        return Ok(None);
    }
    let guard = init_logging(&parse_debug_flags(), &logging)?;
    println!("[render_frames] logging to {}", guard.log_dir().display());
    Ok(Some(guard))
}

#[cfg(not(feature = "file-logging"))]
fn init_tool_logging(args: &Args, level: &str) -> Result<()> {
    if args.log_dir.is_some() {
        eprintln!("--log-dir ignored: built without the `file-logging` feature");
    }
    let logging = LoggingConfig {
        level: level.to_string(),
        ..Default::default()
    };
    init_console_logging(&parse_debug_flags(), &logging)
}

fn main() -> Result<()> {
    let args = parse_args();
    let config = resolve_config(&args)?;
    let _log_guard = init_tool_logging(&args, &config.system.log_level)?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    println!(
        "[render_frames] layers={:?} seed={:?} ticks={} every={} surface={}x{} out_dir={}",
        config.topology.layers,
        config.system.seed,
        args.ticks,
        args.every,
        args.width,
        args.height,
        args.out_dir.display()
    );

    let driver = ManualFrameScheduler::new();
    let mut engine = FrameLoopRunner::new(
        config,
        Box::new(driver.clone()),
        Box::new(ManualResizeNotifier::new()),
    )
    .with_surface(RecordingSurface::new(args.width, args.height));
    engine.start()?;
    let updates = engine.configuration_handle();

    let mut history: Vec<FrameStats> = Vec::with_capacity(args.ticks as usize);
    let mut frames_written = 0usize;
    let mut now_secs = 0.0;
    let mut queued_through = 0u64;
    while history.len() < args.ticks as usize {
        let next_tick = engine.tick_count() + 1;
        if next_tick > queued_through {
            for (_, patch) in args.updates.iter().filter(|(tick, _)| *tick == next_tick) {
                updates.push(patch.clone());
            }
            queued_through = next_tick;
        }

        let Some(handle) = driver.take_pending() else {
            bail!("Engine stopped requesting ticks after {} frames", history.len());
        };
        let Some(stats) = engine.on_frame(handle, now_secs) else {
            warn!("[render_frames] Tick {:?} was not applied", handle);
            continue;
        };
        now_secs += FRAME_INTERVAL_SECS;

        if stats.tick % args.every == 0 {
            if let Some(surface) = engine.surface() {
                let path = args.out_dir.join(format!("frame_{:05}.svg", stats.tick));
                fs::write(&path, surface.to_svg())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                frames_written += 1;
            }
        }
        history.push(stats);
    }
    engine.stop();

    let stats_path = args.out_dir.join("stats.json");
    let json = serde_json::to_string_pretty(&history)?;
    fs::write(&stats_path, json).with_context(|| format!("Failed to write {}", stats_path.display()))?;

    let peak_active = history.iter().map(|s| s.dynamics.active_nodes).max().unwrap_or(0);
    info!(
        "[render_frames] Rendered {} ticks, wrote {} frames (peak {} active nodes)",
        history.len(),
        frames_written,
        peak_active
    );
    println!(
        "[render_frames] done: {} frames written, stats in {}",
        frames_written,
        stats_path.display()
    );
    Ok(())
}
