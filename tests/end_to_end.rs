// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests through the umbrella crate
//!
//! Configuration file -> engine -> recorded frames, the way the
//! `render_frames` tool uses the library.

use neuroglow::config::load_config;
use neuroglow::prelude::*;
use neuroglow::viz::DrawCommand;
use std::io::Write;
use tempfile::NamedTempFile;

// ═══════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════

fn engine(config: NeuroglowConfig) -> (FrameLoopRunner<RecordingSurface>, ManualFrameScheduler) {
    let driver = ManualFrameScheduler::new();
    let runner = FrameLoopRunner::new(
        config,
        Box::new(driver.clone()),
        Box::new(ManualResizeNotifier::new()),
    )
    .with_surface(RecordingSurface::new(640.0, 480.0));
    (runner, driver)
}

fn run(runner: &mut FrameLoopRunner<RecordingSurface>, driver: &ManualFrameScheduler, ticks: u64) -> Vec<FrameStats> {
    let mut history = Vec::new();
    for i in 0..ticks {
        let handle = driver.take_pending().expect("a tick should be pending");
        if let Some(stats) = runner.on_frame(handle, i as f64 / 60.0) {
            history.push(stats);
        }
    }
    history
}

fn seeded(seed: u64) -> NeuroglowConfig {
    let mut config = NeuroglowConfig::default();
    config.system.seed = Some(seed);
    config
}

// ═══════════════════════════════════════════════════════════
// Configuration File to Frames
// ═══════════════════════════════════════════════════════════

#[test]
fn test_toml_config_drives_engine() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[system]
seed = 7

[topology]
layers = [2, 3, 2]
max_connections_per_node = 2

[connections]
curved = false
"#,
    )
    .unwrap();

    let config = load_config(Some(file.path()), None).unwrap();
    let (mut runner, driver) = engine(config);
    runner.start().unwrap();

    let topology = runner.topology().unwrap();
    assert_eq!(topology.layer_sizes(), &[2, 3, 2]);
    assert_eq!(topology.connection_count(), 2 * 2 + 3 * 2);
    assert_eq!(topology.connections().count(), topology.connection_count());

    let history = run(&mut runner, &driver, 30);
    assert_eq!(history.len(), 30);
    assert_eq!(history.last().unwrap().tick, 30);

    let surface = runner.surface().unwrap();
    assert_eq!(surface.circle_count(), 7);
    assert_eq!(surface.frames_cleared(), 30);
}

#[test]
fn test_frame_draws_connections_before_nodes() {
    let (mut runner, driver) = engine(seeded(3));
    runner.start().unwrap();
    for node in runner.topology_mut().unwrap().nodes_mut() {
        node.activation_level = 1.0;
    }
    run(&mut runner, &driver, 1);

    let commands = runner.surface().unwrap().commands();
    let first_circle = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::FillCircle { .. }))
        .unwrap();
    assert!(commands[..first_circle]
        .iter()
        .all(|c| matches!(c, DrawCommand::StrokePath { .. })));
    assert!(commands[first_circle..]
        .iter()
        .all(|c| matches!(c, DrawCommand::FillCircle { .. })));
}

#[test]
fn test_svg_export_of_running_frame() {
    let (mut runner, driver) = engine(seeded(11));
    runner.start().unwrap();
    run(&mut runner, &driver, 5);

    let svg = runner.surface().unwrap().to_svg();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<circle").count(), runner.topology().unwrap().node_count());
}

#[test]
fn test_stats_serialize_to_json() {
    let (mut runner, driver) = engine(seeded(5));
    runner.start().unwrap();
    let history = run(&mut runner, &driver, 3);

    let json = serde_json::to_value(&history).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[2]["tick"], 3);
    assert!(json[0]["dynamics"]["active_nodes"].is_u64());
}

// ═══════════════════════════════════════════════════════════
// Runtime Updates and Isolation
// ═══════════════════════════════════════════════════════════

#[test]
fn test_update_from_another_thread() {
    let (mut runner, driver) = engine(seeded(9));
    runner.start().unwrap();
    let generation = runner.generation();

    let handle = runner.configuration_handle();
    std::thread::spawn(move || {
        handle.push(ConfigPatch {
            layers: Some(vec![3, 3]),
            ..Default::default()
        });
    })
    .join()
    .unwrap();

    let history = run(&mut runner, &driver, 1);
    assert_eq!(history[0].generation, generation + 1);
    assert_eq!(runner.topology().unwrap().layer_sizes(), &[3, 3]);
    assert_eq!(runner.get_configuration().topology.layers, vec![3, 3]);
    assert!(runner.is_running());
}

#[test]
fn test_independent_engines_do_not_interfere() {
    let (mut a, driver_a) = engine(seeded(21));
    let (mut b, driver_b) = engine(seeded(21));
    a.start().unwrap();
    b.start().unwrap();

    let history_a = run(&mut a, &driver_a, 50);
    b.apply_configuration(ConfigPatch {
        decay_rate: Some(0.5),
        ..Default::default()
    });
    let history_b = run(&mut b, &driver_b, 50);

    assert_eq!(history_a.len(), 50);
    assert_eq!(history_b.len(), 50);
    assert_eq!(a.get_configuration().dynamics.decay_rate, 0.012);
    assert_eq!(b.get_configuration().dynamics.decay_rate, 0.5);

    a.stop();
    assert_eq!(a.state(), EngineState::Stopped);
    assert!(b.is_running());
}
