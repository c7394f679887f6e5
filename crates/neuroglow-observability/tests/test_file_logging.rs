// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! File logging runs in its own test binary: it installs the global subscriber.

#![cfg(feature = "file-logging")]

use neuroglow_observability::{init_logging, CrateDebugFlags, LoggingConfig};

#[test]
fn test_init_logging_writes_run_folder() {
    let base = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        log_dir: Some(base.path().to_path_buf()),
        ..Default::default()
    };

    let guard = init_logging(&CrateDebugFlags::default(), &config).unwrap();
    let run_dir = guard.log_dir().to_path_buf();
    assert!(run_dir.starts_with(base.path()));
    assert!(run_dir
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("run_")));

    tracing::info!("[FRAME-LOOP] file logging smoke entry");
    drop(guard);

    let files: Vec<_> = std::fs::read_dir(&run_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("neuroglow.log"))
        .collect();
    assert!(!files.is_empty());

    // A second global subscriber cannot be installed
    assert!(init_logging(&CrateDebugFlags::default(), &config).is_err());
}
