// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization
//!
//! Console output is always available. With the `file-logging` feature,
//! [`init_logging`] additionally writes JSON logs into a timestamped run folder
//! and prunes old runs.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

fn build_filter(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<EnvFilter> {
    let flags = if debug_flags.default_level.is_none() {
        debug_flags.clone().with_default_level(&config.level)
    } else {
        debug_flags.clone()
    };
    let filter = flags.to_filter_string();
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Install a console subscriber
///
/// # Errors
///
/// Fails if the filter cannot be parsed or a global subscriber is already set.
pub fn init_console_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(debug_flags, config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(feature = "file-logging")]
pub use file::{init_logging, LoggingGuard};

#[cfg(feature = "file-logging")]
mod file {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use std::path::{Path, PathBuf};
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{Layer, Registry};

    /// Keeps the non-blocking writers alive; logs flush on drop
    pub struct LoggingGuard {
        _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize console output plus a combined JSON log file
    ///
    /// Creates a timestamped folder structure:
    /// ```text
    /// ./logs/
    ///   └── run_20250101_120000/
    ///       └── neuroglow.log
    /// ```
    pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
        let base_log_dir = config
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./logs"));

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let run_folder = base_log_dir.join(format!("run_{}", timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_logs(&base_log_dir, config.retention_days, config.retention_runs)?;

        let env_filter = build_filter(debug_flags, config)?;

        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(env_filter.clone())
            .boxed();

        let appender = rolling::daily(&run_folder, "neuroglow.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(env_filter)
            .boxed();

        Registry::default()
            .with(vec![console_layer, file_layer])
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

        Ok(LoggingGuard {
            _file_guards: vec![guard],
            log_dir: run_folder,
        })
    }

    /// Remove run folders older than `retention_days`, then trim to `retention_runs`
    pub(crate) fn cleanup_old_logs(
        base_log_dir: &Path,
        retention_days: u64,
        retention_runs: usize,
    ) -> Result<()> {
        if !base_log_dir.exists() {
            return Ok(());
        }

        let cutoff_date = Utc::now() - chrono::Duration::days(retention_days as i64);

        let mut runs = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(stamp) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix("run_"))
            else {
                continue;
            };
            if let Ok(naive) = NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S") {
                runs.push((path.clone(), Utc.from_utc_datetime(&naive)));
            }
        }

        // Oldest first
        runs.sort_by_key(|(_, dt)| *dt);

        let mut kept = Vec::new();
        for (path, dt) in runs {
            if dt < cutoff_date {
                if let Err(e) = std::fs::remove_dir_all(&path) {
                    eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
                }
            } else {
                kept.push(path);
            }
        }

        if kept.len() > retention_runs {
            let excess = kept.len() - retention_runs;
            for path in kept.iter().take(excess) {
                if let Err(e) = std::fs::remove_dir_all(path) {
                    eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
                }
            }
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cleanup_keeps_most_recent_runs() {
            let dir = tempfile::tempdir().unwrap();
            let now = Utc::now();
            let mut names = Vec::new();
            for minutes in 0..4 {
                let stamp = (now - chrono::Duration::minutes(minutes)).format("%Y%m%d_%H%M%S");
                let name = format!("run_{}", stamp);
                std::fs::create_dir_all(dir.path().join(&name)).unwrap();
                names.push(name);
            }
            std::fs::create_dir_all(dir.path().join("run_20000101_000000")).unwrap();
            std::fs::create_dir_all(dir.path().join("unrelated")).unwrap();

            cleanup_old_logs(dir.path(), 30, 2).unwrap();

            assert!(!dir.path().join("run_20000101_000000").exists());
            assert!(dir.path().join("unrelated").exists());
            // names[0] is the newest
            assert!(dir.path().join(&names[0]).exists());
            assert!(dir.path().join(&names[1]).exists());
            assert!(!dir.path().join(&names[3]).exists());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-neuroglow_viz".to_string()]);
        let _ = init_console_logging(&flags, &LoggingConfig::default());
        assert!(init_console_logging(&flags, &LoggingConfig::default()).is_err());
    }

    #[test]
    fn test_config_level_used_as_default() {
        let flags = CrateDebugFlags::default();
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..Default::default()
        };
        let filter = build_filter(&flags, &config).unwrap();
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing::level_filters::LevelFilter::WARN)
        );
    }
}
