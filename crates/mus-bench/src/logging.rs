use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::{LoggingConfig, ResolvedOutputs};

/// Keeps the background writer alive; dropping it flushes pending events.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Sends structured JSON events to `telemetry.jsonl` beside the summary.
/// `RUST_LOG` overrides the configured level. Returns `None` when structured
/// logging is off.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }
    let level = logging.level()?;

    let telemetry_path = outputs.telemetry_path();
    let dir = outputs.telemetry_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating telemetry directory {}", dir.display()))?;
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating {}", telemetry_path.display()))?;

    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    // A subscriber installed earlier in the process keeps receiving events.
    let _ = tracing_subscriber::fmt()
        .json()
        .with_current_span(false)
        .with_env_filter(filter)
        .with_writer(writer)
        .try_init();

    Ok(Some(LoggingGuard {
        _worker: worker,
        telemetry_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;

    fn outputs(dir: &std::path::Path) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: dir.join("rounds.jsonl"),
            summary_md: dir.join("summary.md"),
        }
    }

    #[test]
    fn disabled_logging_creates_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let guard = init_logging(&LoggingConfig::default(), &outputs(dir.path())).expect("init");
        assert!(guard.is_none());
        assert!(!dir.path().join("telemetry.jsonl").exists());
    }

    #[test]
    fn enabled_logging_opens_telemetry_beside_summary() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = LoggingConfig {
            enable_structured: true,
            tracing_level: "debug".to_string(),
        };
        let guard = init_logging(&config, &outputs(dir.path()))
            .expect("init")
            .expect("guard returned");
        assert_eq!(guard.telemetry_path, dir.path().join("telemetry.jsonl"));
        assert!(guard.telemetry_path.exists());
    }
}
