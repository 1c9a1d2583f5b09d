//! Logging system initialization
//!
//! Console logs go to stderr so command output on stdout (tables, `--json`)
//! stays clean.

use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

const DEFAULT_LOG_NAME: &str = "linkdash.log";

/// Build the log writer: a daily-rolling file, a plain append-only file, or stderr.
///
/// A file that cannot be opened falls back to stderr with a note, since
/// logging is not up yet to report it.
fn make_writer(config: &LoggingConfig) -> Box<dyn Write + Send + Sync> {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.is_empty()) else {
        return Box::new(std::io::stderr());
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_NAME);

        match rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
        {
            Ok(appender) => Box::new(appender),
            Err(e) => {
                eprintln!("[WARN] Cannot create rolling log in {}: {}", dir.display(), e);
                Box::new(std::io::stderr())
            }
        }
    } else {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
        {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("[WARN] Cannot open log file {}: {}", log_file, e);
                Box::new(std::io::stderr())
            }
        }
    }
}

/// Initialize logging system based on configuration
///
/// `RUST_LOG` is not consulted; `logging.level` accepts the same directive
/// syntax (e.g. `info,sea_orm=warn`).
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(make_writer(config));
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.file.as_ref().is_none_or(|f| f.is_empty()));

    // 已初始化时忽略（测试中可能重复调用）
    let _ = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_file_writer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().into_owned()),
            enable_rotation: false,
            ..Default::default()
        };

        let mut writer = make_writer(&config);
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        drop(writer);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_rolling_writer_creates_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().join("app.log").to_string_lossy().into_owned()),
            enable_rotation: true,
            ..Default::default()
        };

        let mut writer = make_writer(&config);
        writer.write_all(b"rolled\n").unwrap();
        writer.flush().unwrap();
        drop(writer);

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.starts_with("app") && n.ends_with("log")));
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        let config = LoggingConfig::default();
        let _g1 = init_logging(&config);
        let _g2 = init_logging(&config);
    }
}
