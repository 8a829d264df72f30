//! Log file sink
//!
//! Lines look like `2024-01-31 18:04:05,123 WARNING message`.

use crate::config::LogFile;
use anyhow::{Context, Result};
use lifecycle::{CRITICAL_TARGET, Severity};
use log::{Level, LevelFilter};
use std::fs::{self, File, OpenOptions};
use std::io::Write;

/// Install the global logger, appending to `log_file`
pub fn init(log_file: &LogFile, level: Severity) -> Result<()> {
    let file = open(log_file)?;

    let mut builder = env_logger::Builder::new();
    match level {
        Severity::Critical => {
            builder
                .filter_level(LevelFilter::Off)
                .filter(Some(CRITICAL_TARGET), LevelFilter::Error);
        }
        other => {
            builder.filter_level(other.level().to_level_filter());
        }
    }

    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                level_label(record.target(), record.level()),
                record.args()
            )
        })
        .try_init()
        .context("Could not initialize logging")
}

/// Level name as written to the log
pub fn level_label(target: &str, level: Level) -> &'static str {
    if target == CRITICAL_TARGET {
        return Severity::Critical.as_str();
    }
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn open(log_file: &LogFile) -> Result<File> {
    let path = log_file.path();
    let mut options = OpenOptions::new();
    options.append(true);

    if matches!(log_file, LogFile::Default(_)) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        options.create(true);
    }

    options
        .open(path)
        .with_context(|| format!("Log file is not accessible, {}.", path.display()))
}
