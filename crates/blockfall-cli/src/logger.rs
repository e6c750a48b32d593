use std::{
    fs::{File, OpenOptions},
    io::{LineWriter, Write as _},
    path::Path,
    sync::Mutex,
};

use anyhow::Context as _;
use chrono::Utc;
use log::{LevelFilter, Log, Metadata, Record};

/// Appends one line per log record to a file.
#[derive(Debug)]
struct FileLogger {
    level: LevelFilter,
    file: Mutex<LineWriter<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // A poisoned lock or a failed write drops the record.
        if let Ok(mut file) = self.file.lock() {
            _ = writeln!(file, "{}", format_line(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            _ = file.flush();
        }
    }
}

fn format_line(record: &Record) -> String {
    format!(
        "{} {:<5} [{}] {}",
        Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Installs the process-wide logger writing to `path`.
pub fn init(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let logger = FileLogger {
        level,
        file: Mutex::new(LineWriter::new(file)),
    };
    log::set_boxed_logger(Box::new(logger)).context("failed to install logger")?;
    log::set_max_level(level);
    Ok(())
}
