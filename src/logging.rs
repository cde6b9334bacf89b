// src/logging.rs
// Timestamped logging for the caller and the card maker. Lines go to the
// log file once one is opened, otherwise to stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();

/// Log level enum
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Error,
    Warning,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
        }
    }
}

/// Sends all further log lines to `path` (appending). Only the first call
/// takes effect.
pub fn init_log_file<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = LOG_FILE.set(Mutex::new(file));
    Ok(())
}

pub fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} - {} - {}", timestamp, level.as_str(), message)
}

/// Format and write a log message with timestamp
pub fn log_message(level: LogLevel, message: &str) {
    let line = format_line(level, message);
    match LOG_FILE.get() {
        Some(file) => {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{line}");
            }
        }
        None => eprintln!("{line}"),
    }
}

/// Log an info message
pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

/// Log an error message
pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}

/// Log a warning message
pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(LogLevel::Warning, "No balls to undo.");
        assert!(line.ends_with(" - WARNING - No balls to undo."));
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(line.find(" - "), Some(19));
    }
}
