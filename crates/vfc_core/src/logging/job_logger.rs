//! Per-conversion log.
//!
//! Lines go to `{logs}/{job}.log` (unless detached) and to an optional
//! callback. Encoder stderr is kept in a bounded tail so a failed command
//! can be shown without flooding the log on success.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogCallback, LogConfig, LogLevel};

struct LogFile {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

/// Log of one conversion request.
pub struct JobLogger {
    job_name: String,
    config: LogConfig,
    file: Option<LogFile>,
    callback: Option<LogCallback>,
    tail: Mutex<VecDeque<String>>,
}

impl JobLogger {
    /// Logger writing `{job_name}.log` into `log_dir`, created if missing.
    pub fn new(
        job_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        callback: Option<LogCallback>,
    ) -> io::Result<Self> {
        let mut logger = Self::detached(job_name, config, callback);

        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;
        let path = log_dir.join(format!("{}.log", file_safe(&logger.job_name)));
        let writer = BufWriter::new(File::create(&path)?);

        logger.file = Some(LogFile {
            path,
            writer: Mutex::new(writer),
        });
        Ok(logger)
    }

    /// Logger that only feeds the callback.
    pub fn detached(
        job_name: impl Into<String>,
        config: LogConfig,
        callback: Option<LogCallback>,
    ) -> Self {
        let tail = VecDeque::with_capacity(config.error_tail.max(1));
        Self {
            job_name: job_name.into(),
            config,
            file: None,
            callback,
            tail: Mutex::new(tail),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }

    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    /// `[WARNING]` line, mirrored to `tracing`.
    pub fn warn(&self, message: &str) {
        tracing::warn!(job = %self.job_name, "{}", message);
        self.emit(LogLevel::Warn, &format!("[WARNING] {}", message));
    }

    /// `[ERROR]` line, mirrored to `tracing`.
    pub fn error(&self, message: &str) {
        tracing::error!(job = %self.job_name, "{}", message);
        self.emit(LogLevel::Error, &format!("[ERROR] {}", message));
    }

    /// Shell-style `$ <command line>`.
    pub fn command(&self, command_line: &str) {
        self.emit(LogLevel::Info, &format!("$ {}", command_line));
    }

    pub fn phase(&self, name: &str) {
        self.emit(LogLevel::Info, &format!("=== {} ===", name));
    }

    pub fn success(&self, message: &str) {
        self.emit(LogLevel::Info, &format!("[SUCCESS] {}", message));
    }

    /// Record captured encoder stderr.
    ///
    /// Non-blank lines always enter the tail; outside compact mode they are
    /// also logged at debug level.
    pub fn encoder_output(&self, text: &str) {
        let lines = text.lines().filter(|l| !l.trim().is_empty());
        let capacity = self.config.error_tail.max(1);

        for line in lines {
            {
                let mut tail = self.tail.lock();
                while tail.len() >= capacity {
                    tail.pop_front();
                }
                tail.push_back(line.to_string());
            }
            if !self.config.compact {
                self.emit(LogLevel::Debug, &format!("[stderr] {}", line));
            }
        }
    }

    /// Write the tail under a `[<header>/tail]` marker, regardless of level.
    pub fn show_tail(&self, header: &str) {
        let tail = self.tail.lock();
        if tail.is_empty() {
            return;
        }
        self.write_line(&self.stamp(&format!("[{}/tail]", header)));
        for line in tail.iter() {
            self.write_line(&self.stamp(line));
        }
    }

    pub fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.writer.lock().flush();
        }
    }

    fn emit(&self, level: LogLevel, message: &str) {
        if level >= self.config.level {
            self.write_line(&self.stamp(message));
        }
    }

    fn stamp(&self, message: &str) -> String {
        if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }

    fn write_line(&self, line: &str) {
        if let Some(file) = &self.file {
            let _ = writeln!(file.writer.lock(), "{}", line);
        }
        if let Some(callback) = &self.callback {
            callback(line);
        }
    }
}

impl Drop for JobLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Replace characters that are not allowed in file names.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect()
}
