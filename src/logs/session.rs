//! Session transcript
//!
//! Every CLI run keeps an in-memory transcript of what happened: statements
//! executed, results, warnings, errors. Lines are echoed to the console with
//! a colored timestamp and buffered with their color prefix; on save the
//! buffer is written to a timestamped file and to `latest.log`, with the
//! color prefixes replaced by level words.

use crate::config::settings::LoggingSettings;
use crate::error::Result;
use crate::utils::format::{ANSI_BLUE, ANSI_GREEN, ANSI_RED, ANSI_RESET, ANSI_YELLOW};
use chrono::Local;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

/// Name of the rolling copy of the most recent transcript. Exempt from
/// retention pruning.
pub const LATEST_LOG: &str = "latest.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Exec,
    Warn,
    Error,
}

impl Level {
    fn color(self) -> &'static str {
        match self {
            Level::Info => ANSI_GREEN,
            Level::Exec => ANSI_BLUE,
            Level::Warn => ANSI_YELLOW,
            Level::Error => ANSI_RED,
        }
    }

    /// Word substituted for the color prefix in file output.
    fn word(self) -> &'static str {
        match self {
            Level::Info => "INFO ",
            Level::Exec => "EXEC ",
            Level::Warn => "IMPORTANT ",
            Level::Error => "ERROR ",
        }
    }
}

/// Per-level line counters, reported in the transcript footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub info: usize,
    pub exec: usize,
    pub warn: usize,
    pub error: usize,
}

pub struct Transcript {
    policy: LoggingSettings,
    no_color: bool,
    buffer: Vec<String>,
    counts: LevelCounts,
    started: Instant,
}

impl Transcript {
    pub fn new(policy: LoggingSettings, no_color: bool) -> Self {
        Self {
            policy,
            no_color,
            buffer: Vec::new(),
            counts: LevelCounts::default(),
            started: Instant::now(),
        }
    }

    pub fn info(&mut self, message: &str) {
        self.record(Level::Info, message);
    }

    pub fn exec(&mut self, message: &str) {
        self.record(Level::Exec, message);
    }

    pub fn warn(&mut self, message: &str) {
        self.record(Level::Warn, message);
    }

    pub fn error(&mut self, message: &str) {
        self.record(Level::Error, message);
    }

    fn record(&mut self, level: Level, message: &str) {
        let stamp = Local::now().format(&self.policy.time_format);

        // Console: color the timestamp only, then reset before the message.
        if self.no_color {
            println!("[{stamp}] {message}");
        } else {
            println!("{}[{stamp}] {ANSI_RESET}{message}", level.color());
        }

        // Buffer keeps the color prefix so save() can map it to a level word.
        self.buffer.push(format!("{}[{stamp}] {message}", level.color()));

        match level {
            Level::Info => self.counts.info += 1,
            Level::Exec => self.counts.exec += 1,
            Level::Warn => self.counts.warn += 1,
            Level::Error => self.counts.error += 1,
        }
    }

    pub fn counts(&self) -> LevelCounts {
        self.counts
    }

    pub fn lines(&self) -> &[String] {
        &self.buffer
    }

    /// Seconds since the transcript was opened.
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Replace color prefixes with level words and drop any leftover codes.
    pub fn decolor(line: &str) -> String {
        let line = line
            .replace(ANSI_RED, Level::Error.word())
            .replace(ANSI_BLUE, Level::Exec.word())
            .replace(ANSI_GREEN, Level::Info.word())
            .replace(ANSI_YELLOW, Level::Warn.word());
        line.replace(ANSI_RESET, "")
    }

    /// Write the transcript to a timestamped file and to `latest.log` in the
    /// policy directory. Returns the timestamped path.
    pub fn save(&mut self) -> Result<PathBuf> {
        let dir = self.policy.directory.clone();
        std::fs::create_dir_all(&dir)?;

        let stamp = Local::now().format(&self.policy.file_name_format);
        let path = dir.join(format!("{stamp}.log"));

        // Counts reported in the footer cover the session lines, not the
        // footer itself.
        let counts = self.counts;
        self.info(&format!(
            "LOG VERSION={} | LOG DIR={}",
            self.policy.version,
            dir.display()
        ));
        self.info(&format!(
            "INFO={} | EXEC={} | ERROR={} | IMPORTANT={}",
            counts.info, counts.exec, counts.error, counts.warn
        ));

        let contents = self
            .buffer
            .iter()
            .map(|line| Self::decolor(line))
            .collect::<Vec<_>>()
            .join("\n");

        std::fs::write(&path, &contents)?;
        std::fs::write(dir.join(LATEST_LOG), &contents)?;

        debug!(path = %path.display(), "Saved session transcript");
        self.info(&format!("Saved log to {}", path.display()));

        Ok(path)
    }
}
