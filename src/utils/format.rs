//! Console formatting and output utilities
//!
//! This module provides the ANSI palette used for colored console output,
//! result-set rendering in several output formats, and small display helpers.

use crate::error::Result;
use crate::query::result::ResultSet;
use crossterm::{
    style::{Color as CrosstermColor, Stylize},
    terminal::size,
};
use regex::Regex;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Color, Modify, Padding, Style, Width},
};

/// ANSI reset sequence. Ends coloring started by any of the codes below.
pub const ANSI_RESET: &str = "\u{1b}[0m";
/// ANSI green, used for success/info transcript lines.
pub const ANSI_GREEN: &str = "\u{1b}[32m";
/// ANSI blue, used for statement execution lines.
pub const ANSI_BLUE: &str = "\u{1b}[34m";
/// ANSI red, used for errors.
pub const ANSI_RED: &str = "\u{1b}[31m";
/// ANSI yellow, used for warnings.
pub const ANSI_YELLOW: &str = "\u{1b}[33m";

/// Semantic color names mapped to their terminal escape sequences.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub reset: &'static str,
    pub success: &'static str,
    pub info: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
}

impl Palette {
    pub const fn ansi() -> Self {
        Self {
            reset: ANSI_RESET,
            success: ANSI_GREEN,
            info: ANSI_BLUE,
            error: ANSI_RED,
            warning: ANSI_YELLOW,
        }
    }

    /// Look up an escape sequence by its semantic name.
    pub fn get(&self, name: &str) -> Option<&'static str> {
        match name {
            "reset" => Some(self.reset),
            "success" => Some(self.success),
            "info" => Some(self.info),
            "error" => Some(self.error),
            "warning" => Some(self.warning),
            _ => None,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Remove every ANSI escape sequence from a string.
pub fn strip_ansi(input: &str) -> String {
    // The pattern is fixed, so compilation cannot fail at runtime.
    let re = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    re.replace_all(input, "").to_string()
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Raw,
}

/// Result-set formatter with color support
pub struct TableFormatter {
    format: OutputFormat,
    no_color: bool,
}

impl TableFormatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    /// Render a result set in the configured output format.
    pub fn format_result(&self, result: &ResultSet) -> Result<String> {
        if result.is_empty() {
            return Ok("No data to display".to_string());
        }

        match self.format {
            OutputFormat::Table => self.format_as_table(result),
            OutputFormat::Json => self.format_as_json(result),
            OutputFormat::Raw => Ok(self.format_as_raw(result)),
        }
    }

    /// Render as a styled table with the column names as the header row.
    fn format_as_table(&self, result: &ResultSet) -> Result<String> {
        let mut builder = Builder::default();
        builder.push_record(result.columns.iter().cloned());
        for row in &result.rows {
            builder.push_record(row.iter().map(|cell| display_cell(cell.as_deref())));
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Padding::new(1, 1, 0, 0));

        if !self.no_color {
            table.with(Modify::new(Rows::first()).with(Color::FG_BLUE));
        }

        // Auto-adjust width to terminal
        if let Ok((width, _)) = size() {
            table.with(Width::wrap(width as usize));
        }

        Ok(table.to_string())
    }

    fn format_as_json(&self, result: &ResultSet) -> Result<String> {
        let objects: Vec<serde_json::Value> = result
            .rows
            .iter()
            .map(|row| {
                result
                    .columns
                    .iter()
                    .zip(row.iter())
                    .map(|(name, cell)| {
                        let value = match cell {
                            Some(v) => serde_json::Value::String(v.clone()),
                            None => serde_json::Value::Null,
                        };
                        (name.clone(), value)
                    })
                    .collect::<serde_json::Map<_, _>>()
                    .into()
            })
            .collect();

        Ok(serde_json::to_string_pretty(&objects)?)
    }

    /// Tab-separated rows, header first, for piping into other tools.
    fn format_as_raw(&self, result: &ResultSet) -> String {
        let mut lines = vec![result.columns.join("\t")];
        for row in &result.rows {
            lines.push(
                row.iter()
                    .map(|cell| display_cell(cell.as_deref()))
                    .collect::<Vec<_>>()
                    .join("\t"),
            );
        }
        lines.join("\n")
    }
}

fn display_cell(cell: Option<&str>) -> String {
    cell.unwrap_or("NULL").to_string()
}

/// Display utilities for status output outside of result sets
pub struct DisplayUtils {
    no_color: bool,
}

impl DisplayUtils {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    pub fn print_success(&self, message: &str) {
        if self.no_color {
            println!("✓ {message}");
        } else {
            println!("✓ {}", message.with(CrosstermColor::Green));
        }
    }

    pub fn print_warning(&self, message: &str) {
        if self.no_color {
            println!("⚠ {message}");
        } else {
            println!("⚠ {}", message.with(CrosstermColor::Yellow));
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.no_color {
            eprintln!("✗ {message}");
        } else {
            eprintln!("✗ {}", message.with(CrosstermColor::Red));
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.no_color {
            println!("ℹ {message}");
        } else {
            println!("ℹ {}", message.with(CrosstermColor::Cyan));
        }
    }

    /// Format key-value pairs with aligned keys.
    pub fn format_key_value_pairs(&self, pairs: &[(&str, &str)]) -> String {
        let max_key_length = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

        pairs
            .iter()
            .map(|(key, value)| format!("{key:max_key_length$}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
