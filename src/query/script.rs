//! Script and sequence running
//!
//! A script is a single SQL file. A sequence is a directory with a
//! `sequence.txt` manifest naming scripts to run in order, one per line.

use crate::config::settings::Config;
use crate::db::connection::ConnectionManager;
use crate::error::{Result, SqlpalError};
use crate::logs::session::Transcript;
use crate::query::executor::run_script;
use crate::query::result::StatementOutcome;
use std::path::Path;
use tracing::warn;

/// Manifest file name inside a sequence directory.
pub const SEQUENCE_MANIFEST: &str = "sequence.txt";

/// Run a SQL file as one script.
pub async fn run_file(
    manager: &ConnectionManager,
    config: &Config,
    transcript: &mut Transcript,
    path: &Path,
) -> Result<Vec<StatementOutcome>> {
    if !path.is_file() {
        return Err(SqlpalError::script_not_found(path.display().to_string()));
    }

    if config.log_queries {
        transcript.info(&format!("Running query from {}", path.display()));
    }

    let sql = tokio::fs::read_to_string(path).await?;
    run_script(manager, config, transcript, &sql).await
}

/// Entries of a sequence manifest worth running: trimmed, nonempty lines
/// ending in `.sql` or `.txt`. Other lines are reported back for warning.
pub fn parse_sequence(contents: &str) -> (Vec<String>, Vec<String>) {
    let mut scripts = Vec::new();
    let mut skipped = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.ends_with(".sql") || line.ends_with(".txt") {
            scripts.push(line.to_string());
        } else {
            skipped.push(line.to_string());
        }
    }

    (scripts, skipped)
}

/// Run every script listed in the directory's manifest, in listed order.
/// Results are collected per script.
pub async fn run_sequence(
    manager: &ConnectionManager,
    config: &Config,
    transcript: &mut Transcript,
    dir: &Path,
) -> Result<Vec<Vec<StatementOutcome>>> {
    let manifest = dir.join(SEQUENCE_MANIFEST);
    if !manifest.is_file() {
        return Err(SqlpalError::sequence(
            dir.display().to_string(),
            format!("missing {SEQUENCE_MANIFEST}"),
        ));
    }

    let contents = tokio::fs::read_to_string(&manifest).await?;
    let (scripts, skipped) = parse_sequence(&contents);

    for entry in &skipped {
        warn!(entry = %entry, "Skipping sequence entry without a script extension");
        transcript.warn(&format!("Skipping sequence entry '{entry}'"));
    }

    if scripts.is_empty() {
        return Err(SqlpalError::sequence(
            dir.display().to_string(),
            "manifest lists no scripts".to_string(),
        ));
    }

    let mut results = Vec::with_capacity(scripts.len());
    for script in scripts {
        let path = dir.join(&script);
        results.push(run_file(manager, config, transcript, &path).await?);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence() {
        let manifest = "setup.sql\n\n  seed.txt  \nREADME.md\nteardown.sql\n";
        let (scripts, skipped) = parse_sequence(manifest);
        assert_eq!(scripts, vec!["setup.sql", "seed.txt", "teardown.sql"]);
        assert_eq!(skipped, vec!["README.md"]);
    }

    #[test]
    fn test_parse_sequence_empty() {
        let (scripts, skipped) = parse_sequence("\n\n");
        assert!(scripts.is_empty());
        assert!(skipped.is_empty());
    }
}
