//! Log directory retention
//!
//! Timestamp-named transcript files are pruned oldest-first once the
//! directory exceeds the configured retention limit. `latest.log` is a
//! rolling copy and is never counted or deleted by pruning.

use crate::config::settings::LoggingSettings;
use crate::error::Result;
use crate::utils::datetime::parse_file_stamp;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use tracing::{info, warn};

/// Collect timestamp-named `.log` files in the policy directory, oldest first.
fn stamped_logs(policy: &LoggingSettings) -> Result<Vec<(NaiveDateTime, PathBuf)>> {
    let mut logs = Vec::new();

    if !policy.directory.is_dir() {
        return Ok(logs);
    }

    for entry in std::fs::read_dir(&policy.directory)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        // Files that do not carry a timestamp name (latest.log included)
        // are left alone.
        if let Ok(stamp) = parse_file_stamp(stem) {
            logs.push((stamp, path));
        }
    }

    logs.sort_by_key(|(stamp, _)| *stamp);
    Ok(logs)
}

/// Delete the oldest transcripts beyond `max_retained_files`.
/// Returns the deleted paths, oldest first.
pub fn enforce(policy: &LoggingSettings) -> Result<Vec<PathBuf>> {
    let logs = stamped_logs(policy)?;
    info!("There are {} logs in {}", logs.len(), policy.directory.display());

    if logs.len() <= policy.max_retained_files {
        return Ok(Vec::new());
    }

    let excess = logs.len() - policy.max_retained_files;
    warn!(
        "There are over {} logs, deleting {} oldest",
        policy.max_retained_files, excess
    );

    let mut deleted = Vec::with_capacity(excess);
    for (_, path) in logs.into_iter().take(excess) {
        warn!("Deleting {}", path.display());
        std::fs::remove_file(&path)?;
        deleted.push(path);
    }

    Ok(deleted)
}

/// Delete every log file in the directory, `latest.log` included.
/// Returns the number of files removed.
pub fn purge(policy: &LoggingSettings) -> Result<usize> {
    if !policy.directory.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in std::fs::read_dir(&policy.directory)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("log") {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }

    warn!("Cleared {} logs from {}", removed, policy.directory.display());
    Ok(removed)
}
