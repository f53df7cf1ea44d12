//! Statement execution
//!
//! Scripts are split on `;` and run statement by statement. Fetch statements
//! return a [`ResultSet`]; everything else reports its affected-row count.
//! Executed statements and their results are recorded in the session
//! transcript according to the `log_queries` / `log_results` settings.

use crate::config::settings::Config;
use crate::db::connection::ConnectionManager;
use crate::error::{Result, SqlpalError};
use crate::logs::session::Transcript;
use crate::query::result::{ResultSet, StatementOutcome};
use crate::utils::format::{OutputFormat, TableFormatter};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, MySqlPool, Row, TypeInfo, ValueRef};

/// Split a script into trimmed, nonempty statements.
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a statement returns rows rather than an affected-row count.
pub fn is_fetch_statement(statement: &str) -> bool {
    let lowered = statement.trim_start().to_lowercase();
    ["select", "show", "describe", "desc", "explain"]
        .iter()
        .any(|prefix| {
            lowered.starts_with(prefix)
                && lowered[prefix.len()..]
                    .chars()
                    .next()
                    .map_or(true, char::is_whitespace)
        })
}

/// Run a script against the connection, statement by statement, in order.
pub async fn run_script(
    manager: &ConnectionManager,
    config: &Config,
    transcript: &mut Transcript,
    script: &str,
) -> Result<Vec<StatementOutcome>> {
    let statements = split_statements(script);
    let mut outcomes = Vec::with_capacity(statements.len());

    for statement in statements {
        if config.log_queries {
            transcript.exec(&statement);
        }

        let outcome = execute_statement(manager.pool(), &statement).await?;

        match &outcome {
            StatementOutcome::Rows(result) => {
                if config.log_results {
                    let rendered = TableFormatter::new(OutputFormat::Table, config.no_color)
                        .format_result(result)?;
                    println!("{rendered}");
                    transcript.info(&format!("{} row(s) returned", result.len()));
                }
            }
            StatementOutcome::Affected(count) => {
                if config.log_queries {
                    transcript.info(&format!("{count} row(s) affected"));
                }
            }
        }

        outcomes.push(outcome);
    }

    Ok(outcomes)
}

async fn execute_statement(pool: &MySqlPool, statement: &str) -> Result<StatementOutcome> {
    if is_fetch_statement(statement) {
        let rows = sqlx::query(statement).fetch_all(pool).await?;
        Ok(StatementOutcome::Rows(rows_to_result_set(&rows)?))
    } else {
        let done = sqlx::query(statement).execute(pool).await?;
        Ok(StatementOutcome::Affected(done.rows_affected()))
    }
}

/// How a column's cells are decoded before stringification. MySQL's binary
/// protocol sends typed values, so each type family needs its own decode;
/// reading everything as raw string bytes would garble numbers and dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeKind {
    Bool,
    Int,
    UInt,
    Float,
    Double,
    Date,
    Time,
    DateTime,
    Timestamp,
    /// Binary payloads, rendered lossily for display.
    Bytes,
    /// Character data, decoded through sqlx's type check.
    Text,
    /// Types the wire carries as text without a String type mapping
    /// (DECIMAL, JSON); read as raw bytes reinterpreted as UTF-8.
    RawText,
}

fn decode_kind(type_name: &str) -> DecodeKind {
    match type_name {
        "BOOLEAN" => DecodeKind::Bool,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => DecodeKind::Int,
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" | "YEAR" | "BIT" => DecodeKind::UInt,
        "FLOAT" => DecodeKind::Float,
        "DOUBLE" => DecodeKind::Double,
        "DATE" => DecodeKind::Date,
        "TIME" => DecodeKind::Time,
        "DATETIME" => DecodeKind::DateTime,
        "TIMESTAMP" => DecodeKind::Timestamp,
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB"
        | "GEOMETRY" => DecodeKind::Bytes,
        "DECIMAL" | "JSON" => DecodeKind::RawText,
        _ => DecodeKind::Text,
    }
}

fn decode_cell(row: &MySqlRow, index: usize) -> Result<Option<String>> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(None);
    }
    let type_name = raw.type_info().name().to_string();

    let rendered = match decode_kind(&type_name) {
        DecodeKind::Bool => row.try_get::<bool, _>(index).map(|v| v.to_string()),
        DecodeKind::Int => row.try_get::<i64, _>(index).map(|v| v.to_string()),
        DecodeKind::UInt => row.try_get::<u64, _>(index).map(|v| v.to_string()),
        DecodeKind::Float => row.try_get::<f32, _>(index).map(|v| v.to_string()),
        DecodeKind::Double => row.try_get::<f64, _>(index).map(|v| v.to_string()),
        DecodeKind::Date => row.try_get::<NaiveDate, _>(index).map(|v| v.to_string()),
        DecodeKind::Time => row.try_get::<NaiveTime, _>(index).map(|v| v.to_string()),
        DecodeKind::DateTime => row
            .try_get::<NaiveDateTime, _>(index)
            .map(|v| v.to_string()),
        DecodeKind::Timestamp => row
            .try_get::<DateTime<Utc>, _>(index)
            .map(|v| v.to_string()),
        DecodeKind::Bytes => row
            .try_get::<Vec<u8>, _>(index)
            .map(|v| String::from_utf8_lossy(&v).into_owned()),
        DecodeKind::Text => row.try_get::<String, _>(index),
        DecodeKind::RawText => row.try_get_unchecked::<String, _>(index),
    };

    rendered.map(Some).map_err(|e| {
        let name = row
            .columns()
            .get(index)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| index.to_string());
        SqlpalError::query(format!("Cannot decode column '{name}' of type {type_name}: {e}"))
    })
}

/// Stringify fetched rows. A fetch that returns zero rows yields an empty
/// result set; sqlx exposes column metadata only through the rows themselves.
fn rows_to_result_set(rows: &[MySqlRow]) -> Result<ResultSet> {
    let Some(first) = rows.first() else {
        return Ok(ResultSet::default());
    };

    let columns = first
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let rows = rows
        .iter()
        .map(|row| (0..row.len()).map(|i| decode_cell(row, i)).collect())
        .collect::<Result<Vec<_>>>()?;

    Ok(ResultSet { columns, rows })
}
