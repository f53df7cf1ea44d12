//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, subcommands, and their arguments.

use crate::config::credentials::{
    load_credentials, write_credential_file, write_template, Credentials,
};
use crate::config::settings::{init_default_config, Config};
use crate::db::connection::ConnectionManager;
use crate::error::{Result, SqlpalError};
use crate::logs::{retention, session::Transcript};
use crate::query::executor::run_script;
use crate::query::result::StatementOutcome;
use crate::query::script::{run_file, run_sequence};
use crate::utils::format::{DisplayUtils, OutputFormat, TableFormatter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "sqlpal")]
#[command(about = "Run MySQL scripts with session transcripts and log rotation")]
#[command(version, author)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format for query results
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path of the credentials file
    #[arg(long, global = true, env = "SQLPAL_CREDENTIALS_FILE")]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run inline SQL; multiple `;`-separated statements are allowed
    Query {
        /// SQL text to execute
        sql: String,
    },
    /// Run a SQL script file
    Run {
        /// Path of the script file
        file: PathBuf,
    },
    /// Run every script listed in a directory's sequence.txt, in order
    #[command(alias = "seq")]
    Sequence {
        /// Directory containing sequence.txt and the scripts it names
        dir: PathBuf,
    },
    /// Check connectivity and report the round-trip time
    Ping,
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Manage the credentials file
    Creds {
        #[command(subcommand)]
        command: CredsCommands,
    },
    /// Manage the session log directory
    Logs {
        #[command(subcommand)]
        command: LogsCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,
    /// Write a default configuration file if none exists
    Init,
    /// Print the configuration file path
    Path,
}

#[derive(Subcommand)]
pub enum CredsCommands {
    /// Write a placeholder credentials file to fill in
    Init,
    /// Write the credentials file from prompted values
    Set {
        /// Endpoint URL; defaults to the configured one
        #[arg(long)]
        endpoint: Option<String>,
        /// Username; defaults to the configured one
        #[arg(long)]
        username: Option<String>,
        /// Also prompt for a password and store it in the file.
        /// Prefer SQLPAL_PASSWORD in the environment; the file is plaintext.
        #[arg(long)]
        store_password: bool,
    },
    /// Display the loaded credentials with the password masked
    Show,
}

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Delete the oldest transcripts beyond the retention limit
    Clean,
    /// Delete every log file in the log directory
    Purge,
    /// Print the log directory path
    Dir,
}

impl Cli {
    pub async fn execute(self, mut config: Config) -> Result<()> {
        if self.debug {
            config.debug = true;
        }
        if self.no_color {
            config.no_color = true;
        }
        if let Some(path) = &self.credentials {
            config.credentials_file = path.clone();
        }
        // Structured formats render once at the end instead of inline.
        if self.format != OutputFormat::Table {
            config.log_results = false;
        }

        match self.command {
            Commands::Query { sql } => execute_query(&config, self.format, &sql).await,
            Commands::Run { file } => execute_run(&config, self.format, &file).await,
            Commands::Sequence { dir } => execute_sequence(&config, self.format, &dir).await,
            Commands::Ping => execute_ping(&config).await,
            Commands::Config { command } => execute_config(&config, command).await,
            Commands::Creds { command } => execute_creds(&config, command),
            Commands::Logs { command } => execute_logs(&config, command),
        }
    }
}

/// Close out a transcript-backed command: record the outcome and runtime,
/// save the transcript, and enforce retention. Save failures are reported
/// but do not mask the command's own result.
fn finish<T>(config: &Config, mut transcript: Transcript, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        transcript.error(&e.to_string());
    }

    transcript.info("End of program");
    transcript.info(&format!(
        "Program took {:.3} seconds to execute",
        transcript.elapsed_secs()
    ));

    if let Err(e) = transcript.save() {
        warn!("Could not save session transcript: {e}");
    }
    if let Err(e) = retention::enforce(&config.logging) {
        warn!("Could not enforce log retention: {e}");
    }

    result
}

async fn connect(config: &Config, transcript: &mut Transcript) -> Result<ConnectionManager> {
    let credentials = load_credentials(config)?;
    let manager = ConnectionManager::connect(&config.connection, &credentials).await?;
    transcript.info(&format!("Connected to {}", manager.endpoint()));
    Ok(manager)
}

fn render_outcomes(
    outcomes: &[StatementOutcome],
    format: OutputFormat,
    no_color: bool,
) -> Result<()> {
    match format {
        // Tables were already printed while the statements ran.
        OutputFormat::Table => Ok(()),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcomes)?);
            Ok(())
        }
        OutputFormat::Raw => {
            let formatter = TableFormatter::new(OutputFormat::Raw, no_color);
            for outcome in outcomes {
                if let StatementOutcome::Rows(result) = outcome {
                    println!("{}", formatter.format_result(result)?);
                }
            }
            Ok(())
        }
    }
}

async fn execute_query(config: &Config, format: OutputFormat, sql: &str) -> Result<()> {
    let mut transcript = Transcript::new(config.logging.clone(), config.no_color);

    let result = async {
        let manager = connect(config, &mut transcript).await?;
        let outcomes = run_script(&manager, config, &mut transcript, sql).await;
        manager.close().await;
        let outcomes = outcomes?;
        render_outcomes(&outcomes, format, config.no_color)
    }
    .await;

    finish(config, transcript, result)
}

async fn execute_run(config: &Config, format: OutputFormat, file: &std::path::Path) -> Result<()> {
    let mut transcript = Transcript::new(config.logging.clone(), config.no_color);

    let result = async {
        let manager = connect(config, &mut transcript).await?;
        let outcomes = run_file(&manager, config, &mut transcript, file).await;
        manager.close().await;
        let outcomes = outcomes?;
        render_outcomes(&outcomes, format, config.no_color)
    }
    .await;

    finish(config, transcript, result)
}

async fn execute_sequence(
    config: &Config,
    format: OutputFormat,
    dir: &std::path::Path,
) -> Result<()> {
    let mut transcript = Transcript::new(config.logging.clone(), config.no_color);

    let result = async {
        let manager = connect(config, &mut transcript).await?;
        let runs = run_sequence(&manager, config, &mut transcript, dir).await;
        manager.close().await;
        for outcomes in runs? {
            render_outcomes(&outcomes, format, config.no_color)?;
        }
        Ok(())
    }
    .await;

    finish(config, transcript, result)
}

async fn execute_ping(config: &Config) -> Result<()> {
    let display = DisplayUtils::new(config.no_color);
    let mut transcript = Transcript::new(config.logging.clone(), config.no_color);

    let result = async {
        let manager = connect(config, &mut transcript).await?;
        let status = manager.status().await;
        manager.close().await;
        let status = status?;
        transcript.info(&status);
        display.print_success(&status);
        Ok(())
    }
    .await;

    finish(config, transcript, result)
}

async fn execute_config(config: &Config, command: ConfigCommands) -> Result<()> {
    let display = DisplayUtils::new(config.no_color);

    match command {
        ConfigCommands::Show => {
            let port = config.connection.port.to_string();
            let max_logs = config.logging.max_retained_files.to_string();
            let endpoint = config.connection.endpoint_url();
            let pairs = [
                ("Host", config.connection.host.as_str()),
                ("Port", port.as_str()),
                ("Database", config.connection.database.as_str()),
                ("Username", config.connection.username.as_str()),
                ("Endpoint", endpoint.as_str()),
                ("Log version", config.logging.version.as_str()),
                ("Log directory", config.logging.directory.to_str().unwrap_or("logs")),
                ("Max retained logs", max_logs.as_str()),
                ("Time format", config.logging.time_format.as_str()),
                ("File name format", config.logging.file_name_format.as_str()),
            ];
            println!("{}", display.format_key_value_pairs(&pairs));
            Ok(())
        }
        ConfigCommands::Init => {
            init_default_config().await?;
            display.print_success(&format!(
                "Configuration ready at {}",
                Config::get_config_path()?.display()
            ));
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", Config::get_config_path()?.display());
            Ok(())
        }
    }
}

fn execute_creds(config: &Config, command: CredsCommands) -> Result<()> {
    let display = DisplayUtils::new(config.no_color);
    let path = &config.credentials_file;

    match command {
        CredsCommands::Init => {
            if path.exists() {
                return Err(SqlpalError::credential(format!(
                    "{} already exists, not overwriting",
                    path.display()
                )));
            }
            write_template(path)?;
            display.print_success(&format!(
                "Wrote credential template to {}, fill it in",
                path.display()
            ));
            Ok(())
        }
        CredsCommands::Set {
            endpoint,
            username,
            store_password,
        } => {
            let endpoint =
                endpoint.unwrap_or_else(|| format!("mysql://{}:{}/", config.connection.host, config.connection.port));
            let username = username.unwrap_or_else(|| config.connection.username.clone());

            let password = if store_password {
                display.print_warning("Passwords stored in the file are plaintext; SQLPAL_PASSWORD is safer");
                Some(rpassword::prompt_password(format!(
                    "Enter password for '{username}': "
                ))?)
            } else {
                None
            };

            write_credential_file(path, &endpoint, &username, password.as_deref())?;
            display.print_success(&format!("Wrote credentials to {}", path.display()));
            if password.is_none() {
                display.print_info("Set SQLPAL_PASSWORD in the environment to supply the password");
            }
            Ok(())
        }
        CredsCommands::Show => {
            let credentials = load_credentials(config)?;
            show_credentials(&display, config, &credentials)
        }
    }
}

fn show_credentials(
    display: &DisplayUtils,
    config: &Config,
    credentials: &Credentials,
) -> Result<()> {
    let endpoint = credentials.resolve_endpoint(&config.connection)?;
    let pairs = [
        ("url", endpoint.as_str()),
        ("username", credentials.username.as_str()),
        ("password", credentials.masked_password()),
    ];
    println!("{}", display.format_key_value_pairs(&pairs));
    Ok(())
}

fn execute_logs(config: &Config, command: LogsCommands) -> Result<()> {
    let display = DisplayUtils::new(config.no_color);

    match command {
        LogsCommands::Clean => {
            let deleted = retention::enforce(&config.logging)?;
            if deleted.is_empty() {
                display.print_info(&format!(
                    "Nothing to delete, at most {} logs are retained",
                    config.logging.max_retained_files
                ));
            } else {
                display.print_success(&format!("Deleted {} old log(s)", deleted.len()));
            }
            Ok(())
        }
        LogsCommands::Purge => {
            let removed = retention::purge(&config.logging)?;
            display.print_success(&format!("Deleted {removed} log file(s)"));
            Ok(())
        }
        LogsCommands::Dir => {
            println!("{}", config.logging.directory.display());
            Ok(())
        }
    }
}
