//! MySQL connection management
//!
//! Wraps a small `sqlx` pool built from the configured endpoint and loaded
//! credentials. The pool is verified with a round trip before it is handed
//! to query execution.

use crate::config::credentials::Credentials;
use crate::config::settings::ConnectionSettings;
use crate::error::{Result, SqlpalError};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::{Duration, Instant};
use tracing::info;

/// Ping slower than this marks the connection as unhealthy.
const PING_BUDGET: Duration = Duration::from_secs(5);

pub struct ConnectionManager {
    pool: MySqlPool,
    endpoint: String,
    username: String,
}

impl ConnectionManager {
    /// Open a pool against the resolved endpoint and verify it with a ping.
    pub async fn connect(
        settings: &ConnectionSettings,
        credentials: &Credentials,
    ) -> Result<Self> {
        let endpoint = credentials.resolve_endpoint(settings)?;

        let mut options: MySqlConnectOptions = endpoint
            .parse()
            .map_err(|e: sqlx::Error| SqlpalError::database(format!(
                "Cannot parse endpoint '{endpoint}': {e}"
            )))?;
        options = options.username(&credentials.username);
        if !credentials.password().is_empty() {
            options = options.password(credentials.password());
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(PING_BUDGET)
            .connect_with(options)
            .await?;

        let manager = Self {
            pool,
            endpoint,
            username: credentials.username.clone(),
        };
        manager.ping().await?;
        info!(endpoint = %manager.endpoint, "Connected to database");

        Ok(manager)
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Round-trip latency of a trivial query, in milliseconds.
    pub async fn ping(&self) -> Result<u128> {
        let start = Instant::now();
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(start.elapsed().as_millis())
    }

    /// Human-readable status line for the connection.
    pub async fn status(&self) -> Result<String> {
        let ping = self.ping().await?;
        if ping > PING_BUDGET.as_millis() {
            return Err(SqlpalError::database(format!(
                "Connection at {} answered in {} ms, over the {} ms budget",
                self.endpoint,
                ping,
                PING_BUDGET.as_millis()
            )));
        }
        Ok(format!(
            "Connection is stable and valid at URL {} ping {} ms",
            self.endpoint, ping
        ))
    }

    /// Gracefully shut the pool down.
    pub async fn close(self) {
        self.pool.close().await;
        info!(endpoint = %self.endpoint, "Closed connection");
    }
}
