use thiserror::Error;

/// Main error type for sqlpal operations
#[derive(Debug, Error)]
pub enum SqlpalError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Credential file not ready: fill in {path}")]
    CredentialFileCreated { path: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Script not found: {path}")]
    ScriptNotFound { path: String },

    #[error("Invalid sequence manifest in '{dir}': {details}")]
    SequenceError { dir: String, details: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Invalid endpoint URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl SqlpalError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn credential<S: Into<String>>(msg: S) -> Self {
        Self::CredentialError(msg.into())
    }

    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::DatabaseError(msg.into())
    }

    pub fn query<S: Into<String>>(msg: S) -> Self {
        Self::QueryError(msg.into())
    }

    pub fn script_not_found<S: Into<String>>(path: S) -> Self {
        Self::ScriptNotFound { path: path.into() }
    }

    pub fn sequence<S: Into<String>>(dir: S, details: S) -> Self {
        Self::SequenceError {
            dir: dir.into(),
            details: details.into(),
        }
    }

    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::SerializationError(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type alias for sqlpal operations
pub type Result<T> = std::result::Result<T, SqlpalError>;
