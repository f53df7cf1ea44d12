//! Database credential handling
//!
//! Credentials are never compiled in. They come from the environment
//! (`SQLPAL_PASSWORD`, `SQLPAL_USER`) or from a credentials file with one
//! value per line: endpoint URL, username, and an optional password. A
//! missing file is replaced with a placeholder template for the user to
//! fill in; a file still containing placeholders is rejected.

use crate::config::settings::{Config, ConnectionSettings};
use crate::error::{Result, SqlpalError};
use std::path::Path;
use tracing::{info, warn};
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const URL_PLACEHOLDER: &str = "<URL> ex. mysql://localhost:3306/";
pub const USERNAME_PLACEHOLDER: &str = "<USERNAME> ex. root";
pub const PASSWORD_PLACEHOLDER: &str = "<PASSWORD> ex. password";

/// Login material for the database connection. The password is wiped from
/// memory when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    #[zeroize(skip)]
    pub username: String,
    password: String,
    /// Endpoint URL taken from the credentials file, if any. Overrides the
    /// configured host/port/database.
    #[zeroize(skip)]
    endpoint: Option<String>,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self {
            username,
            password,
            endpoint: None,
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Password for display purposes; never the real value.
    pub fn masked_password(&self) -> &'static str {
        if self.password.is_empty() {
            "<NONE>"
        } else {
            "********"
        }
    }

    /// Endpoint URL to connect to: the file-provided URL when present,
    /// otherwise the configured one. A file URL without a database path
    /// gets the configured database appended.
    pub fn resolve_endpoint(&self, settings: &ConnectionSettings) -> Result<String> {
        let Some(raw) = &self.endpoint else {
            return Ok(settings.endpoint_url());
        };

        let mut parsed = Url::parse(raw)?;
        if parsed.path().trim_matches('/').is_empty() {
            parsed.set_path(&settings.database);
        }
        Ok(parsed.to_string())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Load credentials with priority order:
/// 1. Environment variables
/// 2. Credentials file (created as a template when missing)
pub fn load_credentials(config: &Config) -> Result<Credentials> {
    if let Ok(password) = std::env::var("SQLPAL_PASSWORD") {
        let username = std::env::var("SQLPAL_USER")
            .unwrap_or_else(|_| config.connection.username.clone());
        info!("Loaded credentials from environment");
        return Ok(Credentials::new(username, password));
    }

    load_credential_file(&config.credentials_file)
}

/// Read a three-line credentials file. The password line may be absent;
/// some connections run without one.
pub fn load_credential_file(path: &Path) -> Result<Credentials> {
    if !path.exists() {
        write_template(path)?;
        warn!(path = %path.display(), "Credentials file did not exist, wrote a template");
        return Err(SqlpalError::CredentialFileCreated {
            path: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let mut lines = contents.lines();

    let endpoint = lines
        .next()
        .ok_or_else(|| SqlpalError::credential("Credentials file is empty"))?
        .trim()
        .to_string();
    let username = lines
        .next()
        .ok_or_else(|| SqlpalError::credential("Credentials file is missing a username line"))?
        .trim()
        .to_string();
    let password = lines.next().unwrap_or_default().trim().to_string();

    check_placeholders(&endpoint, &username, &password)?;

    // Reject endpoints that cannot be parsed at all, before a connect attempt.
    Url::parse(&endpoint)?;

    info!("Loaded credentials from file");

    Ok(Credentials {
        username,
        password,
        endpoint: Some(endpoint),
    })
}

fn check_placeholders(endpoint: &str, username: &str, password: &str) -> Result<()> {
    let mut stale = Vec::new();
    if endpoint == URL_PLACEHOLDER {
        stale.push("URL");
    }
    if username == USERNAME_PLACEHOLDER {
        stale.push("username");
    }
    if password == PASSWORD_PLACEHOLDER {
        stale.push("password");
    }

    if stale.is_empty() {
        Ok(())
    } else {
        Err(SqlpalError::credential(format!(
            "Placeholder value(s) still present for: {}",
            stale.join(", ")
        )))
    }
}

/// Write the placeholder template, creating parent directories as needed.
pub fn write_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(
        path,
        format!("{URL_PLACEHOLDER}\n{USERNAME_PLACEHOLDER}\n{PASSWORD_PLACEHOLDER}\n"),
    )?;
    Ok(())
}

/// Write a filled-in credentials file. The password line is left empty when
/// `password` is `None`; the caller is expected to supply it via the
/// environment instead.
pub fn write_credential_file(
    path: &Path,
    endpoint: &str,
    username: &str,
    password: Option<&str>,
) -> Result<()> {
    Url::parse(endpoint)?;

    let mut contents = format!("{endpoint}\n{username}\n");
    if let Some(password) = password {
        contents.push_str(password);
        contents.push('\n');
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_writes_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");

        let err = load_credential_file(&path).unwrap_err();
        assert!(matches!(err, SqlpalError::CredentialFileCreated { .. }));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(URL_PLACEHOLDER));
        assert!(written.contains(USERNAME_PLACEHOLDER));
        assert!(written.contains(PASSWORD_PLACEHOLDER));
    }

    #[test]
    fn test_placeholder_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        write_template(&path).unwrap();

        let err = load_credential_file(&path).unwrap_err();
        assert!(matches!(err, SqlpalError::CredentialError(_)));
        assert!(err.to_string().contains("URL"));
    }

    #[test]
    fn test_password_line_is_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        std::fs::write(&path, "mysql://localhost:3306/\nroot\n").unwrap();

        let creds = load_credential_file(&path).unwrap();
        assert_eq!(creds.username, "root");
        assert_eq!(creds.password(), "");
        assert_eq!(creds.masked_password(), "<NONE>");
    }

    #[test]
    fn test_file_endpoint_overrides_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        std::fs::write(&path, "mysql://db.example.com:3307/other\nroot\nhunter2\n").unwrap();

        let creds = load_credential_file(&path).unwrap();
        let settings = ConnectionSettings::default();
        assert_eq!(
            creds.resolve_endpoint(&settings).unwrap(),
            "mysql://db.example.com:3307/other"
        );
        assert_eq!(creds.masked_password(), "********");
    }

    #[test]
    fn test_bare_endpoint_gets_configured_database() {
        let creds = Credentials {
            username: "root".into(),
            password: String::new(),
            endpoint: Some("mysql://localhost:3306/".into()),
        };
        let settings = ConnectionSettings::default();
        assert_eq!(
            creds.resolve_endpoint(&settings).unwrap(),
            "mysql://localhost:3306/genshincharacters"
        );
    }

    #[test]
    fn test_no_override_uses_settings() {
        let creds = Credentials::new("root".into(), "pw".into());
        let settings = ConnectionSettings::default();
        assert_eq!(
            creds.resolve_endpoint(&settings).unwrap(),
            "mysql://localhost:3306/genshincharacters"
        );
    }
}
