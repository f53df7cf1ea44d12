//! Credentials file lifecycle tests

use sqlpal::config::credentials::{
    load_credential_file, write_credential_file, write_template, URL_PLACEHOLDER,
};
use sqlpal::config::settings::ConnectionSettings;
use sqlpal::error::SqlpalError;
use tempfile::tempdir;

mod credential_file_tests {
    use super::*;

    #[test]
    fn test_first_run_creates_template_and_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");

        let err = load_credential_file(&path).unwrap_err();
        assert!(matches!(err, SqlpalError::CredentialFileCreated { .. }));
        assert!(err.to_string().contains("credentials.txt"));

        // The template must exist and be rejected until it is filled in
        assert!(path.exists());
        let err = load_credential_file(&path).unwrap_err();
        assert!(matches!(err, SqlpalError::CredentialError(_)));
    }

    #[test]
    fn test_partially_filled_template_names_the_stale_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        std::fs::write(
            &path,
            format!("{URL_PLACEHOLDER}\nroot\nhunter2\n"),
        )
        .unwrap();

        let err = load_credential_file(&path).unwrap_err();
        assert!(err.to_string().contains("URL"));
        assert!(!err.to_string().contains("username"));
    }

    #[test]
    fn test_filled_file_loads_and_overrides_endpoint() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        write_credential_file(&path, "mysql://db.internal:3307/games", "app", Some("pw"))
            .unwrap();

        let creds = load_credential_file(&path).unwrap();
        assert_eq!(creds.username, "app");
        assert_eq!(creds.password(), "pw");

        let endpoint = creds.resolve_endpoint(&ConnectionSettings::default()).unwrap();
        assert_eq!(endpoint, "mysql://db.internal:3307/games");
    }

    #[test]
    fn test_write_rejects_unparseable_endpoint() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        assert!(write_credential_file(&path, "not a url", "root", None).is_err());
    }

    #[test]
    fn test_passwordless_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        write_credential_file(&path, "mysql://localhost:3306/", "root", None).unwrap();

        let creds = load_credential_file(&path).unwrap();
        assert_eq!(creds.password(), "");
        assert_eq!(creds.masked_password(), "<NONE>");

        // A bare endpoint picks up the configured database
        let endpoint = creds.resolve_endpoint(&ConnectionSettings::default()).unwrap();
        assert_eq!(endpoint, "mysql://localhost:3306/genshincharacters");
    }

    #[test]
    fn test_template_is_three_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.txt");
        write_template(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
    }
}
