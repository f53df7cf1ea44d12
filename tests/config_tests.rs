//! Configuration registry tests
//!
//! Covers the fixed defaults, endpoint rendering, and the ANSI palette.

use sqlpal::config::settings::Config;
use sqlpal::utils::format::Palette;

mod registry_tests {
    use super::*;

    #[test]
    fn test_constants_are_stable_across_reads() {
        let first = Config::default();
        let second = Config::default();

        assert_eq!(
            first.connection.endpoint_url(),
            second.connection.endpoint_url()
        );
        assert_eq!(first.logging.version, second.logging.version);
        assert_eq!(
            first.logging.max_retained_files,
            second.logging.max_retained_files
        );
        assert_eq!(first.logging.directory, second.logging.directory);
    }

    #[test]
    fn test_logging_policy_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.max_retained_files, 32);
        assert_eq!(config.logging.directory.to_str(), Some("logs"));
        assert!(!config.logging.version.is_empty());

        let parts: Vec<&str> = config.logging.version.split('.').collect();
        assert_eq!(parts.len(), 3, "version must be MAJOR.MINOR.PATCH");
        for part in parts {
            assert!(part.parse::<u32>().is_ok());
        }
    }

    #[test]
    fn test_default_endpoint_is_well_formed() {
        let config = Config::default();
        let endpoint = config.connection.endpoint_url();
        assert_eq!(endpoint, "mysql://localhost:3306/genshincharacters");

        let parsed = url::Url::parse(&endpoint).unwrap();
        assert_eq!(parsed.host_str(), Some("localhost"));
        assert_eq!(parsed.port(), Some(3306));
        assert_eq!(parsed.path(), "/genshincharacters");
    }

    #[test]
    fn test_timestamp_patterns() {
        let config = Config::default();
        assert_eq!(config.logging.time_format, "%H:%M:%S");
        assert_eq!(config.logging.file_name_format, "%Y-%m-%d_%H-%M-%S");
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }
}

mod palette_tests {
    use super::*;

    #[test]
    fn test_every_named_code_is_an_escape_sequence() {
        let palette = Palette::default();
        for name in ["reset", "success", "info", "error", "warning"] {
            let code = palette.get(name).unwrap();
            assert!(!code.is_empty());
            assert!(code.starts_with("\u{1b}["), "'{name}' lacks the ANSI prefix");
            assert!(code.ends_with('m'), "'{name}' lacks the terminator");
        }
    }

    #[test]
    fn test_reset_and_error_scenarios() {
        let palette = Palette::default();
        assert_eq!(palette.get("reset"), Some("\u{1b}[0m"));
        assert_eq!(palette.get("error"), Some("\u{1b}[31m"));
    }

    #[test]
    fn test_lookups_are_stable() {
        let palette = Palette::default();
        assert_eq!(palette.get("warning"), palette.get("warning"));
        assert_eq!(palette.get("nonsense"), None);
    }
}
