//! Statement splitting, classification, and result extraction tests

use sqlpal::query::executor::{is_fetch_statement, split_statements};
use sqlpal::query::result::{ResultSet, StatementOutcome};
use sqlpal::query::script::parse_sequence;

mod splitting_tests {
    use super::*;

    #[test]
    fn test_multi_statement_script() {
        let script = "\
            drop table if exists characters;\n\
            create table characters (name varchar(64), element varchar(16));\n\
            insert into characters values ('Amber', 'Pyro');\n\
            select name from characters;";

        let statements = split_statements(script);
        assert_eq!(statements.len(), 4);
        assert!(statements[0].starts_with("drop table"));
        assert!(statements[3].starts_with("select name"));
    }

    #[test]
    fn test_trailing_and_doubled_semicolons() {
        assert_eq!(split_statements("select 1;;"), vec!["select 1"]);
        assert_eq!(
            split_statements(";select 1; ;select 2;"),
            vec!["select 1", "select 2"]
        );
    }

    #[test]
    fn test_classification_is_prefix_word_based() {
        assert!(is_fetch_statement("select 1"));
        assert!(is_fetch_statement("\n\tSHOW DATABASES"));
        assert!(is_fetch_statement("desc characters"));

        assert!(!is_fetch_statement("delete from characters"));
        assert!(!is_fetch_statement("selections")); // not the keyword
        assert!(!is_fetch_statement(""));
    }
}

mod extraction_tests {
    use super::*;

    fn characters() -> ResultSet {
        ResultSet {
            columns: vec![
                "name".into(),
                "version".into(),
                "element".into(),
                "nation".into(),
            ],
            rows: vec![
                vec![
                    Some("Amber".into()),
                    Some("1.0".into()),
                    Some("Pyro".into()),
                    Some("Mondstadt".into()),
                ],
                vec![
                    Some("Xingqiu".into()),
                    Some("1.0".into()),
                    Some("Hydro".into()),
                    None,
                ],
            ],
        }
    }

    #[test]
    fn test_single_column() {
        let names = characters().column(0).unwrap();
        assert_eq!(
            names,
            vec![Some("Amber".to_string()), Some("Xingqiu".to_string())]
        );
    }

    #[test]
    fn test_multiple_columns_preserve_request_order() {
        let rs = characters();
        let picked = rs.columns_at(&[2, 0]).unwrap();
        assert_eq!(picked[0][0], Some("Pyro".to_string()));
        assert_eq!(picked[1][1], Some("Xingqiu".to_string()));
    }

    #[test]
    fn test_null_cells_survive_extraction() {
        let nations = characters().column(3).unwrap();
        assert_eq!(nations[1], None);
    }

    #[test]
    fn test_outcome_serializes_for_json_output() {
        let outcome = StatementOutcome::Affected(3);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["Affected"], 3);

        let rows = StatementOutcome::Rows(characters());
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json["Rows"]["columns"][0], "name");
    }
}

mod sequence_tests {
    use super::*;

    #[test]
    fn test_manifest_order_is_preserved() {
        let (scripts, _) = parse_sequence("b.sql\na.sql\nc.txt\n");
        assert_eq!(scripts, vec!["b.sql", "a.sql", "c.txt"]);
    }

    #[test]
    fn test_non_script_entries_are_reported() {
        let (scripts, skipped) = parse_sequence("setup.sql\nnotes.md\nbackup.tar\n");
        assert_eq!(scripts, vec!["setup.sql"]);
        assert_eq!(skipped, vec!["notes.md", "backup.tar"]);
    }
}
