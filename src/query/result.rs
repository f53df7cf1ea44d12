//! Query result types and extraction helpers
//!
//! All cell values come back stringified; SQL NULL is preserved as `None`.
//! Extraction by index returns errors rather than panicking on bad indexes.

use crate::error::{Result, SqlpalError};
use serde::Serialize;

/// Rows returned by a fetch statement, with the column names carried
/// alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Number of data rows (the header does not count).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// All values of a single column, top to bottom.
    pub fn column(&self, index: usize) -> Result<Vec<Option<String>>> {
        if index >= self.columns.len() {
            return Err(SqlpalError::invalid_argument(format!(
                "Column index {index} out of range for {} column(s)",
                self.columns.len()
            )));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).cloned().flatten())
            .collect())
    }

    /// Several columns at once, in the order requested.
    pub fn columns_at(&self, indexes: &[usize]) -> Result<Vec<Vec<Option<String>>>> {
        indexes.iter().map(|&i| self.column(i)).collect()
    }

    pub fn row(&self, index: usize) -> Result<&[Option<String>]> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                SqlpalError::invalid_argument(format!(
                    "Row index {index} out of range for {} row(s)",
                    self.rows.len()
                ))
            })
    }

    pub fn first_row(&self) -> Result<&[Option<String>]> {
        self.row(0)
    }
}

/// What a single executed statement produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StatementOutcome {
    /// A fetch statement with its rows.
    Rows(ResultSet),
    /// A data-modifying statement with its affected-row count.
    Affected(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet {
            columns: vec!["name".into(), "element".into()],
            rows: vec![
                vec![Some("Amber".into()), Some("Pyro".into())],
                vec![Some("Xingqiu".into()), None],
            ],
        }
    }

    #[test]
    fn test_column_extraction() {
        let rs = sample();
        assert_eq!(
            rs.column(0).unwrap(),
            vec![Some("Amber".to_string()), Some("Xingqiu".to_string())]
        );
        assert_eq!(rs.column(1).unwrap(), vec![Some("Pyro".to_string()), None]);
        assert!(rs.column(2).is_err());
    }

    #[test]
    fn test_columns_at() {
        let rs = sample();
        let both = rs.columns_at(&[1, 0]).unwrap();
        assert_eq!(both[0], vec![Some("Pyro".to_string()), None]);
        assert_eq!(both[1][0], Some("Amber".to_string()));
        assert!(rs.columns_at(&[0, 9]).is_err());
    }

    #[test]
    fn test_row_access() {
        let rs = sample();
        assert_eq!(rs.first_row().unwrap()[0], Some("Amber".to_string()));
        assert_eq!(rs.row(1).unwrap()[1], None);
        assert!(rs.row(2).is_err());
    }

    #[test]
    fn test_empty() {
        let rs = ResultSet::default();
        assert!(rs.is_empty());
        assert_eq!(rs.len(), 0);
        assert!(rs.first_row().is_err());
    }
}
