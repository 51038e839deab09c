use std::collections::HashMap;
use std::sync::Arc;

use crate::types::ParamValue;

use super::row::{Row, build_column_index};

/// The rows returned by a query, plus the affected-row count for DML.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query.
    pub rows: Vec<Row>,
    /// Rows affected, for DML statements.
    pub rows_affected: u64,
    // shared by all rows to avoid duplicating names per row
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names shared by every row of this result set.
    pub fn set_column_names(&mut self, column_names: Vec<String>) {
        self.column_index = Some(Arc::new(build_column_index(&column_names)));
        self.column_names = Some(Arc::new(column_names));
    }

    /// The shared column names, if set.
    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row of values, reusing the shared column names and index.
    /// Ignored until `set_column_names` has been called.
    pub fn add_row_values(&mut self, values: Vec<ParamValue>) {
        if let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index)
        {
            self.rows.push(Row::with_index(
                column_names.clone(),
                column_index.clone(),
                values,
            ));
            self.rows_affected += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
