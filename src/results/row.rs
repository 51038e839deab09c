use std::collections::HashMap;
use std::sync::Arc;

use crate::types::ParamValue;

/// A single row from a query result, with by-name and by-index access.
///
/// Column names and the name→index cache are shared across all rows of one
/// result set.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row, shared across the result set.
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, aligned with `column_names`.
    pub values: Vec<ParamValue>,
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    /// Create a row, building a fresh column-index cache.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<ParamValue>) -> Self {
        let column_index = Arc::new(build_column_index(&column_names));
        Self {
            column_names,
            values,
            column_index,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<ParamValue>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// The index of a column by name, or `None` if absent.
    #[must_use]
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index.get(column_name) {
            return Some(idx);
        }
        self.column_names.iter().position(|col| col == column_name)
    }

    /// A value by column name.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&ParamValue> {
        self.column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// A value by column index.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&ParamValue> {
        self.values.get(index)
    }
}

pub(crate) fn build_column_index(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}
