use std::sync::Arc;

use crate::error::SqlBinderError;

/// Strategy producing a database's positional placeholder tokens.
///
/// Implementations are stateless: given a value count they return the tokens
/// in bind order. The set is open; callers may plug in their own dialect
/// without touching the compiler:
/// ```rust
/// use sql_binder::dialect::{DollarNumbered, PlaceholderDialect};
///
/// let tokens = DollarNumbered.placeholders(3);
/// assert_eq!(tokens, vec!["$1", "$2", "$3"]);
/// ```
pub trait PlaceholderDialect: Send + Sync {
    /// Return `count` placeholder tokens, in bind order.
    fn placeholders(&self, count: usize) -> Vec<String>;
}

/// Sequential `?` placeholders (MySQL, SQLite).
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionMark;

impl PlaceholderDialect for QuestionMark {
    fn placeholders(&self, count: usize) -> Vec<String> {
        vec!["?".to_string(); count]
    }
}

/// Numbered `$1..$N` placeholders (PostgreSQL).
#[derive(Debug, Clone, Copy, Default)]
pub struct DollarNumbered;

impl PlaceholderDialect for DollarNumbered {
    fn placeholders(&self, count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("${i}")).collect()
    }
}

/// Numbered `:1..:N` placeholders (Oracle).
#[derive(Debug, Clone, Copy, Default)]
pub struct ColonNumbered;

impl PlaceholderDialect for ColonNumbered {
    fn placeholders(&self, count: usize) -> Vec<String> {
        (1..=count).map(|i| format!(":{i}")).collect()
    }
}

/// Resolve a dialect from a driver name.
///
/// # Errors
///
/// Returns `SqlBinderError::UnknownDriver` for unrecognized names.
pub fn for_driver(name: &str) -> Result<Arc<dyn PlaceholderDialect>, SqlBinderError> {
    match name.to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" | "pg" | "psql" => Ok(Arc::new(DollarNumbered)),
        "mysql" | "sqlite" | "sqlite3" => Ok(Arc::new(QuestionMark)),
        "oracle" | "ora" => Ok(Arc::new(ColonNumbered)),
        other => Err(SqlBinderError::UnknownDriver(other.to_string())),
    }
}
