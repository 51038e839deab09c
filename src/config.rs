use std::sync::Arc;

use crate::dialect::{self, PlaceholderDialect};
use crate::error::SqlBinderError;

/// Process-wide compiler configuration, constructed once at startup and passed
/// by reference into every compile/execute call.
///
/// ```rust
/// use sql_binder::CompilerConfig;
///
/// let config = CompilerConfig::from_driver_name("postgres")?;
/// # Ok::<(), sql_binder::SqlBinderError>(())
/// ```
#[derive(Clone)]
pub struct CompilerConfig {
    dialect: Arc<dyn PlaceholderDialect>,
}

impl CompilerConfig {
    /// Build a configuration around an explicit dialect.
    pub fn new(dialect: Arc<dyn PlaceholderDialect>) -> Self {
        Self { dialect }
    }

    /// Build a configuration by driver-name lookup.
    ///
    /// # Errors
    ///
    /// Returns `SqlBinderError::UnknownDriver` for unrecognized driver names.
    pub fn from_driver_name(name: &str) -> Result<Self, SqlBinderError> {
        Ok(Self {
            dialect: dialect::for_driver(name)?,
        })
    }

    /// The configured placeholder dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn PlaceholderDialect {
        self.dialect.as_ref()
    }
}

impl std::fmt::Debug for CompilerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilerConfig").finish_non_exhaustive()
    }
}
