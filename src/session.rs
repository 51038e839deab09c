use async_trait::async_trait;

use crate::error::SqlBinderError;
use crate::results::ResultSet;
use crate::types::ParamValue;

/// The driver-side boundary: prepare and run one compiled statement with its
/// positional parameter list.
///
/// Implementations own the underlying connection; the compiler performs no
/// I/O of its own. Statements against one session must be issued serially by
/// the owning caller.
#[async_trait]
pub trait Session: Send {
    /// Run a DML statement and return the affected-row count.
    async fn execute(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<u64, SqlBinderError>;

    /// Run a query and return its rows.
    async fn query(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<ResultSet, SqlBinderError>;
}

/// A transaction-scoped session.
///
/// The operations in [`crate::ops`] roll back on the first failure and never
/// leave partial writes committed.
#[async_trait]
pub trait TxSession: Session {
    async fn commit(&mut self) -> Result<(), SqlBinderError>;
    async fn rollback(&mut self) -> Result<(), SqlBinderError>;
}
