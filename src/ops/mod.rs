//! Transaction-scoped operations over the [`crate::session`] boundary.
//!
//! Each operation comes in two flavors, mirroring the split between a caller
//! that already owns a transaction and one that wants the full wrap:
//!
//! - `*_tx` functions run against an open [`crate::session::TxSession`] and
//!   roll it back on the first failure, leaving commit to the caller;
//! - the plain variants additionally commit on success (and roll back when
//!   the commit itself fails).

mod dml;
mod insert;
mod query;

pub use dml::{
    delete, delete_by_id, delete_by_id_tx, delete_tx, execute, execute_batch, execute_batch_tx,
    execute_tx, update, update_tx,
};
pub use insert::{insert, insert_batch, insert_batch_tx, insert_tx};
pub use query::{count, count_tx, count_with, count_with_tx, query, query_one, query_one_tx, query_tx};

use crate::error::SqlBinderError;
use crate::session::TxSession;

/// Commit on success, roll back on any failure (a rollback that was already
/// issued by a `*_tx` function is attempted again and the outcome ignored,
/// matching driver semantics for an aborted transaction).
async fn finish<S, T>(
    session: &mut S,
    result: Result<T, SqlBinderError>,
) -> Result<T, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    match result {
        Ok(value) => {
            if let Err(err) = session.commit().await {
                let _ = session.rollback().await;
                return Err(err);
            }
            Ok(value)
        }
        Err(err) => {
            let _ = session.rollback().await;
            Err(err)
        }
    }
}

/// Roll the transaction back before surfacing any failure, whether it came
/// from the compiler, the mapping, the driver, or a post-execution check.
async fn rollback_on_err<S, T>(
    session: &mut S,
    result: Result<T, SqlBinderError>,
) -> Result<T, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            let _ = session.rollback().await;
            Err(err)
        }
    }
}

fn log_statement(op: &str, sql: &str, params: usize, start: std::time::Instant) {
    tracing::debug!(
        stmt = sql,
        params,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "{op}"
    );
}
