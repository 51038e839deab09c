use std::collections::HashMap;
use std::time::Instant;

use crate::config::CompilerConfig;
use crate::entity::Entity;
use crate::error::SqlBinderError;
use crate::session::TxSession;
use crate::statement::Statement;
use crate::types::BoundValue;

use super::{finish, log_statement, rollback_on_err};

/// Compile and run a statement inside an open transaction.
///
/// Rolls the transaction back on any failure, compile errors included;
/// commit stays with the caller.
///
/// # Errors
///
/// Propagates compile errors, driver errors, and `RowCountMismatch`.
pub async fn execute_tx<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let result = run_execute(session, statement, config).await;
    rollback_on_err(session, result).await
}

async fn run_execute<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let compiled = statement.render(config)?;

    let start = Instant::now();
    let outcome = session.execute(&compiled.sql, &compiled.params).await;
    // logged on success and failure alike
    log_statement("execute", &compiled.sql, compiled.params.len(), start);
    let affected = outcome?;

    let expected = statement.expected_rows();
    if expected > 0 && affected != expected {
        return Err(SqlBinderError::RowCountMismatch {
            expected,
            actual: affected,
        });
    }
    Ok(affected)
}

/// Run a statement and commit.
///
/// # Errors
///
/// Same as [`execute_tx`], plus commit failures.
pub async fn execute<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let result = execute_tx(session, statement, config).await;
    finish(session, result).await
}

/// Run an UPDATE statement inside an open transaction.
///
/// # Errors
///
/// Same contract as [`execute_tx`].
pub async fn update_tx<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    execute_tx(session, statement, config).await
}

/// Run an UPDATE statement and commit.
///
/// # Errors
///
/// Same contract as [`execute`].
pub async fn update<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    execute(session, statement, config).await
}

/// Run a DELETE statement inside an open transaction.
///
/// # Errors
///
/// Same contract as [`execute_tx`].
pub async fn delete_tx<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    execute_tx(session, statement, config).await
}

/// Run a DELETE statement and commit.
///
/// # Errors
///
/// Same contract as [`execute`].
pub async fn delete<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    execute(session, statement, config).await
}

/// Delete one entity by its id attribute inside an open transaction.
///
/// The id is read from the first of `id`, `Id`, or `ID` the entity exposes.
///
/// # Errors
///
/// Returns `ParameterError` when the entity has no id attribute, otherwise
/// the [`execute_tx`] contract.
pub async fn delete_by_id_tx<S, E>(
    session: &mut S,
    entity: &E,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let found = ["id", "Id", "ID"]
        .iter()
        .find_map(|name| entity.get(name))
        .ok_or_else(|| {
            SqlBinderError::ParameterError(format!(
                "entity {} has no id attribute",
                E::type_name()
            ))
        });
    let id = rollback_on_err(session, found).await?;

    let statement = Statement::new("DELETE FROM")
        .append(E::table_name())
        .append("WHERE id = :id")
        .bind("id", id);
    execute_tx(session, &statement, config).await
}

/// Delete one entity by id and commit.
///
/// # Errors
///
/// Same contract as [`delete_by_id_tx`], plus commit failures.
pub async fn delete_by_id<S, E>(
    session: &mut S,
    entity: &E,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let result = delete_by_id_tx(session, entity, config).await;
    finish(session, result).await
}

/// Run one raw template once per named-binding map, sequentially, inside an
/// open transaction, and accumulate the affected-row counts.
///
/// The template is compiled once per binding map. The first failure aborts
/// the remaining work and rolls back.
///
/// # Errors
///
/// Same per-statement contract as [`execute_tx`].
pub async fn execute_batch_tx<S>(
    session: &mut S,
    template: &str,
    bindings: &[HashMap<String, BoundValue>],
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let mut total = 0u64;
    for binding in bindings {
        let statement = Statement::new(template)
            .bind_all(binding.iter().map(|(k, v)| (k.clone(), v.clone())));
        total += execute_tx(session, &statement, config).await?;
    }
    Ok(total)
}

/// Run a batch of named-binding maps against one template and commit.
///
/// # Errors
///
/// Same contract as [`execute_batch_tx`], plus commit failures.
pub async fn execute_batch<S>(
    session: &mut S,
    template: &str,
    bindings: &[HashMap<String, BoundValue>],
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let result = execute_batch_tx(session, template, bindings, config).await;
    finish(session, result).await
}
