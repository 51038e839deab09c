use std::time::Instant;

use crate::config::CompilerConfig;
use crate::entity::{ColumnMapping, Entity, mapping_for};
use crate::error::SqlBinderError;
use crate::results::{ResultSet, Row};
use crate::session::TxSession;
use crate::statement::Statement;

use super::{finish, log_statement, rollback_on_err};

fn hydrate<E>(mapping: &ColumnMapping, row: &Row) -> Result<E, SqlBinderError>
where
    E: Entity + Default,
{
    let mut entity = E::default();
    for (idx, column) in row.column_names.iter().enumerate() {
        let attribute = mapping
            .attribute_for(column)
            .ok_or_else(|| SqlBinderError::UnmappedColumn(column.clone()))?;
        let value = row
            .get_by_index(idx)
            .cloned()
            .unwrap_or(crate::types::ParamValue::Null);
        entity.set(attribute, value)?;
    }
    Ok(entity)
}

async fn run_query<S>(
    session: &mut S,
    op: &str,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<ResultSet, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let compiled = statement.render(config)?;

    let start = Instant::now();
    let outcome = session.query(&compiled.sql, &compiled.params).await;
    // logged on success and failure alike
    log_statement(op, &compiled.sql, compiled.params.len(), start);
    outcome
}

/// Run a query inside an open transaction and hydrate every row into an
/// entity through the column mapping.
///
/// # Errors
///
/// Returns `UnmappedColumn` when a result column has no mapped attribute, and
/// propagates compile, driver, and attribute-setter errors.
pub async fn query_tx<S, E>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<Vec<E>, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity + Default,
{
    let result = run_entity_query(session, statement, config).await;
    rollback_on_err(session, result).await
}

async fn run_entity_query<S, E>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<Vec<E>, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity + Default,
{
    let mapping = mapping_for::<E>()?;
    let result_set = run_query(session, "query", statement, config).await?;

    let mut entities = Vec::with_capacity(result_set.len());
    for row in &result_set.rows {
        entities.push(hydrate::<E>(&mapping, row)?);
    }
    Ok(entities)
}

/// Run a query, hydrate every row, and commit.
///
/// # Errors
///
/// Same contract as [`query_tx`], plus commit failures.
pub async fn query<S, E>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<Vec<E>, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity + Default,
{
    let result = query_tx(session, statement, config).await;
    finish(session, result).await
}

/// Run a single-row query inside an open transaction.
///
/// Zero rows is `NotFound`; when the query matches more than one row, only
/// the first is consumed and the rest are silently ignored.
///
/// # Errors
///
/// `NotFound` on an empty result, otherwise the [`query_tx`] contract.
pub async fn query_one_tx<S, E>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<E, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity + Default,
{
    let result = run_entity_query_one(session, statement, config).await;
    rollback_on_err(session, result).await
}

async fn run_entity_query_one<S, E>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<E, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity + Default,
{
    let mapping = mapping_for::<E>()?;
    let result_set = run_query(session, "query-one", statement, config).await?;

    let row = result_set.rows.first().ok_or(SqlBinderError::NotFound)?;
    hydrate::<E>(&mapping, row)
}

/// Run a single-row query and commit.
///
/// # Errors
///
/// Same contract as [`query_one_tx`], plus commit failures.
pub async fn query_one<S, E>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<E, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity + Default,
{
    let result = query_one_tx(session, statement, config).await;
    finish(session, result).await
}

fn scalar_count(result_set: &ResultSet) -> Result<u64, SqlBinderError> {
    let row = result_set.rows.first().ok_or(SqlBinderError::NotFound)?;
    let count = row
        .get_by_index(0)
        .and_then(crate::types::ParamValue::as_int)
        .ok_or_else(|| {
            SqlBinderError::ParameterError("count column was not an integer".to_string())
        })?;
    u64::try_from(count)
        .map_err(|_| SqlBinderError::ParameterError(format!("negative count {count}")))
}

/// Count all rows in the entity's table inside an open transaction.
///
/// # Errors
///
/// Propagates driver errors; a result without a leading integer column is a
/// `ParameterError`.
pub async fn count_tx<S, E>(
    session: &mut S,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let statement = Statement::new("SELECT count(id) FROM")
        .append(E::table_name())
        .append("WHERE 1=1");
    let result = run_query(session, "count", &statement, config)
        .await
        .and_then(|result_set| scalar_count(&result_set));
    rollback_on_err(session, result).await
}

/// Count all rows in the entity's table and commit.
///
/// # Errors
///
/// Same contract as [`count_tx`], plus commit failures.
pub async fn count<S, E>(session: &mut S, config: &CompilerConfig) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let result = count_tx::<S, E>(session, config).await;
    finish(session, result).await
}

/// Count rows matched by a caller-supplied counting statement inside an open
/// transaction.
///
/// # Errors
///
/// Same result contract as [`count_tx`].
pub async fn count_with_tx<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let result = run_query(session, "count-with", statement, config)
        .await
        .and_then(|result_set| scalar_count(&result_set));
    rollback_on_err(session, result).await
}

/// Count rows matched by a caller-supplied counting statement and commit.
///
/// # Errors
///
/// Same contract as [`count_with_tx`], plus commit failures.
pub async fn count_with<S>(
    session: &mut S,
    statement: &Statement,
    config: &CompilerConfig,
) -> Result<u64, SqlBinderError>
where
    S: TxSession + ?Sized,
{
    let result = count_with_tx(session, statement, config).await;
    finish(session, result).await
}
