use crate::chunk::chunk;
use crate::config::CompilerConfig;
use crate::entity::{ColumnMapping, Entity, mapping_for};
use crate::error::SqlBinderError;
use crate::session::TxSession;
use crate::statement::Statement;

use super::{execute_tx, finish, rollback_on_err};

/// `INSERT INTO table(c1,c2) VALUES ({},{}),({},{})...` with one marker
/// group per row.
fn insert_template(table: &str, columns: &[String], rows: usize) -> String {
    let row = format!("({})", vec!["{}"; columns.len()].join(","));
    let values = vec![row; rows].join(",");
    format!("INSERT INTO {table}({}) VALUES {values}", columns.join(","))
}

fn row_values<E: Entity>(
    mapping: &ColumnMapping,
    entity: &E,
    statement: Statement,
) -> Result<Statement, SqlBinderError> {
    let mut statement = statement;
    for attribute in mapping.attributes() {
        let value = entity.get(attribute).ok_or_else(|| {
            SqlBinderError::ParameterError(format!(
                "attribute {attribute} missing on entity {}",
                E::type_name()
            ))
        })?;
        statement = statement.with(value);
    }
    Ok(statement)
}

/// Insert one entity inside an open transaction.
///
/// The column list comes from the entity's mapping, in field-declaration
/// order. Zero affected rows fails the insert.
///
/// # Errors
///
/// Propagates mapping and compile errors, driver errors, and
/// `RowCountMismatch` when no row was inserted.
pub async fn insert_tx<S, E>(
    session: &mut S,
    entity: &E,
    config: &CompilerConfig,
) -> Result<(), SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let result = run_insert(session, entity, config).await;
    rollback_on_err(session, result).await
}

async fn run_insert<S, E>(
    session: &mut S,
    entity: &E,
    config: &CompilerConfig,
) -> Result<(), SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let mapping = mapping_for::<E>()?;
    let sql = insert_template(mapping.table(), mapping.columns(), 1);
    let statement = row_values(&mapping, entity, Statement::new(&sql))?;

    let affected = execute_tx(session, &statement, config).await?;
    if affected == 0 {
        return Err(SqlBinderError::RowCountMismatch {
            expected: 1,
            actual: 0,
        });
    }
    Ok(())
}

/// Insert one entity and commit.
///
/// # Errors
///
/// Same contract as [`insert_tx`], plus commit failures.
pub async fn insert<S, E>(
    session: &mut S,
    entity: &E,
    config: &CompilerConfig,
) -> Result<(), SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let result = insert_tx(session, entity, config).await;
    finish(session, result).await
}

/// Insert a slice of entities in chunks inside an open transaction.
///
/// Each chunk becomes one multi-row INSERT with `chunk_len × column_count`
/// placeholders. Every chunk must report exactly its own length as affected
/// rows; any mismatch rolls back the whole batch and no later chunk runs.
/// An empty slice is a no-op.
///
/// # Errors
///
/// Returns `InvalidBatchSize` for a zero batch size, otherwise the
/// per-chunk [`execute_tx`] contract plus `RowCountMismatch`.
pub async fn insert_batch_tx<S, E>(
    session: &mut S,
    entities: &[E],
    batch_size: usize,
    config: &CompilerConfig,
) -> Result<(), SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let result = run_insert_batch(session, entities, batch_size, config).await;
    rollback_on_err(session, result).await
}

async fn run_insert_batch<S, E>(
    session: &mut S,
    entities: &[E],
    batch_size: usize,
    config: &CompilerConfig,
) -> Result<(), SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    if entities.is_empty() {
        return Ok(());
    }

    let mapping = mapping_for::<E>()?;
    for batch in chunk(entities, batch_size)? {
        let sql = insert_template(mapping.table(), mapping.columns(), batch.len());
        let mut statement = Statement::new(&sql);
        for entity in batch {
            statement = row_values(&mapping, entity, statement)?;
        }

        let affected = execute_tx(session, &statement, config).await?;
        if affected != batch.len() as u64 {
            return Err(SqlBinderError::RowCountMismatch {
                expected: batch.len() as u64,
                actual: affected,
            });
        }
    }
    Ok(())
}

/// Insert a slice of entities in chunks and commit.
///
/// # Errors
///
/// Same contract as [`insert_batch_tx`], plus commit failures.
pub async fn insert_batch<S, E>(
    session: &mut S,
    entities: &[E],
    batch_size: usize,
    config: &CompilerConfig,
) -> Result<(), SqlBinderError>
where
    S: TxSession + ?Sized,
    E: Entity,
{
    let result = insert_batch_tx(session, entities, batch_size, config).await;
    finish(session, result).await
}
