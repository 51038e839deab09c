use thiserror::Error;

/// Errors surfaced by statement compilation, entity mapping, and the
/// transaction-scoped operations built on top of them.
#[derive(Debug, Error)]
pub enum SqlBinderError {
    #[error("record not found")]
    NotFound,

    #[error("expected {expected} affected rows, got {actual}")]
    RowCountMismatch { expected: u64, actual: u64 },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("no attribute mapped to column {0}")]
    UnmappedColumn(String),

    #[error("no bound value for parameter :{0}")]
    MissingParameter(String),

    #[error("duplicate column {column} while mapping entity {entity}")]
    DuplicateColumn {
        entity: &'static str,
        column: String,
    },

    #[error("field {field} of entity {entity} is tagged embedded but is not an entity")]
    InvalidEmbedding {
        entity: &'static str,
        field: &'static str,
    },

    #[error("template has {markers} placeholder markers but {params} bound values")]
    PlaceholderCountMismatch { markers: usize, params: usize },

    #[error("unknown driver: {0}")]
    UnknownDriver(String),

    #[error("batch size must be greater than zero")]
    InvalidBatchSize,

    #[error("parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}
