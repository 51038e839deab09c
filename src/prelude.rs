//! Convenient imports for common functionality.

pub use crate::chunk::chunk;
pub use crate::config::CompilerConfig;
pub use crate::dialect::{
    ColonNumbered, DollarNumbered, PlaceholderDialect, QuestionMark, for_driver,
};
pub use crate::entity::{ColumnMapping, ColumnTag, Entity, FieldDef, mapping_for};
pub use crate::error::SqlBinderError;
pub use crate::results::{ResultSet, Row};
pub use crate::session::{Session, TxSession};
pub use crate::statement::{Compiled, Statement};
pub use crate::types::{BoundValue, ParamValue};
