//! Row-oriented query results shared by every session backend.

mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::Row;
