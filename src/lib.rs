//! Named-parameter SQL compilation and entity-column mapping between
//! application code and a relational database driver.
//!
//! The crate turns a template with `:name` tokens (or `{}` positional
//! markers) into a dialect-final SQL string plus a flat positional parameter
//! list, expands collection-valued bindings into repeated placeholders, maps
//! entity attributes to columns through static per-type metadata, and drives
//! chunked batch execution through an injected transaction-scoped session.
//!
//! ```rust
//! use sql_binder::{CompilerConfig, Statement};
//!
//! let config = CompilerConfig::from_driver_name("postgres")?;
//! let stmt = Statement::new("SELECT * FROM player WHERE id IN (:ids) AND active = :active")
//!     .bind("ids", vec![1i64, 2, 3])
//!     .bind("active", true);
//! let compiled = stmt.render(&config)?;
//! assert_eq!(
//!     compiled.sql,
//!     "SELECT * FROM player WHERE id IN ($1,$2,$3) AND active = $4"
//! );
//! assert_eq!(compiled.params.len(), 4);
//! # Ok::<(), sql_binder::SqlBinderError>(())
//! ```

pub mod chunk;
pub mod config;
pub mod dialect;
pub mod entity;
pub mod error;
pub mod ops;
pub mod prelude;
pub mod results;
pub mod session;
pub mod statement;
pub mod types;

pub use config::CompilerConfig;
pub use error::SqlBinderError;
pub use statement::{Compiled, Statement};
pub use types::{BoundValue, ParamValue};
