use crate::error::SqlBinderError;
use crate::types::ParamValue;

mod mapping;

pub use mapping::{ColumnMapping, mapping_for};

/// How a field maps to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTag {
    /// Column name defaults to the attribute's own name.
    Default,
    /// Explicit column name.
    Named(&'static str),
    /// Field never appears in the mapping.
    Exclude,
    /// Field is itself an entity; its mapping is flattened into the parent.
    Embedded,
}

/// Static description of one entity field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// The attribute name, as registered with [`Entity::get`] / [`Entity::set`].
    pub name: &'static str,
    pub tag: ColumnTag,
    /// Field list of the nested entity, for embedded fields.
    pub nested: Option<fn() -> &'static [FieldDef]>,
}

impl FieldDef {
    /// A field whose column name is the attribute name.
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            tag: ColumnTag::Default,
            nested: None,
        }
    }

    /// A field with an explicit column name.
    #[must_use]
    pub const fn named(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            tag: ColumnTag::Named(column),
            nested: None,
        }
    }

    /// A field excluded from the mapping.
    #[must_use]
    pub const fn excluded(name: &'static str) -> Self {
        Self {
            name,
            tag: ColumnTag::Exclude,
            nested: None,
        }
    }

    /// An embedded entity field, flattened into the parent's namespace.
    #[must_use]
    pub const fn embedded(name: &'static str, fields: fn() -> &'static [FieldDef]) -> Self {
        Self {
            name,
            tag: ColumnTag::Embedded,
            nested: Some(fields),
        }
    }
}

/// An application record corresponding to one table row.
///
/// Implementations register their field list once, statically, and expose
/// typed accessor/setter pairs over the flattened attribute namespace;
/// embedded fields delegate to the nested entity. No runtime reflection is
/// involved.
///
/// ```rust
/// use sql_binder::entity::{Entity, FieldDef};
/// use sql_binder::{ParamValue, SqlBinderError};
///
/// #[derive(Default)]
/// struct Player {
///     id: i64,
/// }
///
/// impl Entity for Player {
///     fn type_name() -> &'static str {
///         "Player"
///     }
///
///     fn fields() -> &'static [FieldDef] {
///         static FIELDS: &[FieldDef] = &[FieldDef::named("Id", "id")];
///         FIELDS
///     }
///
///     fn get(&self, attribute: &str) -> Option<ParamValue> {
///         match attribute {
///             "Id" => Some(ParamValue::Int(self.id)),
///             _ => None,
///         }
///     }
///
///     fn set(&mut self, attribute: &str, value: ParamValue) -> Result<(), SqlBinderError> {
///         match attribute {
///             "Id" => {
///                 self.id = value.as_int().ok_or_else(|| {
///                     SqlBinderError::ParameterError("Id expects an integer".into())
///                 })?;
///                 Ok(())
///             }
///             other => Err(SqlBinderError::ParameterError(format!(
///                 "unknown attribute {other}"
///             ))),
///         }
///     }
/// }
/// ```
pub trait Entity: Sized + 'static {
    /// The entity's own type name, used as the table-name fallback.
    fn type_name() -> &'static str;

    /// The ordered field list, walked depth-first to build the column mapping.
    fn fields() -> &'static [FieldDef];

    /// The table this entity maps to; defaults to the type name verbatim.
    fn table_name() -> &'static str {
        Self::type_name()
    }

    /// Read an attribute by name. Returns `None` for unknown attributes. An
    /// absent optional embedded value reads as `ParamValue::Null`.
    fn get(&self, attribute: &str) -> Option<ParamValue>;

    /// Write an attribute by name.
    ///
    /// # Errors
    ///
    /// Returns `SqlBinderError::ParameterError` for unknown attributes or
    /// values of the wrong type.
    fn set(&mut self, attribute: &str, value: ParamValue) -> Result<(), SqlBinderError>;
}
