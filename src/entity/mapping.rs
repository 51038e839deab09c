use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::error::SqlBinderError;

use super::{ColumnTag, Entity, FieldDef};

/// The bijection between an entity's columns and attributes, after exclusions
/// and embedded-entity flattening.
///
/// Built once per entity type from immutable static metadata; read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    entity: &'static str,
    table: &'static str,
    // encounter order of the depth-first field walk
    columns: Vec<String>,
    attributes: Vec<String>,
    column_to_attribute: HashMap<String, String>,
    attribute_to_column: HashMap<String, String>,
}

impl ColumnMapping {
    /// Walk the entity's field list depth-first and build the mapping.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateColumn` when two fields resolve to the same column
    /// name and `InvalidEmbedding` when an embedded field carries no nested
    /// field list.
    pub fn build<E: Entity>() -> Result<Self, SqlBinderError> {
        let mut mapping = ColumnMapping {
            entity: E::type_name(),
            table: E::table_name(),
            columns: Vec::new(),
            attributes: Vec::new(),
            column_to_attribute: HashMap::new(),
            attribute_to_column: HashMap::new(),
        };
        collect_fields(E::type_name(), E::fields(), &mut mapping)?;
        Ok(mapping)
    }

    #[must_use]
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    #[must_use]
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Column names in field-declaration order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Attribute names in field-declaration order, aligned with `columns`.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute_for(&self, column: &str) -> Option<&str> {
        self.column_to_attribute.get(column).map(String::as_str)
    }

    #[must_use]
    pub fn column_for(&self, attribute: &str) -> Option<&str> {
        self.attribute_to_column.get(attribute).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn insert(
        &mut self,
        entity: &'static str,
        column: &str,
        attribute: &str,
    ) -> Result<(), SqlBinderError> {
        if self.column_to_attribute.contains_key(column) {
            return Err(SqlBinderError::DuplicateColumn {
                entity,
                column: column.to_string(),
            });
        }
        self.columns.push(column.to_string());
        self.attributes.push(attribute.to_string());
        self.column_to_attribute
            .insert(column.to_string(), attribute.to_string());
        self.attribute_to_column
            .insert(attribute.to_string(), column.to_string());
        Ok(())
    }
}

fn collect_fields(
    entity: &'static str,
    fields: &'static [FieldDef],
    mapping: &mut ColumnMapping,
) -> Result<(), SqlBinderError> {
    for field in fields {
        match field.tag {
            ColumnTag::Exclude => {}
            ColumnTag::Embedded => {
                let nested = field.nested.ok_or(SqlBinderError::InvalidEmbedding {
                    entity,
                    field: field.name,
                })?;
                collect_fields(entity, nested(), mapping)?;
            }
            ColumnTag::Named(column) => mapping.insert(entity, column, field.name)?,
            ColumnTag::Default => mapping.insert(entity, field.name, field.name)?,
        }
    }
    Ok(())
}

type MappingCache = LazyLock<Mutex<HashMap<TypeId, Arc<ColumnMapping>>>>;

static CACHE: MappingCache = LazyLock::new(|| Mutex::new(HashMap::new()));

/// The cached column mapping for an entity type, computed on first use.
///
/// # Errors
///
/// Propagates mapping construction errors; failed builds are not cached.
pub fn mapping_for<E: Entity>() -> Result<Arc<ColumnMapping>, SqlBinderError> {
    let mut cache = match CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(found) = cache.get(&TypeId::of::<E>()) {
        return Ok(found.clone());
    }
    let built = Arc::new(ColumnMapping::build::<E>()?);
    cache.insert(TypeId::of::<E>(), built.clone());
    Ok(built)
}
