use std::collections::HashMap;
use std::sync::OnceLock;

use crate::config::CompilerConfig;
use crate::error::SqlBinderError;
use crate::types::{BoundValue, ParamValue};

mod scanner;

use scanner::{Segment, scan_template};

/// The output of compiling a statement: dialect-final SQL plus the flat
/// positional parameter list, in left-to-right placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub sql: String,
    pub params: Vec<ParamValue>,
}

/// A SQL statement under construction: literal fragments plus named or
/// positional parameter bindings.
///
/// Fragments appended with [`Statement::append`] are joined with a single
/// space unless the previous fragment already ends in whitespace. Named
/// parameters use `:name` tokens in the template; positional values bound
/// with [`Statement::with`] consume `{}` markers in call order. The two
/// styles cannot be mixed on one statement.
///
/// ```rust
/// use sql_binder::{CompilerConfig, Statement};
///
/// let config = CompilerConfig::from_driver_name("postgres")?;
/// let stmt = Statement::new("SELECT * FROM player WHERE id IN (:ids)")
///     .bind("ids", vec![1i64, 2, 3]);
/// let compiled = stmt.render(&config)?;
/// assert_eq!(compiled.sql, "SELECT * FROM player WHERE id IN ($1,$2,$3)");
/// # Ok::<(), sql_binder::SqlBinderError>(())
/// ```
#[derive(Debug, Default)]
pub struct Statement {
    text: String,
    named: HashMap<String, BoundValue>,
    positional: Vec<ParamValue>,
    expected_rows: u64,
    compiled: OnceLock<Compiled>,
}

impl Statement {
    /// Start a statement from an initial SQL fragment.
    #[must_use]
    pub fn new(sql: &str) -> Self {
        Statement::default().append(sql)
    }

    /// Append a literal SQL fragment, inserting a separating space when the
    /// text so far does not already end in whitespace. Empty fragments are
    /// ignored.
    #[must_use]
    pub fn append(mut self, sql: &str) -> Self {
        if sql.is_empty() {
            return self;
        }
        if !self.text.is_empty() && !self.text.ends_with(char::is_whitespace) {
            self.text.push(' ');
        }
        self.text.push_str(sql);
        self
    }

    /// Bind a value to a `:name` token in the template.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<BoundValue>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Bind a batch of named values at once.
    #[must_use]
    pub fn bind_all<I, K, V>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<BoundValue>,
    {
        for (name, value) in bindings {
            self.named.insert(name.into(), value.into());
        }
        self
    }

    /// Append a positional value, flattening collections depth-first. Each
    /// flattened scalar consumes one `{}` marker in the template.
    #[must_use]
    pub fn with(mut self, value: impl Into<BoundValue>) -> Self {
        value.into().flatten_into(&mut self.positional);
        self
    }

    /// Assert that execution affects exactly `rows` rows (0 disables the
    /// assertion).
    #[must_use]
    pub fn expect_rows(mut self, rows: u64) -> Self {
        self.expected_rows = rows;
        self
    }

    /// The raw template text accumulated so far, before compilation.
    #[must_use]
    pub fn raw_sql(&self) -> &str {
        &self.text
    }

    /// The expected affected-row count; 0 means no assertion.
    #[must_use]
    pub fn expected_rows(&self) -> u64 {
        self.expected_rows
    }

    /// Compile the template against the configured dialect.
    ///
    /// The result is memoized: repeated calls return the same compiled pair
    /// without re-scanning, even if bindings are mutated in between.
    ///
    /// # Errors
    ///
    /// Fails with `MissingParameter` for an unresolved `:name` token,
    /// `PlaceholderCountMismatch` when `{}` markers and positional values
    /// disagree, and `ShapeMismatch` when named and positional bindings are
    /// mixed on one statement.
    pub fn render(&self, config: &CompilerConfig) -> Result<&Compiled, SqlBinderError> {
        if let Some(compiled) = self.compiled.get() {
            return Ok(compiled);
        }
        let compiled = self.compile(config)?;
        Ok(self.compiled.get_or_init(|| compiled))
    }

    fn compile(&self, config: &CompilerConfig) -> Result<Compiled, SqlBinderError> {
        if !self.named.is_empty() && !self.positional.is_empty() {
            return Err(SqlBinderError::ShapeMismatch(
                "statement mixes named and positional parameters".to_string(),
            ));
        }

        enum Piece {
            Text(String),
            // number of placeholder tokens reserved at this position
            Slot(usize),
        }

        let mut pieces = Vec::new();
        let mut params: Vec<ParamValue> = Vec::new();
        let mut markers = 0usize;
        let mut positional = self.positional.iter();

        for segment in scan_template(&self.text) {
            match segment {
                Segment::Sql(text) => pieces.push(Piece::Text(text)),
                Segment::Named(name) => {
                    let value = self
                        .named
                        .get(&name)
                        .ok_or(SqlBinderError::MissingParameter(name))?;
                    let count = value.flat_len();
                    if count > 0 {
                        value.flatten_into(&mut params);
                        pieces.push(Piece::Slot(count));
                    }
                }
                Segment::Marker => {
                    markers += 1;
                    let value = positional.next().ok_or(
                        SqlBinderError::PlaceholderCountMismatch {
                            markers,
                            params: self.positional.len(),
                        },
                    )?;
                    params.push(value.clone());
                    pieces.push(Piece::Slot(1));
                }
            }
        }

        if positional.next().is_some() {
            return Err(SqlBinderError::PlaceholderCountMismatch {
                markers,
                params: self.positional.len(),
            });
        }

        // Placeholders are generated once for the whole statement so stateful
        // dialects ($1..$N) stay numbered across every slot.
        let tokens = config.dialect().placeholders(params.len());
        let mut tokens = tokens.iter();
        let mut sql = String::with_capacity(self.text.len());
        for piece in pieces {
            match piece {
                Piece::Text(text) => sql.push_str(&text),
                Piece::Slot(count) => {
                    for i in 0..count {
                        if i > 0 {
                            sql.push(',');
                        }
                        let token = tokens.next().ok_or_else(|| {
                            SqlBinderError::ParameterError(
                                "dialect returned fewer placeholders than requested".to_string(),
                            )
                        })?;
                        sql.push_str(token);
                    }
                }
            }
        }

        Ok(Compiled { sql, params })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dialect::{DollarNumbered, QuestionMark};

    fn question_mark() -> CompilerConfig {
        CompilerConfig::new(Arc::new(QuestionMark))
    }

    fn dollar() -> CompilerConfig {
        CompilerConfig::new(Arc::new(DollarNumbered))
    }

    #[test]
    fn template_without_tokens_renders_unchanged() {
        let stmt = Statement::new("SELECT * FROM player");
        let compiled = stmt.render(&question_mark()).unwrap();
        assert_eq!(compiled.sql, "SELECT * FROM player");
        assert!(compiled.params.is_empty());
    }

    #[test]
    fn empty_template_renders_empty() {
        let stmt = Statement::new("");
        let compiled = stmt.render(&question_mark()).unwrap();
        assert_eq!(compiled.sql, "");
        assert!(compiled.params.is_empty());
    }

    #[test]
    fn scalars_bind_in_textual_order() {
        let stmt = Statement::new("WHERE a = :a AND b = :b")
            .bind("a", 1i64)
            .bind("b", "x");
        let compiled = stmt.render(&question_mark()).unwrap();
        assert_eq!(compiled.sql, "WHERE a = ? AND b = ?");
        assert_eq!(
            compiled.params,
            vec![ParamValue::Int(1), ParamValue::Text("x".to_string())]
        );
    }

    #[test]
    fn collection_expands_under_dollar_dialect() {
        let stmt = Statement::new("WHERE id IN (:ids)").bind("ids", vec![1i64, 2, 3]);
        let compiled = stmt.render(&dollar()).unwrap();
        assert_eq!(compiled.sql, "WHERE id IN ($1,$2,$3)");
        assert_eq!(
            compiled.params,
            vec![ParamValue::Int(1), ParamValue::Int(2), ParamValue::Int(3)]
        );
    }

    #[test]
    fn repeated_name_resolves_at_each_occurrence() {
        let stmt = Statement::new("WHERE a IN (:ids) OR b IN (:ids)").bind("ids", vec![1i64, 2]);
        let compiled = stmt.render(&dollar()).unwrap();
        assert_eq!(compiled.sql, "WHERE a IN ($1,$2) OR b IN ($3,$4)");
        assert_eq!(compiled.params.len(), 4);
    }

    #[test]
    fn empty_collection_reserves_no_placeholders() {
        let ids: Vec<i64> = Vec::new();
        let stmt = Statement::new("WHERE id IN (:ids)").bind("ids", ids);
        let compiled = stmt.render(&question_mark()).unwrap();
        assert_eq!(compiled.sql, "WHERE id IN ()");
        assert!(compiled.params.is_empty());
    }

    #[test]
    fn missing_parameter_fails_fast() {
        let stmt = Statement::new("WHERE id = :id");
        let err = stmt.render(&question_mark()).unwrap_err();
        assert!(matches!(err, SqlBinderError::MissingParameter(name) if name == "id"));
    }

    #[test]
    fn bare_colon_passes_through() {
        let stmt = Statement::new("SELECT : FROM t");
        let compiled = stmt.render(&question_mark()).unwrap();
        assert_eq!(compiled.sql, "SELECT : FROM t");
    }

    #[test]
    fn positional_markers_consume_values_in_order() {
        let stmt = Statement::new("INSERT INTO t(a,b) VALUES ({},{})")
            .with(1i64)
            .with("x");
        let compiled = stmt.render(&question_mark()).unwrap();
        assert_eq!(compiled.sql, "INSERT INTO t(a,b) VALUES (?,?)");
        assert_eq!(
            compiled.params,
            vec![ParamValue::Int(1), ParamValue::Text("x".to_string())]
        );
    }

    #[test]
    fn positional_collections_flatten() {
        let stmt = Statement::new("VALUES ({},{},{})").with(vec![1i64, 2, 3]);
        let compiled = stmt.render(&dollar()).unwrap();
        assert_eq!(compiled.sql, "VALUES ($1,$2,$3)");
    }

    #[test]
    fn marker_count_mismatch_is_an_error() {
        let stmt = Statement::new("VALUES ({},{})").with(1i64);
        assert!(matches!(
            stmt.render(&question_mark()),
            Err(SqlBinderError::PlaceholderCountMismatch { .. })
        ));

        let stmt = Statement::new("VALUES ({})").with(1i64).with(2i64);
        assert!(matches!(
            stmt.render(&question_mark()),
            Err(SqlBinderError::PlaceholderCountMismatch { .. })
        ));
    }

    #[test]
    fn mixing_named_and_positional_is_rejected() {
        let stmt = Statement::new("VALUES ({}, :a)").with(1i64).bind("a", 2i64);
        assert!(matches!(
            stmt.render(&question_mark()),
            Err(SqlBinderError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn render_is_memoized_across_binding_mutation() {
        let stmt = Statement::new("WHERE id = :id").bind("id", 1i64);
        let first = stmt.render(&question_mark()).unwrap().clone();

        // Re-binding after the first render must not change the compiled pair.
        let stmt = stmt.bind("id", 999i64);
        let second = stmt.render(&question_mark()).unwrap();
        assert_eq!(&first, second);

        // Even a different dialect returns the cached result.
        let third = stmt.render(&dollar()).unwrap();
        assert_eq!(&first, third);
    }

    #[test]
    fn append_joins_fragments_with_single_space() {
        let stmt = Statement::new("DELETE FROM")
            .append("player")
            .append("WHERE id = :id");
        assert_eq!(stmt.raw_sql(), "DELETE FROM player WHERE id = :id");
    }

    #[test]
    fn append_skips_space_after_trailing_whitespace() {
        let stmt = Statement::new("SELECT * ").append("FROM t").append("");
        assert_eq!(stmt.raw_sql(), "SELECT * FROM t");
    }

    #[test]
    fn expected_rows_defaults_to_zero() {
        let stmt = Statement::new("UPDATE t SET a = :a").bind("a", 1i64);
        assert_eq!(stmt.expected_rows(), 0);
        let stmt = stmt.expect_rows(3);
        assert_eq!(stmt.expected_rows(), 3);
    }
}
