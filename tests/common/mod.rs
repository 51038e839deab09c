//! Shared test fixtures: a scripted in-memory session and sample entities.
#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use sql_binder::prelude::*;

/// One recorded execute/query invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    pub params: Vec<ParamValue>,
}

/// A transaction-scoped session that records every statement it receives and
/// replays scripted results, so tests can assert on the orchestration
/// contract (call shapes, rollback on first failure, commit on success).
#[derive(Default)]
pub struct FakeSession {
    pub calls: Vec<Call>,
    pub execute_results: VecDeque<Result<u64, SqlBinderError>>,
    pub query_results: VecDeque<Result<ResultSet, SqlBinderError>>,
    pub committed: bool,
    pub rolled_back: bool,
}

impl FakeSession {
    pub fn with_execute_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<u64, SqlBinderError>>,
    {
        FakeSession {
            execute_results: results.into_iter().collect(),
            ..FakeSession::default()
        }
    }

    pub fn with_query_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<ResultSet, SqlBinderError>>,
    {
        FakeSession {
            query_results: results.into_iter().collect(),
            ..FakeSession::default()
        }
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn execute(&mut self, sql: &str, params: &[ParamValue]) -> Result<u64, SqlBinderError> {
        self.calls.push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        self.execute_results
            .pop_front()
            .unwrap_or_else(|| Err(SqlBinderError::ExecutionError("unscripted execute".into())))
    }

    async fn query(
        &mut self,
        sql: &str,
        params: &[ParamValue],
    ) -> Result<ResultSet, SqlBinderError> {
        self.calls.push(Call {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        self.query_results
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }
}

#[async_trait]
impl TxSession for FakeSession {
    async fn commit(&mut self) -> Result<(), SqlBinderError> {
        self.committed = true;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), SqlBinderError> {
        self.rolled_back = true;
        Ok(())
    }
}

/// Build a result set from column names and value rows.
pub fn result_set(columns: &[&str], rows: Vec<Vec<ParamValue>>) -> ResultSet {
    let mut rs = ResultSet::with_capacity(rows.len());
    rs.set_column_names(columns.iter().map(ToString::to_string).collect());
    for row in rows {
        rs.add_row_values(row);
    }
    rs
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub city: String,
}

impl Entity for Address {
    fn type_name() -> &'static str {
        "Address"
    }

    fn fields() -> &'static [FieldDef] {
        static FIELDS: &[FieldDef] = &[FieldDef::named("City", "city")];
        FIELDS
    }

    fn get(&self, attribute: &str) -> Option<ParamValue> {
        match attribute {
            "City" => Some(ParamValue::Text(self.city.clone())),
            _ => None,
        }
    }

    fn set(&mut self, attribute: &str, value: ParamValue) -> Result<(), SqlBinderError> {
        match attribute {
            "City" => {
                self.city = value
                    .as_text()
                    .ok_or_else(|| SqlBinderError::ParameterError("City expects text".into()))?
                    .to_string();
                Ok(())
            }
            other => Err(SqlBinderError::ParameterError(format!(
                "unknown attribute {other}"
            ))),
        }
    }
}

/// Sample entity with an explicit table name, an excluded field, and an
/// embedded address.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub secret: String,
    pub addr: Address,
}

impl Player {
    pub fn new(id: i64, city: &str) -> Self {
        Player {
            id,
            secret: String::new(),
            addr: Address {
                city: city.to_string(),
            },
        }
    }
}

impl Entity for Player {
    fn type_name() -> &'static str {
        "Player"
    }

    fn table_name() -> &'static str {
        "players"
    }

    fn fields() -> &'static [FieldDef] {
        static FIELDS: &[FieldDef] = &[
            FieldDef::named("Id", "id"),
            FieldDef::excluded("Secret"),
            FieldDef::embedded("Addr", Address::fields),
        ];
        FIELDS
    }

    fn get(&self, attribute: &str) -> Option<ParamValue> {
        match attribute {
            "Id" => Some(ParamValue::Int(self.id)),
            "Secret" => Some(ParamValue::Text(self.secret.clone())),
            _ => self.addr.get(attribute),
        }
    }

    fn set(&mut self, attribute: &str, value: ParamValue) -> Result<(), SqlBinderError> {
        match attribute {
            "Id" => {
                self.id = value.as_int().ok_or_else(|| {
                    SqlBinderError::ParameterError("Id expects an integer".into())
                })?;
                Ok(())
            }
            "Secret" => {
                self.secret = value
                    .as_text()
                    .ok_or_else(|| SqlBinderError::ParameterError("Secret expects text".into()))?
                    .to_string();
                Ok(())
            }
            _ => self.addr.set(attribute, value),
        }
    }
}

pub fn question_mark_config() -> CompilerConfig {
    CompilerConfig::from_driver_name("sqlite").expect("sqlite driver is known")
}
