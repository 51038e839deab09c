use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Scalar values that can be bound to a placeholder or read back from a row.
///
/// One enum shared across the compile and hydration paths so helper code does
/// not need to branch on driver types:
/// ```rust
/// use sql_binder::ParamValue;
///
/// let params = vec![
///     ParamValue::Int(1),
///     ParamValue::Text("alice".into()),
///     ParamValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl ParamValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let ParamValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let ParamValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(value) => Some(*value),
            ParamValue::Int(1) => Some(true),
            ParamValue::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let ParamValue::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let ParamValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let ParamValue::Json(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let ParamValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(value: NaiveDateTime) -> Self {
        ParamValue::Timestamp(value)
    }
}

impl From<JsonValue> for ParamValue {
    fn from(value: JsonValue) -> Self {
        ParamValue::Json(value)
    }
}

impl From<Vec<u8>> for ParamValue {
    fn from(value: Vec<u8>) -> Self {
        ParamValue::Blob(value)
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ParamValue::Null,
        }
    }
}

/// A value bound to a named or positional parameter: either a single scalar
/// or an ordered collection of further bound values.
///
/// Collections expand into one placeholder per contained scalar; nesting
/// flattens depth-first, preserving element order.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Scalar(ParamValue),
    List(Vec<BoundValue>),
}

impl BoundValue {
    /// Number of scalar values this binding contributes after flattening.
    #[must_use]
    pub fn flat_len(&self) -> usize {
        match self {
            BoundValue::Scalar(_) => 1,
            BoundValue::List(items) => items.iter().map(BoundValue::flat_len).sum(),
        }
    }

    /// Append every contained scalar to `out`, depth-first.
    pub fn flatten_into(&self, out: &mut Vec<ParamValue>) {
        match self {
            BoundValue::Scalar(value) => out.push(value.clone()),
            BoundValue::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<ParamValue> for BoundValue {
    fn from(value: ParamValue) -> Self {
        BoundValue::Scalar(value)
    }
}

// Concrete scalar conversions; a blanket impl over Into<ParamValue> would
// collide with the reflexive From impl in core.
macro_rules! scalar_bound_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for BoundValue {
                fn from(value: $ty) -> Self {
                    BoundValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_bound_value!(i64, i32, f64, bool, &str, String, NaiveDateTime, JsonValue);

impl<T> From<Vec<T>> for BoundValue
where
    T: Into<BoundValue>,
{
    fn from(values: Vec<T>) -> Self {
        BoundValue::List(values.into_iter().map(Into::into).collect())
    }
}
