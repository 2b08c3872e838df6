use crate::model::FieldKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Opaque operand carried by a `Criterion`.
///
/// The variant set is the scalar surface the dispatch layer actually
/// transports; interpretation (quoting, binding, comparison) belongs to the
/// persistence session behind the statement identifier.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(Vec<Value>),
}

impl Value {
    /// Variant name for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "list",
        }
    }

    /// True when the value is a sequence.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Coerce the value to the temporal granularity of the target column.
    ///
    /// A datetime bound against a date-only column is truncated to its date
    /// part; a date bound against a datetime column widens to midnight.
    /// Applied element-wise through lists. Non-temporal targets are untouched.
    #[must_use]
    pub(crate) fn coerce_to(self, kind: FieldKind) -> Self {
        match (self, kind) {
            (Self::DateTime(dt), FieldKind::Date) => Self::Date(dt.date()),
            (Self::Date(d), FieldKind::DateTime) => Self::DateTime(d.and_time(NaiveTime::MIN)),
            (Self::List(items), kind) => {
                Self::List(items.into_iter().map(|v| v.coerce_to(kind)).collect())
            }
            (value, _) => value,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
