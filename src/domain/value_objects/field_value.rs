use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::Equity;

/// A single scalar destined for a positional SQL parameter.
///
/// Each variant carries its own SQL type so that a `NULL` is still bound with
/// the type of the column it targets.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Decimal(Option<Decimal>),
    Boolean(Option<bool>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    pub fn integer(value: i32) -> Self {
        Self::Integer(Some(value))
    }

    pub fn decimal(value: Decimal) -> Self {
        Self::Decimal(Some(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::Boolean(Some(value))
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => *v,
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => *v,
            _ => None,
        }
    }

    /// Integer carried by this value; text such as a query-string value is
    /// parsed
    pub fn read_integer(&self) -> Option<i32> {
        match self {
            Self::Text(Some(raw)) => raw.parse().ok(),
            other => other.as_integer(),
        }
    }

    /// Boolean carried by this value; text must be exactly `true` or `false`
    pub fn read_boolean(&self) -> Option<bool> {
        match self {
            Self::Text(Some(raw)) => match raw.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            other => other.as_boolean(),
        }
    }

    /// Textual rendering of a non-null value, used by fuzzy text predicates
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(v) => v.clone(),
            Self::Integer(v) => v.map(|n| n.to_string()),
            Self::Decimal(v) => v.map(|d| d.to_string()),
            Self::Boolean(v) => v.map(|b| b.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Self::Text(v) => v.is_none(),
            Self::Integer(v) => v.is_none(),
            Self::Decimal(v) => v.is_none(),
            Self::Boolean(v) => v.is_none(),
        }
    }
}

/// Shape a writable field accepts from a JSON payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-null text
    Text,
    /// Text or null
    OptionalText,
    /// Non-negative integer or null
    OptionalCount,
    /// Decimal within [0, 1] or null
    OptionalEquity,
}

impl FieldKind {
    pub fn parse(&self, field: &str, value: &Value) -> Result<FieldValue, DomainError> {
        match (self, value) {
            (Self::Text, Value::String(s)) if !s.is_empty() => Ok(FieldValue::text(s.clone())),
            (Self::Text, _) => Err(DomainError::invalid_field(field, "expected non-empty text")),

            (Self::OptionalText, Value::Null) => Ok(FieldValue::Text(None)),
            (Self::OptionalText, Value::String(s)) => Ok(FieldValue::text(s.clone())),
            (Self::OptionalText, _) => Err(DomainError::invalid_field(field, "expected text")),

            (Self::OptionalCount, Value::Null) => Ok(FieldValue::Integer(None)),
            (Self::OptionalCount, Value::Number(n)) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .filter(|n| *n >= 0)
                .map(FieldValue::integer)
                .ok_or_else(|| DomainError::invalid_field(field, "expected a non-negative integer")),
            (Self::OptionalCount, _) => {
                Err(DomainError::invalid_field(field, "expected a non-negative integer"))
            }

            (Self::OptionalEquity, Value::Null) => Ok(FieldValue::Decimal(None)),
            (Self::OptionalEquity, Value::Number(_) | Value::String(_)) => {
                let raw = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let decimal = Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .map_err(|_| DomainError::invalid_field(field, "expected a decimal"))?;
                let equity = Equity::new(decimal)?;
                Ok(FieldValue::decimal(equity.as_decimal()))
            }
            (Self::OptionalEquity, _) => Err(DomainError::invalid_field(field, "expected a decimal")),
        }
    }
}
