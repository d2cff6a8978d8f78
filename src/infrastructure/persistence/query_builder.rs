//! Parameterized SQL fragments built from caller-supplied field/value pairs.
//!
//! Both builders are pure: they only render placeholders (`$1`, `$2`, ...)
//! and return the values to bind in the same order. Column identifiers come
//! from static tables, never from the caller, and values are never spliced
//! into the SQL text.

use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::value_objects::{Criteria, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClauseError {
    #[error("No data")]
    NoData,

    #[error("Invalid search criteria: {0}")]
    UnknownField(String),

    #[error("Search criteria given more than once: {0}")]
    RepeatedField(String),

    #[error("{0}")]
    InconsistentRange(&'static str),

    #[error("Invalid value for {field}: expected {expected}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },
}

impl From<ClauseError> for RepositoryError {
    fn from(err: ClauseError) -> Self {
        RepositoryError::InvalidInput(err.to_string())
    }
}

/// Rendered `SET` list of a partial update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateClause {
    pub assignments: String,
    pub values: Vec<FieldValue>,
}

impl UpdateClause {
    /// Placeholder index for the first parameter appended after the SET list
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Rendered `WHERE` predicate of a search
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub predicates: String,
    pub values: Vec<FieldValue>,
}

/// External field name to column name; names missing from the table map to
/// themselves.
pub type ColumnMap = [(&'static str, &'static str)];

pub const COMPANY_COLUMNS: &ColumnMap = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

pub const JOB_COLUMNS: &ColumnMap = &[];

fn column_for<'a>(field: &'a str, column_map: &ColumnMap) -> &'a str {
    column_map
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, column)| *column)
        .unwrap_or(field)
}

/// Render `"col1"=$1, "col2"=$2, ...` for the given fields, in order.
///
/// Fails only when `data` is empty.
pub fn build_update_clause<K: AsRef<str>>(
    data: &[(K, FieldValue)],
    column_map: &ColumnMap,
) -> Result<UpdateClause, ClauseError> {
    if data.is_empty() {
        return Err(ClauseError::NoData);
    }

    let assignments = data
        .iter()
        .enumerate()
        .map(|(idx, (field, _))| format!("\"{}\"=${}", column_for(field.as_ref(), column_map), idx + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let values = data.iter().map(|(_, value)| value.clone()).collect();

    Ok(UpdateClause {
        assignments,
        values,
    })
}

/// How a recognized filter is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match on the textual value
    Contains,
    /// Integer lower bound, inclusive
    AtLeast,
    /// Integer upper bound, inclusive
    AtMost,
    /// Boolean switch on a nullable numeric column: `true` keeps rows above
    /// zero, `false` keeps rows that are zero or null. Binds zero.
    PositiveWhen,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterRule {
    pub name: &'static str,
    pub column: &'static str,
    pub predicate: Predicate,
}

/// Two integer filters that must satisfy `min <= max` when both are given
#[derive(Debug, Clone, Copy)]
pub struct RangeRule {
    pub min: &'static str,
    pub max: &'static str,
    pub message: &'static str,
}

/// Allow-list of the filters one resource accepts
#[derive(Debug, Clone, Copy)]
pub struct FilterSet {
    pub rules: &'static [FilterRule],
    pub ranges: &'static [RangeRule],
}

impl FilterSet {
    fn rule(&self, name: &str) -> Option<&FilterRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

pub const COMPANY_FILTERS: FilterSet = FilterSet {
    rules: &[
        FilterRule {
            name: "nameLike",
            column: "name",
            predicate: Predicate::Contains,
        },
        FilterRule {
            name: "minEmployees",
            column: "num_employees",
            predicate: Predicate::AtLeast,
        },
        FilterRule {
            name: "maxEmployees",
            column: "num_employees",
            predicate: Predicate::AtMost,
        },
    ],
    ranges: &[RangeRule {
        min: "minEmployees",
        max: "maxEmployees",
        message: "minEmployees cannot be greater than maxEmployees",
    }],
};

pub const JOB_FILTERS: FilterSet = FilterSet {
    rules: &[
        FilterRule {
            name: "title",
            column: "title",
            predicate: Predicate::Contains,
        },
        FilterRule {
            name: "minSalary",
            column: "salary",
            predicate: Predicate::AtLeast,
        },
        FilterRule {
            name: "hasEquity",
            column: "equity",
            predicate: Predicate::PositiveWhen,
        },
    ],
    ranges: &[],
};

fn check_repeats(criteria: &Criteria) -> Result<(), ClauseError> {
    let entries = criteria.entries();
    for (idx, (key, _)) in entries.iter().enumerate() {
        if entries[..idx].iter().any(|(seen, _)| seen == key) {
            return Err(ClauseError::RepeatedField(key.clone()));
        }
    }
    Ok(())
}

fn check_ranges(criteria: &Criteria, filters: &FilterSet) -> Result<(), ClauseError> {
    let integer = |name: &str| {
        criteria
            .entries()
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.read_integer())
    };

    for range in filters.ranges {
        if let (Some(min), Some(max)) = (integer(range.min), integer(range.max)) {
            if min > max {
                return Err(ClauseError::InconsistentRange(range.message));
            }
        }
    }
    Ok(())
}

fn render(
    rule: &FilterRule,
    value: &FieldValue,
    placeholder: usize,
) -> Result<(String, FieldValue), ClauseError> {
    let invalid = |expected| ClauseError::InvalidValue {
        field: rule.name.to_string(),
        expected,
    };
    let column = rule.column;

    match rule.predicate {
        Predicate::Contains => {
            let text = value.to_text().ok_or_else(|| invalid("text"))?;
            Ok((
                format!("{column} ILIKE '%' || ${placeholder} || '%'"),
                FieldValue::text(text),
            ))
        }
        Predicate::AtLeast => {
            let n = value.read_integer().ok_or_else(|| invalid("an integer"))?;
            Ok((format!("{column} >= ${placeholder}"), FieldValue::integer(n)))
        }
        Predicate::AtMost => {
            let n = value.read_integer().ok_or_else(|| invalid("an integer"))?;
            Ok((format!("{column} <= ${placeholder}"), FieldValue::integer(n)))
        }
        Predicate::PositiveWhen => {
            let flag = value.read_boolean().ok_or_else(|| invalid("true or false"))?;
            let sql = if flag {
                format!("{column} > ${placeholder}")
            } else {
                format!("COALESCE({column}, 0) = ${placeholder}")
            };
            Ok((sql, FieldValue::decimal(Decimal::ZERO)))
        }
    }
}

/// Render the `WHERE` predicate for `criteria` against a filter allow-list.
///
/// A key given twice and broken range rules are rejected first. Keys are
/// then rendered in order, one placeholder each, and the first unrecognized
/// key aborts the build. Text values, as parsed from a query string, are read
/// as the type each predicate needs; `Contains` binds them unchanged.
pub fn build_filter_clause(
    criteria: &Criteria,
    filters: &FilterSet,
) -> Result<FilterClause, ClauseError> {
    if criteria.is_empty() {
        return Err(ClauseError::NoData);
    }

    check_repeats(criteria)?;
    check_ranges(criteria, filters)?;

    let mut predicates = Vec::with_capacity(criteria.len());
    let mut values = Vec::with_capacity(criteria.len());
    for (idx, (key, value)) in criteria.entries().iter().enumerate() {
        let rule = filters
            .rule(key)
            .ok_or_else(|| ClauseError::UnknownField(key.clone()))?;
        let (predicate, bound) = render(rule, value, idx + 1)?;
        predicates.push(predicate);
        values.push(bound);
    }

    Ok(FilterClause {
        predicates: predicates.join(" AND "),
        values,
    })
}

/// Bind values positionally, keeping each value's SQL type even when null
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [FieldValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            FieldValue::Text(v) => query.bind(v.as_deref()),
            FieldValue::Integer(v) => query.bind(*v),
            FieldValue::Decimal(v) => query.bind(*v),
            FieldValue::Boolean(v) => query.bind(*v),
        };
    }
    query
}
