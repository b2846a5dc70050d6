use crate::error::{ScopeError, ScopeResult};
use serde_json::{Map, Value};

/// Represents different types of SQL conditions
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple {
        field: String,
        operator: String,
        value: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    NotIn {
        field: String,
        values: Vec<Value>,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    Exists {
        subquery: String,
    },
    Raw {
        sql: String,
    },
}

impl Condition {
    /// Convert condition to SQL string
    pub fn to_sql(&self) -> String {
        match self {
            Condition::Simple {
                field,
                operator,
                value,
            } => {
                format!("{} {} {}", field, operator, format_value(value))
            }
            Condition::In { field, values } => {
                format!("{field} IN ({})", format_list(values))
            }
            Condition::NotIn { field, values } => {
                format!("{field} NOT IN ({})", format_list(values))
            }
            Condition::IsNull { field } => format!("{field} IS NULL"),
            Condition::IsNotNull { field } => format!("{field} IS NOT NULL"),
            Condition::Exists { subquery } => format!("EXISTS ({subquery})"),
            Condition::Raw { sql } => sql.clone(),
        }
    }

    /// Field constrained by a plain equality, if this is one
    pub fn equality_field(&self) -> Option<&str> {
        match self {
            Condition::Simple {
                field, operator, ..
            } if operator == "=" => Some(field),
            _ => None,
        }
    }
}

/// Represents a WHERE clause that can contain multiple conditions
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl WhereClause {
    fn single(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
            operator: LogicalOperator::And,
        }
    }

    /// Create a simple WHERE clause with a single condition
    pub fn simple(field: &str, operator: &str, value: Value) -> Self {
        Self::single(Condition::Simple {
            field: field.to_string(),
            operator: operator.to_string(),
            value,
        })
    }

    /// Equality clause, with `NULL` mapped to `IS NULL` and arrays to `IN`
    pub fn eq(field: &str, value: Value) -> Self {
        match value {
            Value::Null => Self::is_null(field),
            Value::Array(values) => Self::in_condition(field, values),
            other => Self::simple(field, "=", other),
        }
    }

    /// Create WHERE IN clause
    pub fn in_condition(field: &str, values: Vec<Value>) -> Self {
        Self::single(Condition::In {
            field: field.to_string(),
            values,
        })
    }

    /// Create WHERE NOT IN clause
    pub fn not_in_condition(field: &str, values: Vec<Value>) -> Self {
        Self::single(Condition::NotIn {
            field: field.to_string(),
            values,
        })
    }

    /// Create WHERE EXISTS clause
    pub fn exists(subquery: &str) -> Self {
        Self::single(Condition::Exists {
            subquery: subquery.to_string(),
        })
    }

    /// Create WHERE IS NULL clause
    pub fn is_null(field: &str) -> Self {
        Self::single(Condition::IsNull {
            field: field.to_string(),
        })
    }

    /// Create WHERE IS NOT NULL clause
    pub fn is_not_null(field: &str) -> Self {
        Self::single(Condition::IsNotNull {
            field: field.to_string(),
        })
    }

    /// Create raw SQL condition
    pub fn raw(sql: &str) -> Self {
        Self::single(Condition::Raw {
            sql: sql.to_string(),
        })
    }

    /// Raw SQL with `?` placeholders replaced, in order, by quoted bind values.
    /// A `?` inside a single-quoted literal is text, not a placeholder.
    pub fn sanitized(sql: &str, binds: &[Value]) -> ScopeResult<Self> {
        let placeholders = placeholder_positions(sql);
        if placeholders.len() != binds.len() {
            return Err(ScopeError::invalid_finder_option(
                "conditions",
                format!(
                    "wrong number of bind variables ({} for {}) in: {}",
                    binds.len(),
                    placeholders.len(),
                    sql
                ),
            ));
        }

        let mut out = String::with_capacity(sql.len());
        let mut rest = 0;
        for (position, value) in placeholders.into_iter().zip(binds) {
            out.push_str(&sql[rest..position]);
            out.push_str(&format_bind(value));
            rest = position + 1;
        }
        out.push_str(&sql[rest..]);
        Ok(Self::raw(&out))
    }

    /// One equality clause per attribute, in key order
    pub fn from_attributes(attributes: &Map<String, Value>) -> Vec<Self> {
        attributes
            .iter()
            .map(|(field, value)| Self::eq(field, value.clone()))
            .collect()
    }

    /// Combine multiple conditions with AND
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    /// Field this clause pins with a single equality condition
    pub fn equality_field(&self) -> Option<&str> {
        match self.conditions.as_slice() {
            [only] => only.equality_field(),
            _ => None,
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            return "1=1".to_string();
        }

        if self.conditions.len() == 1 {
            return self.conditions[0].to_sql();
        }

        let operator_str = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        let condition_sqls: Vec<String> = self.conditions.iter().map(|c| c.to_sql()).collect();

        format!("({})", condition_sqls.join(operator_str))
    }
}

fn format_list(values: &[Value]) -> String {
    values
        .iter()
        .map(format_value)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Byte offsets of `?` outside single-quoted literals (`''` escapes toggle twice)
fn placeholder_positions(sql: &str) -> Vec<usize> {
    let mut quoted = false;
    sql.char_indices()
        .filter_map(|(index, ch)| match ch {
            '\'' => {
                quoted = !quoted;
                None
            }
            '?' if !quoted => Some(index),
            _ => None,
        })
        .collect()
}

/// Arrays bind as comma lists so `IN (?)` works
fn format_bind(value: &Value) -> String {
    match value {
        Value::Array(values) if values.is_empty() => "NULL".to_string(),
        Value::Array(values) => format_list(values),
        other => format_value(other),
    }
}

/// Format a JSON value for SQL
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        _ => format!("'{}'", value.to_string().replace('\'', "''")),
    }
}
