/// Represents different types of SQL JOINs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Cross,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

/// A JOIN clause, either structured or a verbatim SQL fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Join {
    Table {
        join_type: JoinType,
        table: String,
        on_condition: Option<String>,
    },
    Raw(String),
}

impl Join {
    /// Create an INNER JOIN
    pub fn inner(table: &str, on_condition: &str) -> Self {
        Self::with_type(JoinType::Inner, table, on_condition)
    }

    /// Create a LEFT JOIN
    pub fn left(table: &str, on_condition: &str) -> Self {
        Self::with_type(JoinType::Left, table, on_condition)
    }

    /// Create a CROSS JOIN
    pub fn cross(table: &str) -> Self {
        Self::Table {
            join_type: JoinType::Cross,
            table: table.to_string(),
            on_condition: None,
        }
    }

    /// Verbatim join fragment, e.g. from legacy `joins:` finder options
    pub fn raw(sql: &str) -> Self {
        Self::Raw(sql.trim().to_string())
    }

    fn with_type(join_type: JoinType, table: &str, on_condition: &str) -> Self {
        Self::Table {
            join_type,
            table: table.to_string(),
            on_condition: Some(on_condition.to_string()),
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        match self {
            Join::Table {
                join_type,
                table,
                on_condition: Some(condition),
            } => format!("{} {} ON {}", join_type.to_sql(), table, condition),
            Join::Table {
                join_type,
                table,
                on_condition: None,
            } => format!("{} {}", join_type.to_sql(), table),
            Join::Raw(sql) => sql.clone(),
        }
    }
}
