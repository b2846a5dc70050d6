use super::{FinderOptions, Join, Pagination, WhereClause};
use crate::error::{ScopeError, ScopeResult};
use crate::scopes::{ExtensionModule, ExtensionOutput, ScopeArgs};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

/// An unexecuted query over one table.
///
/// Builder methods consume `self` and return the refined relation; callers that need to
/// keep the original clone it first. Nothing here touches the database: a relation is
/// only evaluated through the `fetch_*` adapters (feature `postgres`).
#[derive(Debug, Clone)]
pub struct Relation {
    table: String,
    from: Option<String>,
    select_fields: Vec<String>,
    joins: Vec<Join>,
    where_clauses: Vec<WhereClause>,
    group_by: Vec<String>,
    having: Vec<WhereClause>,
    order_by: Vec<String>,
    pagination: Pagination,
    readonly: Option<bool>,
    lock: Option<bool>,
    includes: Vec<String>,
    default_scoped: bool,
    extensions: Vec<Arc<ExtensionModule>>,
}

impl Relation {
    /// Create a new relation for the given table
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            from: None,
            select_fields: Vec::new(),
            joins: Vec::new(),
            where_clauses: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            pagination: Pagination::default(),
            readonly: None,
            lock: None,
            includes: Vec::new(),
            default_scoped: false,
            extensions: Vec::new(),
        }
    }

    /// Mark this relation as originating from the entity's implicit default scope
    pub fn default_scoped(mut self) -> Self {
        self.default_scoped = true;
        self
    }

    /// Set specific fields to select
    pub fn select(mut self, fields: &[&str]) -> Self {
        for field in fields {
            push_unique(&mut self.select_fields, field.to_string());
        }
        self
    }

    /// Replace the FROM source (table name, alias, or subquery)
    pub fn from(mut self, source: &str) -> Self {
        self.from = Some(source.to_string());
        self
    }

    /// Add a JOIN clause; identical joins are kept once
    pub fn join(mut self, join: Join) -> Self {
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
        self
    }

    pub fn inner_join(self, table: &str, on_condition: &str) -> Self {
        self.join(Join::inner(table, on_condition))
    }

    pub fn left_join(self, table: &str, on_condition: &str) -> Self {
        self.join(Join::left(table, on_condition))
    }

    /// Add a WHERE clause; an identical clause already present is not repeated
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        if !self.where_clauses.contains(&clause) {
            self.where_clauses.push(clause);
        }
        self
    }

    /// Equality filter (`NULL` becomes `IS NULL`, arrays become `IN`)
    pub fn where_eq(self, field: &str, value: Value) -> Self {
        self.where_clause(WhereClause::eq(field, value))
    }

    pub fn where_in(self, field: &str, values: Vec<Value>) -> Self {
        self.where_clause(WhereClause::in_condition(field, values))
    }

    pub fn where_not_in(self, field: &str, values: Vec<Value>) -> Self {
        self.where_clause(WhereClause::not_in_condition(field, values))
    }

    pub fn where_raw(self, sql: &str) -> Self {
        self.where_clause(WhereClause::raw(sql))
    }

    pub fn where_exists(self, subquery: &str) -> Self {
        self.where_clause(WhereClause::exists(subquery))
    }

    pub fn where_null(self, field: &str) -> Self {
        self.where_clause(WhereClause::is_null(field))
    }

    pub fn where_not_null(self, field: &str) -> Self {
        self.where_clause(WhereClause::is_not_null(field))
    }

    /// `field > since`, rendered as an RFC 3339 literal
    pub fn where_after(self, field: &str, since: DateTime<Utc>) -> Self {
        self.where_clause(WhereClause::simple(
            field,
            ">",
            Value::String(since.to_rfc3339()),
        ))
    }

    pub fn where_before(self, field: &str, until: DateTime<Utc>) -> Self {
        self.where_clause(WhereClause::simple(
            field,
            "<",
            Value::String(until.to_rfc3339()),
        ))
    }

    pub fn group_by(mut self, fields: &[&str]) -> Self {
        for field in fields {
            push_unique(&mut self.group_by, field.to_string());
        }
        self
    }

    /// Add a HAVING clause; an identical clause already present is not repeated
    pub fn having_clause(mut self, clause: WhereClause) -> Self {
        if !self.having.contains(&clause) {
            self.having.push(clause);
        }
        self
    }

    pub fn order_by(mut self, field: &str, direction: &str) -> Self {
        push_unique(&mut self.order_by, format!("{field} {direction}"));
        self
    }

    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, "ASC")
    }

    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, "DESC")
    }

    /// Append a verbatim ORDER BY fragment unless it is already present
    pub fn order_raw(mut self, fragment: &str) -> Self {
        push_unique(&mut self.order_by, fragment.trim().to_string());
        self
    }

    /// Drop existing ordering and order by `fragment` instead
    pub fn reorder(mut self, fragment: &str) -> Self {
        self.order_by.clear();
        self.order_raw(fragment)
    }

    pub fn paginate(mut self, page: u32, per_page: u32) -> Self {
        self.pagination = Pagination::new(page, per_page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.pagination.offset = Some(offset);
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = Some(readonly);
        self
    }

    /// `SELECT ... FOR UPDATE` when true
    pub fn lock(mut self, lock: bool) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Associations to preload; carried for the execution layer, no SQL effect
    pub fn includes(mut self, associations: &[&str]) -> Self {
        for association in associations {
            push_unique(&mut self.includes, association.to_string());
        }
        self
    }

    /// Attach extension members to this relation instance
    pub fn extending(mut self, extension: Arc<ExtensionModule>) -> Self {
        if !self
            .extensions
            .iter()
            .any(|existing| existing.name() == extension.name())
        {
            self.extensions.push(extension);
        }
        self
    }

    /// Combine `other`'s criteria into a copy of `self`.
    ///
    /// Filters accumulate, except that a single-column equality on a field that `other`
    /// also pins by equality is replaced by `other`'s. Joins, selects, groups, includes and
    /// extensions union; orders and havings append entries not already present; limit, offset, from, readonly and lock
    /// take `other`'s value when it has one. The default-scoped marker stays with `self`.
    pub fn merge(&self, other: &Relation) -> Relation {
        let mut merged = self.clone();

        if other.from.is_some() {
            merged.from = other.from.clone();
        }

        for field in &other.select_fields {
            push_unique(&mut merged.select_fields, field.clone());
        }

        for join in &other.joins {
            if !merged.joins.contains(join) {
                merged.joins.push(join.clone());
            }
        }

        let overridden: Vec<&str> = other
            .where_clauses
            .iter()
            .filter_map(WhereClause::equality_field)
            .collect();
        merged.where_clauses.retain(|clause| {
            clause
                .equality_field()
                .map_or(true, |field| !overridden.contains(&field))
        });
        for clause in &other.where_clauses {
            if !merged.where_clauses.contains(clause) {
                merged.where_clauses.push(clause.clone());
            }
        }

        for field in &other.group_by {
            push_unique(&mut merged.group_by, field.clone());
        }
        for clause in &other.having {
            if !merged.having.contains(clause) {
                merged.having.push(clause.clone());
            }
        }
        for fragment in &other.order_by {
            push_unique(&mut merged.order_by, fragment.clone());
        }
        merged.pagination = merged.pagination.overridden_by(other.pagination);
        merged.readonly = other.readonly.or(merged.readonly);
        merged.lock = other.lock.or(merged.lock);

        for association in &other.includes {
            push_unique(&mut merged.includes, association.clone());
        }
        for extension in &other.extensions {
            merged = merged.extending(Arc::clone(extension));
        }

        merged
    }

    /// Translate a legacy options mapping into clauses on a copy of `self`
    pub fn apply_finder_options(&self, options: &FinderOptions) -> ScopeResult<Relation> {
        let mut relation = self.clone();

        for clause in options.where_clauses()? {
            relation = relation.where_clause(clause);
        }
        for join in options.join_clauses() {
            relation = relation.join(join);
        }
        if let Some(select) = &options.select {
            for field in select.values() {
                push_unique(&mut relation.select_fields, field);
            }
        }
        if let Some(from) = &options.from {
            relation = relation.from(from);
        }
        if let Some(group) = &options.group {
            for field in group.values() {
                push_unique(&mut relation.group_by, field);
            }
        }
        if let Some(having) = &options.having {
            relation = relation.having_clause(WhereClause::raw(having));
        }
        if let Some(order) = &options.order {
            for fragment in order.values() {
                relation = relation.order_raw(&fragment);
            }
        }
        if let Some(limit) = options.limit {
            relation = relation.limit(limit);
        }
        if let Some(offset) = options.offset {
            relation = relation.offset(offset);
        }
        if let Some(readonly) = options.readonly {
            relation = relation.readonly(readonly);
        }
        if let Some(lock) = options.lock {
            relation = relation.lock(lock);
        }
        if let Some(include) = &options.include {
            for association in include.values() {
                push_unique(&mut relation.includes, association);
            }
        }

        Ok(relation)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn is_default_scoped(&self) -> bool {
        self.default_scoped
    }

    pub fn where_clauses(&self) -> &[WhereClause] {
        &self.where_clauses
    }

    /// Rendered WHERE fragments, in application order
    pub fn where_sql(&self) -> Vec<String> {
        self.where_clauses.iter().map(WhereClause::to_sql).collect()
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn order_values(&self) -> &[String] {
        &self.order_by
    }

    pub fn limit_value(&self) -> Option<u32> {
        self.pagination.limit
    }

    pub fn offset_value(&self) -> Option<u32> {
        self.pagination.offset
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly.unwrap_or(false)
    }

    pub fn is_locked(&self) -> bool {
        self.lock.unwrap_or(false)
    }

    pub fn includes_values(&self) -> &[String] {
        &self.includes
    }

    pub fn extension_names(&self) -> Vec<&str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    /// Whether an attached extension exposes `method`
    pub fn responds_to(&self, method: &str) -> bool {
        self.extensions.iter().any(|e| e.has_method(method))
    }

    /// Call an extension member; the most recently attached extension wins
    pub fn call_extension(&self, method: &str, args: &ScopeArgs) -> ScopeResult<ExtensionOutput> {
        let found = self
            .extensions
            .iter()
            .rev()
            .find_map(|extension| extension.lookup(method));

        match found {
            Some(member) => member(self, args),
            None => Err(ScopeError::UndefinedMethod {
                method: method.to_string(),
                table: self.table.clone(),
                available: self
                    .extensions
                    .iter()
                    .flat_map(|e| e.method_names())
                    .map(str::to_string)
                    .collect(),
            }),
        }
    }

    /// Build the complete SQL query string
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.select_fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select_fields.join(", "));
        }

        sql.push_str(" FROM ");
        sql.push_str(self.from.as_deref().unwrap_or(&self.table));

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_sql().join(" AND "));
        }

        if !self.group_by.is_empty() {
            sql.push_str(&format!(" GROUP BY {}", self.group_by.join(", ")));
        }

        if !self.having.is_empty() {
            let having_parts: Vec<String> = self.having.iter().map(WhereClause::to_sql).collect();
            sql.push_str(&format!(" HAVING {}", having_parts.join(" AND ")));
        }

        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        sql.push_str(&self.pagination.to_sql());

        if self.is_locked() {
            sql.push_str(" FOR UPDATE");
        }

        sql
    }

    /// COUNT(*) over the same filters, without ordering or pagination
    pub fn to_count_sql(&self) -> String {
        let mut counting = self.clone();
        counting.select_fields = vec!["COUNT(*)".to_string()];
        counting.order_by.clear();
        counting.pagination = Pagination::default();
        counting.lock = None;
        counting.to_sql()
    }
}

/// Criteria equality: every clause plus attached extension names
impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
            && self.from == other.from
            && self.select_fields == other.select_fields
            && self.joins == other.joins
            && self.where_clauses == other.where_clauses
            && self.group_by == other.group_by
            && self.having == other.having
            && self.order_by == other.order_by
            && self.pagination == other.pagination
            && self.readonly == other.readonly
            && self.lock == other.lock
            && self.includes == other.includes
            && self.default_scoped == other.default_scoped
            && self.extension_names() == other.extension_names()
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

#[cfg(feature = "postgres")]
mod execution {
    use super::Relation;
    use sqlx::{PgPool, Row};

    impl Relation {
        /// Execute the query and return all rows
        pub async fn fetch_all<T>(&self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
        where
            T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
        {
            let sql = self.to_sql();
            tracing::debug!(table = %self.table(), sql = %sql, "Executing relation");
            sqlx::query_as::<_, T>(&sql).fetch_all(pool).await
        }

        /// Execute the query and return the first row, if any
        pub async fn fetch_optional<T>(&self, pool: &PgPool) -> Result<Option<T>, sqlx::Error>
        where
            T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
        {
            let sql = self.clone().limit(1).to_sql();
            sqlx::query_as::<_, T>(&sql).fetch_optional(pool).await
        }

        pub async fn count(&self, pool: &PgPool) -> Result<i64, sqlx::Error> {
            let row = sqlx::query(&self.to_count_sql()).fetch_one(pool).await?;
            Ok(row.get::<i64, _>(0))
        }

        pub async fn exists(&self, pool: &PgPool) -> Result<bool, sqlx::Error> {
            Ok(self.count(pool).await? > 0)
        }
    }
}
