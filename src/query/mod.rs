//! Query builder - construct AQL report queries with a fluent API.
//!
//! A [`Query`] is a declarative description of a report request: the dotted
//! field paths to select, the source table, raw predicate strings, and
//! optional named joins to child report definitions. Joins are validated at
//! build time: every join key must be one of the declared field paths (or a
//! parent path of one), so a misdeclared join fails fast instead of silently
//! producing empty matches at fetch time.
//!
//! Rendering to the wire format is pure string templating (`SELECT … FROM …
//! [WHERE …]`); callers are responsible for producing safe predicate
//! fragments.

use std::collections::BTreeMap;

use crate::report::ReportDefinition;

/// Error type for query construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("query selects no fields")]
    NoFields,

    #[error("duplicate field path: {0}")]
    DuplicateField(String),

    #[error("join key '{0}' does not match any selected field path")]
    JoinKeyNotSelected(String),
}

/// A declarative report query.
///
/// Immutable once built; construct via [`Query::build`].
#[derive(Debug, Clone)]
pub struct Query {
    params: Vec<String>,
    from: String,
    wheres: Vec<String>,
    joins: BTreeMap<String, ReportDefinition>,
}

impl Query {
    /// Start building a query against the given source table.
    pub fn build(from: &str) -> QueryBuilder {
        QueryBuilder {
            params: Vec::new(),
            from: from.into(),
            wheres: Vec::new(),
            joins: BTreeMap::new(),
        }
    }

    /// The selected field paths, in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The source table name.
    pub fn from_table(&self) -> &str {
        &self.from
    }

    /// The declared predicate strings.
    pub fn wheres(&self) -> &[String] {
        &self.wheres
    }

    /// Declared joins: field path to child report definition.
    pub fn joins(&self) -> &BTreeMap<String, ReportDefinition> {
        &self.joins
    }

    /// Render a `{path} IN ({values})` predicate.
    ///
    /// All membership filters (join prefetch included) go through here so
    /// predicate synthesis lives in one place.
    pub fn one_of(path: &str, values: &[String]) -> String {
        format!("{} IN ({})", path, values.join(","))
    }

    /// Render the query to an AQL string, appending `extra_wheres` to the
    /// declared predicates.
    ///
    /// Produces `SELECT {params} FROM {table}`, plus a ` WHERE` clause with
    /// all predicates joined by ` AND ` when any exist.
    pub fn qlify(&self, extra_wheres: &[String]) -> String {
        let select = self.params.join(", ");
        let mut aql = format!("SELECT {} FROM {}", select, self.from);

        let combined: Vec<&str> = self
            .wheres
            .iter()
            .chain(extra_wheres.iter())
            .map(String::as_str)
            .collect();
        if !combined.is_empty() {
            aql.push_str(" WHERE ");
            aql.push_str(&combined.join(" AND "));
        }
        aql
    }
}

/// Fluent builder for [`Query`].
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until used"]
pub struct QueryBuilder {
    params: Vec<String>,
    from: String,
    wheres: Vec<String>,
    joins: BTreeMap<String, ReportDefinition>,
}

impl QueryBuilder {
    /// Select a dotted field path (e.g. `campaign.id`).
    pub fn field(mut self, path: &str) -> Self {
        self.params.push(path.into());
        self
    }

    /// Select several field paths at once.
    pub fn fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add a raw predicate string (rendered verbatim into the WHERE clause).
    pub fn filter(mut self, clause: &str) -> Self {
        self.wheres.push(clause.into());
        self
    }

    /// Declare a join from a selected field path to a child report.
    pub fn join(mut self, path: &str, definition: ReportDefinition) -> Self {
        self.joins.insert(path.into(), definition);
        self
    }

    /// Validate and finish the query.
    ///
    /// # Errors
    ///
    /// Fails on an empty select list, a duplicated field path, or a join
    /// key that is neither a selected path nor a parent path of one.
    pub fn finish(self) -> Result<Query, QueryError> {
        if self.params.is_empty() {
            return Err(QueryError::NoFields);
        }

        for (i, param) in self.params.iter().enumerate() {
            if self.params[..i].contains(param) {
                return Err(QueryError::DuplicateField(param.clone()));
            }
        }

        for key in self.joins.keys() {
            let prefix = format!("{key}.");
            let matches = self
                .params
                .iter()
                .any(|p| p == key || p.starts_with(&prefix));
            if !matches {
                return Err(QueryError::JoinKeyNotSelected(key.clone()));
            }
        }

        Ok(Query {
            params: self.params,
            from: self.from,
            wheres: self.wheres,
            joins: self.joins,
        })
    }
}
