//! Declarative report definitions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::error::{ReportError, ReportResult};
use crate::query::Query;
use crate::rows::{path_string, AdsRow};

/// One output record: output field name to string value.
pub type Record = BTreeMap<String, String>;

/// A fetched child report: extracted join key to child record.
pub type JoinRecords = BTreeMap<String, Record>;

/// All resolved joins handed to a transform: join path to child records.
pub type ResolvedJoins = HashMap<String, JoinRecords>;

type TransformFn = dyn Fn(&AdsRow, &ResolvedJoins) -> ReportResult<(String, Record)> + Send + Sync;

/// A pure, stateless report definition: output field names, the query to
/// run, and the transform that turns each raw row (plus resolved joins)
/// into a keyed output record.
///
/// Many [`Report`](super::Report) instances may be constructed from one
/// definition with different customer-ID scopes.
#[derive(Clone)]
pub struct ReportDefinition {
    output: Vec<String>,
    query: Query,
    transform: Arc<TransformFn>,
}

impl ReportDefinition {
    pub fn new<I, S, F>(output: I, query: Query, transform: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&AdsRow, &ResolvedJoins) -> ReportResult<(String, Record)> + Send + Sync + 'static,
    {
        Self {
            output: output.into_iter().map(Into::into).collect(),
            query,
            transform: Arc::new(transform),
        }
    }

    /// The output field names, in declaration order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// The report's query.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Apply the transform to one row.
    pub fn apply(&self, row: &AdsRow, joins: &ResolvedJoins) -> ReportResult<(String, Record)> {
        (self.transform)(row, joins)
    }
}

impl fmt::Debug for ReportDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportDefinition")
            .field("output", &self.output)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

/// Resolve a dotted path to a scalar, erring when absent.
///
/// Transform helper for required fields.
pub fn field(row: &AdsRow, path: &str) -> ReportResult<String> {
    path_string(row, path).ok_or_else(|| ReportError::MissingField(path.to_string()))
}

/// Look up a child record for an extracted join key, erring on a miss.
///
/// Transform helper for joins the report treats as required. Reports that
/// tolerate unmatched keys should consult the [`ResolvedJoins`] map
/// directly instead.
pub fn join_field<'a>(
    joins: &'a ResolvedJoins,
    join: &str,
    key: &str,
) -> ReportResult<&'a Record> {
    joins
        .get(join)
        .and_then(|records| records.get(key))
        .ok_or_else(|| ReportError::JoinMiss {
            join: join.to_string(),
            key: key.to_string(),
        })
}
