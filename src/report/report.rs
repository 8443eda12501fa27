//! Runtime reports and join resolution.
//!
//! [`Report::fetch`] runs the two-pass join algorithm:
//!
//! 1. Issue the primary query across all target customer IDs.
//! 2. Without joins, transform rows straight off the stream.
//! 3. With joins, materialize the primary rows once, extracting each
//!    declared join path's key from every row along the way.
//! 4. For each join, fetch the child report filtered to the observed key
//!    set (`{parent}.id IN (...)`), keyed by the child transform's key.
//! 5. Transform every materialized row with the resolved joins in hand.
//!
//! Output keys collide last-write-wins, in row-encounter order. Any
//! transform error or transport failure in any sub-fetch aborts the whole
//! call.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_recursion::async_recursion;
use futures::{pin_mut, TryStreamExt};
use log::debug;

use super::definition::{JoinRecords, Record, ReportDefinition, ResolvedJoins};
use super::error::ReportResult;
use super::factory::ReportFactory;
use crate::api::GoogleAdsClient;
use crate::query::Query;
use crate::rows::{path_string, AdsRow};

/// A report definition bound to an API client and a customer-ID scope.
///
/// Created per [`ReportFactory::create`] call and never cached: every
/// `fetch()` re-executes the full query and join resolution.
pub struct Report {
    client: Arc<GoogleAdsClient>,
    customer_ids: String,
    definition: ReportDefinition,
    factory: Arc<ReportFactory>,
}

impl Report {
    pub(crate) fn new(
        client: Arc<GoogleAdsClient>,
        customer_ids: String,
        definition: ReportDefinition,
        factory: Arc<ReportFactory>,
    ) -> Self {
        Self {
            client,
            customer_ids,
            definition,
            factory,
        }
    }

    /// The definition this report was built from.
    pub fn definition(&self) -> &ReportDefinition {
        &self.definition
    }

    /// The comma-joined customer-ID scope this report queries.
    pub fn customer_ids(&self) -> &str {
        &self.customer_ids
    }

    /// Fetch the report, producing a mapping from transform key to record.
    pub async fn fetch(&self) -> ReportResult<BTreeMap<String, Record>> {
        self.fetch_filtered(&[]).await
    }

    /// Fetch with additional WHERE clauses appended to the primary query.
    #[async_recursion]
    pub async fn fetch_filtered(
        &self,
        extra_wheres: &[String],
    ) -> ReportResult<BTreeMap<String, Record>> {
        let query = self.definition.query();
        let stream = self
            .client
            .search(&self.customer_ids, query, extra_wheres)?;

        if query.joins().is_empty() {
            pin_mut!(stream);
            let joins = ResolvedJoins::new();
            let mut out = BTreeMap::new();
            while let Some(row) = stream.try_next().await? {
                let (key, record) = self.definition.apply(&row, &joins)?;
                out.insert(key, record);
            }
            return Ok(out);
        }

        // Prefetch pass: materialize the primary rows and pull each join
        // path's key out of every row. Missing paths yield None and simply
        // never match.
        let rows: Vec<AdsRow> = stream.try_collect().await?;
        let mut extracted: HashMap<&str, Vec<Option<String>>> = HashMap::new();
        for path in query.joins().keys() {
            let keys = rows.iter().map(|row| path_string(row, path)).collect();
            extracted.insert(path.as_str(), keys);
        }
        debug!(
            "report on {}: {} rows, {} joins to resolve",
            query.from_table(),
            rows.len(),
            query.joins().len()
        );

        let mut resolved = ResolvedJoins::new();
        for (path, child_definition) in query.joins() {
            let keys = distinct_in_order(&extracted[path.as_str()]);
            let records = if keys.is_empty() {
                // Nothing extracted means nothing can match; skip the call.
                JoinRecords::new()
            } else {
                let filter = join_filter(child_definition, &keys);
                let child = self.factory.create(child_definition).await?;
                child.fetch_filtered(&[filter]).await?
            };
            resolved.insert(path.clone(), records);
        }

        let mut out = BTreeMap::new();
        for row in &rows {
            let (key, record) = self.definition.apply(row, &resolved)?;
            out.insert(key, record);
        }
        Ok(out)
    }
}

/// Distinct key values in order of first occurrence. Unresolved keys are
/// dropped; duplicates in the raw extraction are preserved upstream but
/// add nothing to the filter.
fn distinct_in_order(keys: &[Option<String>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for key in keys.iter().flatten() {
        if seen.insert(key.as_str()) {
            distinct.push(key.clone());
        }
    }
    distinct
}

/// Build the child-report filter clause for an observed key set.
///
/// The filter targets the common parent path shared by the child's
/// selected fields: the parent of its first declared param, suffixed
/// `.id`.
fn join_filter(child: &ReportDefinition, keys: &[String]) -> String {
    let first_param = &child.query().params()[0];
    let parent = match first_param.rsplit_once('.') {
        Some((parent, _)) => parent,
        None => first_param.as_str(),
    };
    Query::one_of(&format!("{parent}.id"), keys)
}
