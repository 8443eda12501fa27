//! Report factory: customer-ID scoping and leaf expansion.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::error::ReportResult;
use super::report::Report;
use super::ReportDefinition;
use crate::accounts::{expand_account_map, expand_customer_ids, AccountNode};
use crate::api::GoogleAdsClientFactory;

/// Where the factory's target accounts come from.
#[derive(Debug, Clone)]
enum AccountScope {
    /// Comma-joined top-level customer IDs, each expanded to its leaves.
    CustomerIds(String),
    /// An explicit account tree (legacy account-map configuration).
    AccountMap(Vec<AccountNode>),
}

/// Creates [`Report`] instances scoped to the resolved leaf accounts.
///
/// Leaf resolution runs once per factory and is memoized for the factory's
/// lifetime; there is no invalidation. A new factory re-resolves.
pub struct ReportFactory {
    clients: Arc<GoogleAdsClientFactory>,
    login_customer_id: String,
    scope: AccountScope,
    leaves: OnceCell<BTreeMap<String, String>>,
}

impl ReportFactory {
    /// A factory over comma-joined top-level customer IDs.
    pub fn new(
        clients: Arc<GoogleAdsClientFactory>,
        login_customer_id: impl Into<String>,
        customer_ids: impl Into<String>,
    ) -> Self {
        Self {
            clients,
            login_customer_id: login_customer_id.into(),
            scope: AccountScope::CustomerIds(customer_ids.into()),
            leaves: OnceCell::new(),
        }
    }

    /// A factory over an explicit account tree.
    pub fn with_account_map(
        clients: Arc<GoogleAdsClientFactory>,
        login_customer_id: impl Into<String>,
        roots: Vec<AccountNode>,
    ) -> Self {
        Self {
            clients,
            login_customer_id: login_customer_id.into(),
            scope: AccountScope::AccountMap(roots),
            leaves: OnceCell::new(),
        }
    }

    /// The login customer ID this factory authenticates as.
    pub fn login_customer_id(&self) -> &str {
        &self.login_customer_id
    }

    /// The memoized leaf-to-root mapping.
    ///
    /// The first call queries the API; subsequent calls return the cached
    /// map without re-querying.
    pub async fn leaf_to_root(&self) -> ReportResult<&BTreeMap<String, String>> {
        self.leaves
            .get_or_try_init(|| async {
                let client = self.clients.create(&self.login_customer_id);
                let map = match &self.scope {
                    AccountScope::CustomerIds(spec) => {
                        let roots = split_customer_ids(spec);
                        expand_customer_ids(&client, &roots).await?
                    }
                    AccountScope::AccountMap(roots) => {
                        expand_account_map(&client, roots).await?
                    }
                };
                Ok(map)
            })
            .await
    }

    /// The resolved leaf customer IDs, memoized.
    pub async fn leaf_accounts(&self) -> ReportResult<Vec<String>> {
        Ok(self.leaf_to_root().await?.keys().cloned().collect())
    }

    /// Build a report over the resolved leaf scope.
    ///
    /// When leaf resolution yields nothing, the report falls back to the
    /// configured top-level IDs.
    pub async fn create(
        self: &Arc<Self>,
        definition: &ReportDefinition,
    ) -> ReportResult<Report> {
        let leaves = self.leaf_accounts().await?;
        let customer_ids = if leaves.is_empty() {
            self.configured_customer_ids()
        } else {
            leaves.join(",")
        };

        Ok(Report::new(
            self.clients.create(&self.login_customer_id),
            customer_ids,
            definition.clone(),
            Arc::clone(self),
        ))
    }

    fn configured_customer_ids(&self) -> String {
        match &self.scope {
            AccountScope::CustomerIds(spec) => split_customer_ids(spec).join(","),
            AccountScope::AccountMap(roots) => roots
                .iter()
                .map(|node| node.customer_id.clone())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Split a comma-joined ID list, trimming whitespace and the sheet-list
/// `"- "` marker. Validation proper happens in the API client.
fn split_customer_ids(spec: &str) -> Vec<String> {
    spec.split(',')
        .map(|component| {
            let id = component.trim();
            id.strip_prefix("- ").unwrap_or(id).to_string()
        })
        .filter(|id| !id.is_empty())
        .collect()
}
