//! Leaf-account resolution.
//!
//! Reports run against leaf accounts: non-manager, enabled customers at
//! the bottom of an MCC hierarchy. Two resolvers produce the same
//! leaf-to-root mapping:
//!
//! - [`expand_account_map`]: the legacy resolver over an explicit account
//!   tree. Nodes with children are traversed depth-first in child order;
//!   nodes without children, or marked `expand`, are expanded by querying
//!   the API for their leaves.
//! - [`expand_customer_ids`]: the direct resolver, which queries every
//!   configured top-level customer ID.
//!
//! When the same leaf recurs under a different root, the later root wins.
//! Only one root path per leaf is needed, so the overwrite is intentional.

use std::collections::BTreeMap;

use async_recursion::async_recursion;
use futures::{pin_mut, TryStreamExt};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::{ApiResult, GoogleAdsClient};
use crate::query::Query;
use crate::rows::path_string;

/// A node in a configured account hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNode {
    /// The customer ID of this account.
    pub customer_id: String,

    /// Expand this node via a leaf-accounts query even if it has explicit
    /// children.
    #[serde(default)]
    pub expand: bool,

    /// Explicitly configured child accounts.
    #[serde(default)]
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    /// A node with no children and no expansion marker.
    pub fn leaf(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            expand: false,
            children: Vec::new(),
        }
    }

    /// A node to be expanded via the leaf-accounts query.
    pub fn expandable(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            expand: true,
            children: Vec::new(),
        }
    }
}

/// The query that lists leaf accounts under a customer.
pub fn leaf_accounts_query() -> Query {
    Query::build("customer_client")
        .field("customer_client.id")
        .filter("customer_client.manager = false")
        .filter("customer_client.status = 'ENABLED'")
        .finish()
        .expect("leaf accounts query is statically valid")
}

/// Expand a configured account tree into a leaf-to-root map.
///
/// Each leaf maps back to the top-level root it was reached from.
pub async fn expand_account_map(
    client: &GoogleAdsClient,
    roots: &[AccountNode],
) -> ApiResult<BTreeMap<String, String>> {
    let mut leaves = BTreeMap::new();
    for root in roots {
        collect_leaves(client, root, &root.customer_id, &mut leaves).await?;
    }
    debug!("account map expanded to {} leaf accounts", leaves.len());
    Ok(leaves)
}

#[async_recursion]
async fn collect_leaves(
    client: &GoogleAdsClient,
    node: &AccountNode,
    root_id: &str,
    leaves: &mut BTreeMap<String, String>,
) -> ApiResult<()> {
    if !node.children.is_empty() && !node.expand {
        for child in &node.children {
            collect_leaves(client, child, root_id, leaves).await?;
        }
        return Ok(());
    }

    for leaf in query_leaves(client, &node.customer_id).await? {
        leaves.insert(leaf, root_id.to_string());
    }
    Ok(())
}

/// Expand top-level customer IDs directly, without a tree.
///
/// Used by the report factory: every configured ID is queried for its
/// leaves, and each leaf maps to the ID it came from.
pub async fn expand_customer_ids(
    client: &GoogleAdsClient,
    customer_ids: &[String],
) -> ApiResult<BTreeMap<String, String>> {
    let mut leaves = BTreeMap::new();
    for root in customer_ids {
        for leaf in query_leaves(client, root).await? {
            leaves.insert(leaf, root.clone());
        }
    }
    Ok(leaves)
}

/// Run the leaf-accounts query against one customer and collect the IDs.
///
/// Rows missing `customer_client.id` are skipped; the resolver tolerates
/// malformed rows the same way join-key extraction does.
async fn query_leaves(client: &GoogleAdsClient, customer_id: &str) -> ApiResult<Vec<String>> {
    let query = leaf_accounts_query();
    let stream = client.search(customer_id, &query, &[])?;
    pin_mut!(stream);

    let mut ids = Vec::new();
    while let Some(row) = stream.try_next().await? {
        if let Some(id) = path_string(&row, "customer_client.id") {
            ids.push(id);
        }
    }
    Ok(ids)
}
