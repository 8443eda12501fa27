//! Leaf-account expansion: direct IDs, account maps, and memoization.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use serde_json::json;

use common::{client_factory, page, MockTransport};
use launch_monitor::accounts::AccountNode;
use launch_monitor::query::Query;
use launch_monitor::report::{field, Record, ReportDefinition, ReportFactory};

const LEAF_AQL: &str = "SELECT customer_client.id FROM customer_client \
                        WHERE customer_client.manager = false \
                        AND customer_client.status = 'ENABLED'";

fn script_leaves(transport: &MockTransport, root: &str, leaves: &[&str]) {
    let rows = leaves
        .iter()
        .map(|id| json!({"customerClient": {"id": id}}))
        .collect();
    transport.script(root, LEAF_AQL, vec![page(rows, None)]);
}

fn customer_definition() -> ReportDefinition {
    let query = Query::build("customer")
        .field("customer.id")
        .finish()
        .unwrap();
    ReportDefinition::new(["id"], query, |row, _| {
        let id = field(row, "customer.id")?;
        let mut record = Record::new();
        record.insert("id".to_string(), id.clone());
        Ok((id, record))
    })
}

#[tokio::test]
async fn expandable_root_maps_leaves_back_to_it() {
    let transport = MockTransport::new();
    script_leaves(&transport, "9", &["91", "92"]);

    let factory = Arc::new(ReportFactory::with_account_map(
        client_factory(transport.clone()),
        "9",
        vec![AccountNode::expandable("9")],
    ));
    let map = factory.leaf_to_root().await.unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map["91"], "9");
    assert_eq!(map["92"], "9");
}

#[tokio::test]
async fn explicit_children_are_traversed_not_expanded() {
    let transport = MockTransport::new();
    // The root itself is never queried: its explicit children are.
    script_leaves(&transport, "21", &["211"]);
    script_leaves(&transport, "22", &["221", "222"]);

    let root = AccountNode {
        customer_id: "2".to_string(),
        expand: false,
        children: vec![AccountNode::leaf("21"), AccountNode::leaf("22")],
    };
    let factory = Arc::new(ReportFactory::with_account_map(
        client_factory(transport.clone()),
        "2",
        vec![root],
    ));
    let map = factory.leaf_to_root().await.unwrap();

    assert_eq!(map.len(), 3);
    // Every leaf maps to the top-level root, not the intermediate node.
    assert_eq!(map["211"], "2");
    assert_eq!(map["221"], "2");
    assert_eq!(map["222"], "2");

    let queried: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| r.body["customerId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(queried, vec!["21", "22"]);
}

#[tokio::test]
async fn duplicate_leaf_takes_the_later_root() {
    let transport = MockTransport::new();
    script_leaves(&transport, "5", &["50"]);
    script_leaves(&transport, "6", &["50", "60"]);

    let factory = Arc::new(ReportFactory::with_account_map(
        client_factory(transport.clone()),
        "1",
        vec![AccountNode::expandable("5"), AccountNode::expandable("6")],
    ));
    let map = factory.leaf_to_root().await.unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map["50"], "6");
    assert_eq!(map["60"], "6");
}

#[tokio::test]
async fn leaf_resolution_is_memoized_per_factory() {
    let transport = MockTransport::new();
    script_leaves(&transport, "9", &["91"]);

    let factory = Arc::new(ReportFactory::new(
        client_factory(transport.clone()),
        "9",
        "9",
    ));

    factory.leaf_accounts().await.unwrap();
    factory.leaf_accounts().await.unwrap();
    factory.leaf_to_root().await.unwrap();

    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn reports_run_against_every_resolved_leaf() {
    let transport = MockTransport::new();
    script_leaves(&transport, "9", &["91", "92"]);

    let aql = "SELECT customer.id FROM customer";
    transport.script("91", aql, vec![page(vec![json!({"customer": {"id": "91"}})], None)]);
    transport.script("92", aql, vec![page(vec![json!({"customer": {"id": "92"}})], None)]);

    let factory = Arc::new(ReportFactory::with_account_map(
        client_factory(transport.clone()),
        "9",
        vec![AccountNode::expandable("9")],
    ));
    let report = factory.create(&customer_definition()).await.unwrap();
    let output = report.fetch().await.unwrap();

    assert_eq!(output.len(), 2);
    assert!(output.contains_key("91"));
    assert!(output.contains_key("92"));
}

#[tokio::test]
async fn empty_expansion_falls_back_to_configured_ids() {
    let transport = MockTransport::new();
    script_leaves(&transport, "7", &[]);

    let aql = "SELECT customer.id FROM customer";
    transport.script("7", aql, vec![page(vec![json!({"customer": {"id": "7"}})], None)]);

    let factory = Arc::new(ReportFactory::new(
        client_factory(transport.clone()),
        "7",
        "7",
    ));
    let report = factory.create(&customer_definition()).await.unwrap();
    let output = report.fetch().await.unwrap();

    assert_eq!(output.len(), 1);
    assert!(output.contains_key("7"));
}
