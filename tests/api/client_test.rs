//! Client validation, pagination, and factory caching.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use futures::{pin_mut, TryStreamExt};
use serde_json::json;

use common::{client_factory, page, MockTransport};
use launch_monitor::api::{ApiError, GoogleAdsClient};
use launch_monitor::auth::CredentialManager;
use launch_monitor::config::ApiEndpoint;
use launch_monitor::query::Query;
use launch_monitor::rows::AdsRow;

fn simple_query() -> Query {
    Query::build("table").field("a.one").finish().unwrap()
}

#[tokio::test]
async fn paginates_until_token_absent() {
    let transport = MockTransport::new();
    transport.script(
        "123",
        "SELECT a.one FROM table",
        vec![
            page(
                vec![json!({"a": {"one": "r1"}}), json!({"a": {"one": "r2"}})],
                Some("pointer"),
            ),
            page(vec![json!({"a": {"one": "r3"}})], None),
        ],
    );

    let client = client_factory(transport.clone()).create("123");
    let stream = client.search("123", &simple_query(), &[]).unwrap();
    let rows: Vec<AdsRow> = stream.try_collect().await.unwrap();

    let values: Vec<_> = rows
        .iter()
        .map(|row| row["a"]["one"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["r1", "r2", "r3"]);

    // Two round-trips: the first carries no pageToken, the second carries
    // the token from the first response. No third request is issued.
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].body.get("pageToken").is_none());
    assert_eq!(requests[1].body["pageToken"], "pointer");
    assert_eq!(requests[0].body["pageSize"], 10_000);
    assert_eq!(
        requests[0].url,
        "https://googleads.googleapis.com/v11/customers/123/googleAds:search"
    );
}

#[tokio::test]
async fn multiple_customer_ids_are_queried_in_order() {
    let transport = MockTransport::new();
    let aql = "SELECT a.one FROM table";
    transport.script("111", aql, vec![page(vec![json!({"a": {"one": "x"}})], None)]);
    transport.script("222", aql, vec![page(vec![json!({"a": {"one": "y"}})], None)]);

    let client = client_factory(transport.clone()).create("999");
    let stream = client.search("111,222", &simple_query(), &[]).unwrap();
    let rows: Vec<AdsRow> = stream.try_collect().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["a"]["one"], "x");
    assert_eq!(rows[1]["a"]["one"], "y");

    let requests = transport.requests();
    assert_eq!(requests[0].body["customerId"], "111");
    assert_eq!(requests[1].body["customerId"], "222");
    assert_eq!(requests[0].headers.login_customer_id, "999");
    assert_eq!(requests[0].headers.bearer_token, "test-token");
    assert_eq!(requests[0].headers.developer_token, "dev-token");
}

#[tokio::test]
async fn invalid_customer_ids_fail_before_any_request() {
    let transport = MockTransport::new();
    let client = client_factory(transport.clone()).create("123");

    for spec in ["abc", "123,abc", "12-34", ""] {
        let err = client.search(spec, &simple_query(), &[]).err().unwrap();
        assert!(matches!(err, ApiError::InvalidCustomerIds(_)), "{spec}");
    }
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn leading_list_marker_is_stripped() {
    let transport = MockTransport::new();
    transport.script(
        "123",
        "SELECT a.one FROM table",
        vec![page(vec![], None)],
    );

    let client = client_factory(transport.clone()).create("123");
    let stream = client.search("- 123", &simple_query(), &[]).unwrap();
    pin_mut!(stream);
    assert!(stream.try_next().await.unwrap().is_none());

    assert_eq!(transport.requests()[0].body["customerId"], "123");
}

#[tokio::test]
async fn multiple_ids_require_login_customer_id() {
    let transport = MockTransport::new();
    let credentials = Arc::new(CredentialManager::new(Arc::new(
        common::StaticTokenProvider,
    )));
    let client = GoogleAdsClient::new(
        ApiEndpoint::google_ads(),
        String::new(),
        String::new(),
        credentials,
        transport.clone(),
    );

    let err = client.search("111,222", &simple_query(), &[]).err().unwrap();
    assert!(matches!(err, ApiError::MissingLoginCustomerId));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn factory_returns_one_client_per_login_id() {
    let factory = client_factory(MockTransport::new());

    let first = factory.create("123");
    let second = factory.create("123");
    let other = factory.create("456");

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));
}
