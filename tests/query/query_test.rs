//! AQL rendering and join validation.

use launch_monitor::query::{Query, QueryError};
use launch_monitor::report::{Record, ReportDefinition};

fn noop_definition(query: Query) -> ReportDefinition {
    ReportDefinition::new(["id"], query, |_, _| Ok((String::new(), Record::new())))
}

#[test]
fn renders_bare_select() {
    let query = Query::build("table").field("a.one").finish().unwrap();
    insta::assert_snapshot!(query.qlify(&[]), @"SELECT a.one FROM table");
}

#[test]
fn renders_single_extra_where() {
    let query = Query::build("table").field("a.one").finish().unwrap();
    insta::assert_snapshot!(
        query.qlify(&[r#"foo = "1""#.to_string()]),
        @r#"SELECT a.one FROM table WHERE foo = "1""#
    );
}

#[test]
fn renders_multiple_wheres_and_joined() {
    let query = Query::build("table")
        .fields(["a.one", "a.two"])
        .filter("a.one > 0")
        .finish()
        .unwrap();
    insta::assert_snapshot!(
        query.qlify(&["a.two < 5".to_string(), r#"b = "x""#.to_string()]),
        @r#"SELECT a.one, a.two FROM table WHERE a.one > 0 AND a.two < 5 AND b = "x""#
    );
}

#[test]
fn join_key_must_match_a_selected_path() {
    let child = Query::build("something").field("something.id").finish().unwrap();

    let err = Query::build("campaign")
        .field("campaign.id")
        .join("ad_group.id", noop_definition(child))
        .finish()
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::JoinKeyNotSelected("ad_group.id".to_string())
    );
}

#[test]
fn join_key_may_be_parent_of_a_selected_path() {
    let child = Query::build("something").field("something.id").finish().unwrap();

    let query = Query::build("campaign")
        .fields(["campaign.id", "campaign.status"])
        .join("campaign", noop_definition(child))
        .finish()
        .unwrap();
    assert_eq!(query.joins().len(), 1);
}

#[test]
fn join_key_equal_to_selected_path_is_accepted() {
    let child = Query::build("something").field("something.id").finish().unwrap();

    let query = Query::build("campaign_criterion")
        .fields(["campaign_criterion.criterion_id", "campaign_criterion.campaign"])
        .join("campaign_criterion.criterion_id", noop_definition(child))
        .finish()
        .unwrap();
    assert!(query
        .joins()
        .contains_key("campaign_criterion.criterion_id"));
}
