//! Unit tests for the SqlBuilder query construction.

mod common;

use common::ts;
use santa_reports::SqlBuilder;

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("party").build();
    assert_eq!(sql, "SELECT *\nFROM party");
    assert!(params.is_empty());
}

#[test]
fn select_replaces_default_star() {
    let (sql, _) = SqlBuilder::new("party p")
        .select(&["COUNT(p.id) AS cnt"])
        .build();
    assert!(sql.starts_with("SELECT COUNT(p.id) AS cnt\nFROM party p"));
}

#[test]
fn join_is_emitted_before_where() {
    let (sql, _) = SqlBuilder::new("party p")
        .join("INNER JOIN participant e ON p.id = e.party_id")
        .where_clause("e.wishlist_updated = TRUE", &[])
        .build();
    assert_eq!(
        sql,
        "SELECT *\nFROM party p\nINNER JOIN participant e ON p.id = e.party_id\nWHERE e.wishlist_updated = TRUE"
    );
}

#[test]
fn where_eq_adds_equality_with_param() {
    let (sql, params) = SqlBuilder::new("participant")
        .where_eq("party_id", "7")
        .build();
    assert!(sql.contains("WHERE party_id = ?"));
    assert_eq!(params, vec!["7"]);
}

#[test]
fn where_since_binds_formatted_timestamp() {
    let (sql, params) = SqlBuilder::new("party")
        .where_since("sent_date", &ts(2023, 10, 1, 0, 0))
        .build();
    assert!(sql.contains("sent_date >= CAST(? AS TIMESTAMP)"));
    assert_eq!(params, vec!["2023-10-01 00:00:00"]);
}

#[test]
fn where_between_is_half_open() {
    let (sql, params) = SqlBuilder::new("party p")
        .where_between("p.sent_date", &ts(2023, 10, 1, 0, 0), &ts(2024, 1, 1, 0, 0))
        .build();
    assert!(sql.contains(
        "WHERE p.sent_date >= CAST(? AS TIMESTAMP) AND p.sent_date < CAST(? AS TIMESTAMP)"
    ));
    assert_eq!(params, vec!["2023-10-01 00:00:00", "2024-01-01 00:00:00"]);
}

#[test]
fn params_follow_condition_order() {
    let (_, params) = SqlBuilder::new("party p")
        .where_before("p.sent_date", &ts(2024, 1, 1, 12, 30))
        .where_clause("p.id > ?", &["3"])
        .build();
    assert_eq!(params, vec!["2024-01-01 12:30:00", "3"]);
}

#[test]
fn group_order_and_limit() {
    let (sql, _) = SqlBuilder::new("participant")
        .select(&["party_id", "COUNT(*) AS n"])
        .group_by(&["party_id"])
        .order_by(&["n DESC"])
        .limit(3)
        .build();
    assert!(sql.ends_with("GROUP BY party_id\nORDER BY n DESC\nLIMIT 3"));
}

#[test]
fn built_query_runs_against_sample_data() {
    let conn = common::setup_sample_db();
    let (sql, params) = SqlBuilder::new("participant")
        .select(&["party_id", "COUNT(*) AS n"])
        .group_by(&["party_id"])
        .order_by(&["n DESC", "party_id ASC"])
        .limit(1)
        .build();

    let rows = conn.execute(&sql, &params).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["party_id"], 1);
    assert_eq!(rows[0]["n"], 4);
}
