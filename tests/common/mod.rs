//! Shared fixtures for the report integration tests.
//!
//! `setup_sample_db()` opens an in-memory database with the report schema and
//! loads a small set of parties and participants through NDJSON temp files.
//!
//! | party | sent_date           | participants | updated wishlists |
//! |-------|---------------------|--------------|-------------------|
//! | 1     | 2022-11-15 12:00:00 | 4            | 2                 |
//! | 2     | 2022-12-01 09:30:00 | 4            | 0                 |
//! | 3     | 2023-10-01 00:00:00 | 2            | 1                 |
//! | 4     | 2023-12-10 18:00:00 | 3            | 2                 |
//! | 5     | 2024-01-01 00:00:00 | 2            | 2                 |
//! | 6     | 2023-11-20 08:00:00 | 3            | 0                 |

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use santa_reports::{Connection, Season};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Season 2022: parties 1 and 2.
pub fn season_2022() -> Season {
    Season::new("2022", ts(2022, 10, 1, 0, 0), ts(2023, 1, 1, 0, 0))
}

/// Season 2023: parties 3, 4 and 6. Party 5 sits exactly on the end bound.
pub fn season_2023() -> Season {
    Season::new("2023", ts(2023, 10, 1, 0, 0), ts(2024, 1, 1, 0, 0))
}

/// A season without any parties.
pub fn season_2021() -> Season {
    Season::new("2021", ts(2021, 10, 1, 0, 0), ts(2022, 1, 1, 0, 0))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub fn setup_sample_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.ensure_schema().unwrap();

    register_parties(&conn);
    register_participants(&conn);

    conn
}

fn register_parties(conn: &Connection) {
    let parties = vec![
        serde_json::json!({"id": 1, "sent_date": "2022-11-15 12:00:00"}),
        serde_json::json!({"id": 2, "sent_date": "2022-12-01 09:30:00"}),
        serde_json::json!({"id": 3, "sent_date": "2023-10-01 00:00:00"}),
        serde_json::json!({"id": 4, "sent_date": "2023-12-10 18:00:00"}),
        serde_json::json!({"id": 5, "sent_date": "2024-01-01 00:00:00"}),
        serde_json::json!({"id": 6, "sent_date": "2023-11-20 08:00:00"}),
    ];

    write_ndjson_and_load(conn, "party", &parties);
}

fn register_participants(conn: &Connection) {
    let layout: [(i64, &[bool]); 6] = [
        (1, &[true, false, false, true]),
        (2, &[false, false, false, false]),
        (3, &[true, false]),
        (4, &[true, true, false]),
        (5, &[true, true]),
        (6, &[false, false, false]),
    ];

    let mut participants = Vec::new();
    for (party_id, wishlists) in layout {
        for (i, updated) in wishlists.iter().enumerate() {
            participants.push(serde_json::json!({
                "id": party_id * 100 + i as i64 + 1,
                "party_id": party_id,
                "wishlist_updated": updated,
            }));
        }
    }

    write_ndjson_and_load(conn, "participant", &participants);
}

/// Insert one party sent at `sent` with one participant per entry of
/// `wishlists`. Participant ids are derived from the party id.
pub fn insert_party(conn: &Connection, id: i64, sent: &str, wishlists: &[bool]) {
    let mut sql = format!(
        "INSERT INTO party (id, sent_date) VALUES ({}, TIMESTAMP '{}');",
        id, sent
    );
    for (i, updated) in wishlists.iter().enumerate() {
        sql.push_str(&format!(
            "INSERT INTO participant (id, party_id, wishlist_updated) VALUES ({}, {}, {});",
            id * 100 + i as i64 + 1,
            id,
            updated
        ));
    }
    conn.execute_batch(&sql).unwrap();
}

/// Write a slice of JSON values as NDJSON to a temp file and append it to
/// `table_name`.
pub fn write_ndjson_and_load(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    conn.load_ndjson(table_name, file.path().to_str().unwrap())
        .unwrap();
}
