use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::Season;

pub const PARTY_TABLE: &str = "party";
pub const PARTICIPANT_TABLE: &str = "participant";

/// Format used when binding timestamps as query parameters.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimal schema for the columns the report queries touch.
pub fn schema_ddl() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {party} (\
           id BIGINT PRIMARY KEY, \
           sent_date TIMESTAMP\
         ); \
         CREATE TABLE IF NOT EXISTS {participant} (\
           id BIGINT PRIMARY KEY, \
           party_id BIGINT, \
           wishlist_updated BOOLEAN DEFAULT FALSE\
         );",
        party = PARTY_TABLE,
        participant = PARTICIPANT_TABLE,
    )
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Load the configured seasons from a JSON array of
/// `{ "name", "start", "end" }` objects.
pub fn load_seasons<P: AsRef<Path>>(path: P) -> Result<Vec<Season>> {
    let raw = fs::read_to_string(path.as_ref())?;
    let seasons: Vec<Season> = serde_json::from_str(&raw)?;
    tracing::info!(
        "Loaded {} season(s) from {}",
        seasons.len(),
        path.as_ref().display()
    );
    Ok(seasons)
}
