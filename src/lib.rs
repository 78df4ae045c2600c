//! Wishlist completion reporting for Secret Santa parties.
//!
//! Computes how many wishlists were completed per season or up to a date,
//! and how completion changed between two seasons. Party and participant
//! records are queried in-process via DuckDB.
//!
//! # Quick start
//!
//! ```no_run
//! use santa_reports::SantaReports;
//!
//! let reports = SantaReports::builder()
//!     .database("santa.duckdb")
//!     .read_only(true)
//!     .seasons_file("seasons.json")
//!     .build()
//!     .unwrap();
//!
//! let season = reports.season("2024").unwrap();
//! let rate = reports.wishlists().completion_rate_for_season(season).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncSantaReports;
pub use connection::Connection;
pub use error::{ReportError, Result};
pub use models::{CountMode, Season, SeasonComparison};
pub use queries::{ParticipantCounter, ParticipantReportQuery, WishlistReportQuery};
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SantaReportsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SantaReports`] instance.
#[derive(Debug, Clone, Default)]
pub struct SantaReportsBuilder {
    database: Option<PathBuf>,
    read_only: bool,
    count_mode: CountMode,
    seasons_file: Option<PathBuf>,
}

impl SantaReportsBuilder {
    /// Use a file-backed database. Without this an empty in-memory database
    /// is opened.
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database = Some(path.as_ref().to_path_buf());
        self
    }

    /// Open the database read-only. Defaults to `false`.
    ///
    /// Read-only connections skip the schema bootstrap, so the tables must
    /// already exist. Has no effect on an in-memory database.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// How wishlist counts treat parties with several updated wishlists.
    pub fn count_mode(mut self, mode: CountMode) -> Self {
        self.count_mode = mode;
        self
    }

    /// Load configured seasons from a JSON file.
    pub fn seasons_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.seasons_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Open the connection, create missing tables and load seasons.
    pub fn build(self) -> Result<SantaReports> {
        let conn = match &self.database {
            Some(path) => Connection::open(path, self.read_only)?,
            None => Connection::open_in_memory()?,
        };
        if !conn.is_read_only() {
            conn.ensure_schema()?;
        }

        let seasons = match &self.seasons_file {
            Some(path) => config::load_seasons(path)?,
            None => Vec::new(),
        };

        Ok(SantaReports {
            conn,
            count_mode: self.count_mode,
            seasons,
        })
    }
}

// ---------------------------------------------------------------------------
// SantaReports
// ---------------------------------------------------------------------------

/// Entry point: owns the [`Connection`] and the configured seasons, and hands
/// out borrowing query interfaces.
pub struct SantaReports {
    conn: Connection,
    count_mode: CountMode,
    seasons: Vec<Season>,
}

impl SantaReports {
    /// Create a new builder.
    pub fn builder() -> SantaReportsBuilder {
        SantaReportsBuilder::default()
    }

    /// Access the wishlist completion queries.
    pub fn wishlists(&self) -> WishlistReportQuery<'_> {
        WishlistReportQuery::new(&self.conn).count_mode(self.count_mode)
    }

    /// Access the participant count queries.
    pub fn participants(&self) -> ParticipantReportQuery<'_> {
        ParticipantReportQuery::new(&self.conn)
    }

    /// Seasons loaded from the configuration file, in file order.
    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    /// Look up a configured season by name.
    pub fn season(&self, name: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.name == name)
    }

    /// Execute a raw SQL query with `?` positional placeholders.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Return a reference to the underlying [`Connection`].
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl fmt::Display for SantaReports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.seasons.iter().map(|s| s.name.as_str()).collect();
        write!(
            f,
            "SantaReports(read_only={}, count_mode={:?}, seasons=[{}])",
            self.conn.is_read_only(),
            self.count_mode,
            names.join(", ")
        )
    }
}
