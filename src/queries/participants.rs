//! Participant counts over the same time windows as the wishlist reports.

use chrono::NaiveDateTime;

use crate::config::{PARTICIPANT_TABLE, PARTY_TABLE};
use crate::connection::Connection;
use crate::error::Result;
use crate::models::Season;
use crate::sql_builder::SqlBuilder;

/// Supplies participant counts, the denominator of every completion rate.
pub trait ParticipantCounter {
    /// Participants of parties sent within `[season.start, season.end)`.
    fn count_participants(&self, season: &Season) -> Result<i64>;

    /// Participants of parties sent before `date`.
    fn count_participants_until_date(&self, date: &NaiveDateTime) -> Result<i64>;
}

impl<T: ParticipantCounter + ?Sized> ParticipantCounter for &T {
    fn count_participants(&self, season: &Season) -> Result<i64> {
        (**self).count_participants(season)
    }

    fn count_participants_until_date(&self, date: &NaiveDateTime) -> Result<i64> {
        (**self).count_participants_until_date(date)
    }
}

// ---------------------------------------------------------------------------
// ParticipantReportQuery
// ---------------------------------------------------------------------------

/// DuckDB-backed [`ParticipantCounter`].
pub struct ParticipantReportQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ParticipantReportQuery<'a> {
    /// Create a new `ParticipantReportQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn base() -> SqlBuilder {
        let mut qb = SqlBuilder::new(&format!("{} e", PARTICIPANT_TABLE));
        qb.select(&["COUNT(e.id) AS participantCount"])
            .join(&format!("INNER JOIN {} p ON p.id = e.party_id", PARTY_TABLE));
        qb
    }
}

impl ParticipantCounter for ParticipantReportQuery<'_> {
    fn count_participants(&self, season: &Season) -> Result<i64> {
        let (sql, params) = Self::base()
            .where_between("p.sent_date", &season.start, &season.end)
            .build();
        let n = self.conn.count(&sql, &params)?;
        tracing::debug!(season = %season.name, participants = n, "counted participants");
        Ok(n)
    }

    fn count_participants_until_date(&self, date: &NaiveDateTime) -> Result<i64> {
        let (sql, params) = Self::base().where_before("p.sent_date", date).build();
        let n = self.conn.count(&sql, &params)?;
        tracing::debug!(%date, participants = n, "counted participants until date");
        Ok(n)
    }
}
