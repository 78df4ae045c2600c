//! Wishlist completion rates per season, up to a date, and between seasons.
//!
//! The numerator counts party/participant join rows where the participant
//! updated their wishlist; the denominator is the participant count for the
//! same window. A rate is `numerator / denominator * 100`. The two sides
//! measure different things (parties against participants), which existing
//! reports depend on, so the ratio is kept as is.

use chrono::NaiveDateTime;

use crate::config::{PARTICIPANT_TABLE, PARTY_TABLE};
use crate::connection::Connection;
use crate::error::{ReportError, Result};
use crate::models::{CountMode, Season, SeasonComparison};
use crate::queries::participants::{ParticipantCounter, ParticipantReportQuery};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// WishlistReportQuery
// ---------------------------------------------------------------------------

/// Query interface for wishlist completion statistics.
pub struct WishlistReportQuery<'a, P = ParticipantReportQuery<'a>> {
    conn: &'a Connection,
    participants: P,
    mode: CountMode,
}

impl<'a> WishlistReportQuery<'a> {
    /// Create a new `WishlistReportQuery` bound to the given connection,
    /// counting participants from the same database.
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            participants: ParticipantReportQuery::new(conn),
            mode: CountMode::default(),
        }
    }
}

impl<'a, P: ParticipantCounter> WishlistReportQuery<'a, P> {
    /// Create a query that takes participant counts from `participants`.
    pub fn with_participant_counter(conn: &'a Connection, participants: P) -> Self {
        Self {
            conn,
            participants,
            mode: CountMode::default(),
        }
    }

    /// Change how parties with several updated wishlists are counted.
    pub fn count_mode(mut self, mode: CountMode) -> Self {
        self.mode = mode;
        self
    }

    fn base(&self) -> SqlBuilder {
        let mut qb = SqlBuilder::new(&format!("{} p", PARTY_TABLE));
        qb.select(&[self.mode.count_expr()])
            .join(&format!(
                "INNER JOIN {} e ON p.id = e.party_id",
                PARTICIPANT_TABLE
            ))
            .where_clause("e.wishlist_updated = TRUE", &[]);
        qb
    }

    /// Count updated wishlists for parties sent within the season.
    pub fn count_wishlists(&self, season: &Season) -> Result<i64> {
        let (sql, params) = self
            .base()
            .where_between("p.sent_date", &season.start, &season.end)
            .build();
        self.conn.count(&sql, &params)
    }

    /// Count updated wishlists for parties sent before `date`.
    pub fn count_wishlists_until_date(&self, date: &NaiveDateTime) -> Result<i64> {
        let (sql, params) = self.base().where_before("p.sent_date", date).build();
        self.conn.count(&sql, &params)
    }

    /// Percentage of completed wishlists for the season.
    ///
    /// Fails with [`ReportError::NoResult`] when the season has no
    /// participants.
    pub fn completion_rate_for_season(&self, season: &Season) -> Result<f64> {
        let wishlists = self.count_wishlists(season)?;
        let participants = self.participants.count_participants(season)?;

        let rate = percentage(wishlists, participants).ok_or_else(|| {
            ReportError::NoResult(format!("no participants in season {}", season.name))
        })?;
        tracing::debug!(season = %season.name, wishlists, participants, rate, "completion rate");
        Ok(rate)
    }

    /// Percentage of completed wishlists over every party sent before `date`.
    pub fn completion_rate_until_date(&self, date: &NaiveDateTime) -> Result<f64> {
        let wishlists = self.count_wishlists_until_date(date)?;
        let participants = self.participants.count_participants_until_date(date)?;

        let rate = percentage(wishlists, participants)
            .ok_or_else(|| ReportError::NoResult(format!("no participants before {}", date)))?;
        tracing::debug!(%date, wishlists, participants, rate, "completion rate until date");
        Ok(rate)
    }

    /// Compare the completion rate of `current` against `previous`.
    ///
    /// An error computing `current` propagates. Any error computing
    /// `previous` yields [`SeasonComparison::Incomparable`] carrying the
    /// reason.
    pub fn compare_seasons(&self, current: &Season, previous: &Season) -> Result<SeasonComparison> {
        let current_rate = self.completion_rate_for_season(current)?;

        match self.completion_rate_for_season(previous) {
            Ok(previous_rate) => Ok(SeasonComparison::Difference {
                current: current_rate,
                previous: previous_rate,
                delta: current_rate - previous_rate,
            }),
            Err(e) => {
                tracing::warn!(
                    current = %current.name,
                    previous = %previous.name,
                    error = %e,
                    "seasons not comparable, using current rate"
                );
                Ok(SeasonComparison::Incomparable {
                    current: current_rate,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Percentage-point difference between two seasons' completion rates.
    ///
    /// When `previous` cannot be computed for any reason, this returns the
    /// rate of `current` instead. Use [`compare_seasons`](Self::compare_seasons)
    /// to tell the two cases apart.
    pub fn completion_rate_delta(&self, current: &Season, previous: &Season) -> Result<f64> {
        Ok(self.compare_seasons(current, previous)?.value())
    }
}

fn percentage(numerator: i64, denominator: i64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some((numerator as f64 / denominator as f64) * 100.0)
}
