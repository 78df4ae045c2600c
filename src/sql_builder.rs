//! SQL builder for the report queries.
//!
//! Values are always bound through DuckDB's `?` placeholders; timestamps are
//! bound as formatted strings and cast on the SQL side. Builder methods return
//! `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use santa_reports::SqlBuilder;
//!
//! let cutoff = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let (sql, params) = SqlBuilder::new("party p")
//!     .select(&["COUNT(p.id) AS cnt"])
//!     .join("INNER JOIN participant e ON p.id = e.party_id")
//!     .where_before("p.sent_date", &cutoff)
//!     .where_clause("e.wishlist_updated = TRUE", &[])
//!     .build();
//! assert_eq!(params, vec!["2024-01-01 00:00:00"]);
//! ```

use chrono::NaiveDateTime;

use crate::config::format_timestamp;

/// Builds parameterized SQL queries.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    joins: Vec<String>,
    where_clauses: Vec<String>,
    params: Vec<String>,
    group_by_cols: Vec<String>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table, optionally aliased
    /// (`"party p"`).
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            joins: Vec::new(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            group_by_cols: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a full JOIN clause, e.g.
    /// `"INNER JOIN participant e ON p.id = e.party_id"`.
    pub fn join(&mut self, clause: &str) -> &mut Self {
        self.joins.push(clause.to_string());
        self
    }

    /// Add a WHERE condition using `?` for each param, appended in order.
    pub fn where_clause(&mut self, condition: &str, params: &[&str]) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value.to_string());
        self
    }

    /// Inclusive lower bound on a timestamp column.
    pub fn where_since(&mut self, column: &str, ts: &NaiveDateTime) -> &mut Self {
        self.where_clauses
            .push(format!("{} >= CAST(? AS TIMESTAMP)", column));
        self.params.push(format_timestamp(ts));
        self
    }

    /// Exclusive upper bound on a timestamp column.
    pub fn where_before(&mut self, column: &str, ts: &NaiveDateTime) -> &mut Self {
        self.where_clauses
            .push(format!("{} < CAST(? AS TIMESTAMP)", column));
        self.params.push(format_timestamp(ts));
        self
    }

    /// Half-open `[start, end)` range on a timestamp column.
    pub fn where_between(
        &mut self,
        column: &str,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> &mut Self {
        self.where_since(column, start).where_before(column, end)
    }

    /// Add GROUP BY columns.
    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by_cols
            .extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add ORDER BY clauses (e.g. `"sent_date ASC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        parts.extend(self.joins.iter().cloned());

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.group_by_cols.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by_cols.join(", ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }
}
