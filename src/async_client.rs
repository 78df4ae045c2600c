//! Async wrapper around [`SantaReports`] for use inside Tokio.
//!
//! Every operation runs on the blocking thread pool via
//! [`tokio::task::spawn_blocking`].
//!
//! # Example
//!
//! ```no_run
//! use santa_reports::AsyncSantaReports;
//!
//! #[tokio::main]
//! async fn main() {
//!     let reports = AsyncSantaReports::builder()
//!         .database("santa.duckdb")
//!         .read_only(true)
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let rate = reports
//!         .run(|r| {
//!             let cutoff = chrono::Utc::now().naive_utc();
//!             r.wishlists().completion_rate_until_date(&cutoff)
//!         })
//!         .await
//!         .unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{ReportError, Result};
use crate::models::CountMode;
use crate::{SantaReports, SantaReportsBuilder};

// ---------------------------------------------------------------------------
// AsyncSantaReportsBuilder
// ---------------------------------------------------------------------------

/// Builder for an [`AsyncSantaReports`]; mirrors [`SantaReportsBuilder`].
#[derive(Debug, Clone, Default)]
pub struct AsyncSantaReportsBuilder {
    inner: SantaReportsBuilder,
}

impl AsyncSantaReportsBuilder {
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.database(path);
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.inner = self.inner.read_only(read_only);
        self
    }

    pub fn count_mode(mut self, mode: CountMode) -> Self {
        self.inner = self.inner.count_mode(mode);
        self
    }

    pub fn seasons_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.seasons_file(path);
        self
    }

    /// Build on the blocking pool, since opening DuckDB touches the disk.
    pub async fn build(self) -> Result<AsyncSantaReports> {
        tokio::task::spawn_blocking(move || {
            let reports = self.inner.build()?;
            Ok(AsyncSantaReports {
                inner: Arc::new(Mutex::new(reports)),
            })
        })
        .await
        .map_err(|e| ReportError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncSantaReports
// ---------------------------------------------------------------------------

/// Async wrapper around [`SantaReports`]. Access is serialized by a
/// [`Mutex`].
pub struct AsyncSantaReports {
    inner: Arc<Mutex<SantaReports>>,
}

impl AsyncSantaReports {
    pub fn builder() -> AsyncSantaReportsBuilder {
        AsyncSantaReportsBuilder::default()
    }

    /// Run a sync operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SantaReports) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let reports = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = reports
                .lock()
                .map_err(|_| ReportError::InvalidArgument("reports lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| ReportError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Execute a raw SQL query asynchronously.
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |r| r.sql(&query, &params)).await
    }

    /// Release this handle; the connection closes once no operation holds it.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let reports = self
                .inner
                .lock()
                .map_err(|_| ReportError::InvalidArgument("reports lock poisoned".into()))?;
            drop(reports);
            Ok(())
        })
        .await
        .map_err(|e| ReportError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
