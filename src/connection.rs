//! DuckDB connection wrapper with schema bootstrap and query execution.

use crate::config;
use crate::error::{ReportError, Result};
use duckdb::{types::ValueRef, AccessMode, Config, Connection as DuckDbConnection};
use std::collections::HashMap;
use std::path::Path;

/// Wraps a DuckDB connection holding the `party` and `participant` tables.
pub struct Connection {
    conn: DuckDbConnection,
    read_only: bool,
}

impl Connection {
    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            read_only: false,
        })
    }

    /// Open a file-backed database, optionally in read-only access mode.
    pub fn open<P: AsRef<Path>>(path: P, read_only: bool) -> Result<Self> {
        let conn = if read_only {
            let cfg = Config::default().access_mode(AccessMode::ReadOnly)?;
            DuckDbConnection::open_with_flags(path.as_ref(), cfg)?
        } else {
            DuckDbConnection::open(path.as_ref())?
        };
        tracing::debug!(
            "Opened database {} (read_only={})",
            path.as_ref().display(),
            read_only
        );
        Ok(Self { conn, read_only })
    }

    /// Whether the connection was opened read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Create the `party` and `participant` tables if they are missing.
    pub fn ensure_schema(&self) -> Result<()> {
        if self.read_only {
            return Err(ReportError::InvalidArgument(
                "cannot bootstrap schema on a read-only connection".into(),
            ));
        }
        self.conn.execute_batch(&config::schema_ddl())?;
        tracing::info!(
            "Schema ready: {}, {}",
            config::PARTY_TABLE,
            config::PARTICIPANT_TABLE
        );
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        tracing::debug!(sql, ?params, "execute");
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run.
        let column_names: Vec<String> = rows_result
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();

        let mut out = Vec::new();
        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        tracing::debug!(sql, ?params, "execute_scalar");
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Execute an aggregate and read its single value as an integer count.
    ///
    /// An empty result or `NULL` reads as zero; any non-integer value is an
    /// error.
    pub fn count(&self, sql: &str, params: &[String]) -> Result<i64> {
        match self.execute_scalar(sql, params)? {
            None | Some(serde_json::Value::Null) => Ok(0),
            Some(v) => v.as_i64().ok_or_else(|| {
                ReportError::UnexpectedValue(format!("expected integer count, got {}", v))
            }),
        }
    }

    /// Run one or more statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Append the rows of a newline-delimited JSON file to an existing table,
    /// matching columns by name.
    pub fn load_ndjson(&self, table_name: &str, ndjson_path: &str) -> Result<()> {
        let path_fwd = ndjson_path.replace('\\', "/");
        self.conn.execute_batch(&format!(
            "INSERT INTO {} BY NAME \
             SELECT * FROM read_json_auto('{}', format='newline_delimited')",
            table_name, path_fwd
        ))?;
        tracing::debug!("Loaded {} into {}", path_fwd, table_name);
        Ok(())
    }

    /// Check whether a table exists in the main schema.
    pub fn has_table(&self, name: &str) -> Result<bool> {
        let n = self.count(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?",
            &[name.to_string()],
        )?;
        Ok(n > 0)
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        // Timestamps, dates, lists etc. are not returned by the report queries.
        _ => serde_json::Value::Null,
    }
}
