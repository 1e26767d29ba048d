//! [`SqliteStore`], the SQLite implementation of [`SampleStore`].

use std::path::Path;

use somnus_core::store::{NewRecord, SampleStore, StoredPayload};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A sample store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Call
/// [`SqliteStore::close`] once at shutdown; any clone used afterwards fails
/// with a database error.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|source| Error::Open { path: path.display().to_string(), source })?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sample store");
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection, waiting for queued work to finish.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SampleStore impl ────────────────────────────────────────────────────────

impl SampleStore for SqliteStore {
  type Error = Error;

  async fn initialize(&self) -> Result<()> { self.init_schema().await }

  async fn append(&self, record: NewRecord) -> Result<i64> {
    let NewRecord { session_id, timestamp, data_type, payload } = record;

    let id = self
      .conn
      .call(move |conn| {
        let id: i64 = conn.query_row(
          "INSERT INTO sleep_sessions (session_id, timestamp, data_type, payload)
           VALUES (?1, ?2, ?3, ?4)
           RETURNING id",
          rusqlite::params![session_id, timestamp, data_type, payload],
          |row| row.get(0),
        )?;
        Ok(id)
      })
      .await?;

    Ok(id)
  }

  async fn query_by_session_and_type(
    &self,
    session_id: &str,
    data_type:  &str,
  ) -> Result<Vec<StoredPayload>> {
    let session_id = session_id.to_owned();
    let data_type  = data_type.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, payload FROM sleep_sessions
           WHERE session_id = ?1 AND data_type = ?2
           ORDER BY id ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![session_id, data_type], |row| {
            Ok(StoredPayload {
              id:      row.get(0)?,
              payload: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}
