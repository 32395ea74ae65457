//! Document read and insert operations.
//!
//! The store is append-only per identifier: `insert_document` is a plain
//! INSERT, and the primary key rejects a second write for the same id.
//! Concurrent first-time requests both fetch and both attempt to insert;
//! the constraint lets exactly one succeed and the loser surfaces as
//! [`Error::DuplicateDocument`], which callers swallow.

use super::connection::StoreDb;
use crate::Error;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl StoreDb {
    /// Get the raw fragment for an identifier.
    ///
    /// Returns `None` on a cache miss. Storage faults (connection/IO
    /// errors) come back as `Error::Database`, which callers treat as
    /// "unavailable for this request" rather than a cache state.
    pub async fn get_document(&self, id: &str) -> Result<Option<Vec<u8>>, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Vec<u8>>, Error> {
                let result = conn.query_row(
                    "SELECT content FROM documents WHERE id = ?1",
                    params![id],
                    |row| row.get::<_, Vec<u8>>(0),
                );

                match result {
                    Ok(content) => Ok(Some(content)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert a fragment for a never-before-seen identifier.
    ///
    /// Fails with `Error::DuplicateDocument` if a row for `id` already
    /// exists; there is no update path, so existing content is never
    /// overwritten.
    pub async fn insert_document(&self, id: &str, content: &[u8]) -> Result<(), Error> {
        let id = id.to_string();
        let content = content.to_vec();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let result = conn.execute(
                    "INSERT INTO documents (id, content) VALUES (?1, ?2)",
                    params![id, content],
                );

                match result {
                    Ok(_) => Ok(()),
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                    {
                        Err(Error::DuplicateDocument(id))
                    }
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of cached documents. Test and introspection helper.
    pub async fn document_count(&self) -> Result<i64, Error> {
        self.conn
            .call(|conn| -> Result<i64, Error> {
                let count = conn
                    .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
                    .map_err(Error::from)?;
                Ok(count)
            })
            .await
            .map_err(Error::from)
    }
}
