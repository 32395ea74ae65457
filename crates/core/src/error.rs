//! Unified error types for gndcache.

use tokio_rusqlite::rusqlite;

/// Unified error types for the gndcache service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A row for this identifier already exists.
    ///
    /// Raised by the primary-key constraint when two requests race on the
    /// first insert for an identifier. Callers treat it as benign.
    #[error("DUPLICATE_DOCUMENT: {0}")]
    DuplicateDocument(String),

    /// Transport-level failure reaching the upstream registry.
    #[error("UPSTREAM_UNREACHABLE: {0}")]
    UpstreamUnreachable(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateDocument("118514768".to_string());
        assert!(err.to_string().contains("DUPLICATE_DOCUMENT"));
        assert!(err.to_string().contains("118514768"));
    }

    #[test]
    fn test_unreachable_display() {
        let err = Error::UpstreamUnreachable("connection refused".to_string());
        assert!(err.to_string().contains("UPSTREAM_UNREACHABLE"));
    }
}
