use thiserror::Error;

/// Result type for chat store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for chat store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A prompt with this name already exists
    #[error("a prompt named '{0}' already exists")]
    DuplicateName(String),

    /// The targeted row doesn't exist
    #[error("not found: {0}")]
    NotFound(String),

    /// SQL errors
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool issues
    #[error("pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration or backfill failure
    #[error("migration error: {0}")]
    Migration(String),

    /// The blocking worker running a query panicked or was cancelled
    #[error("task error: {0}")]
    Task(String),

    /// Filesystem errors while preparing the database location
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether a SQLite error is a UNIQUE constraint violation.
///
/// Classified on the extended result code rather than on the message text.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Map a prompt write error, turning uniqueness violations into `DuplicateName`
pub(crate) fn classify_prompt_write(err: rusqlite::Error, name: &str) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::DuplicateName(name.to_string())
    } else {
        StoreError::Database(err)
    }
}
