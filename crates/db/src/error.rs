#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("record id {0} exceeds the sqlite integer range")]
    IdOutOfRange(u64),
}

pub type Result<T> = std::result::Result<T, DbError>;
