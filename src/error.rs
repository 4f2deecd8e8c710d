use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Anything the driver reports: syntax errors, constraint violations,
    /// connectivity. Passed through untouched.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A list was bound to a bare `:name` placeholder, which only has room
    /// for one value. Use `[:name]` to expand it.
    #[error("List value bound to scalar placeholder at position {position}")]
    ListInScalarPosition { position: usize },

    #[error("Unknown statement kind: {0}")]
    UnknownStatementKind(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, Error>;
