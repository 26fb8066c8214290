use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContasError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("No {kind} with ID {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid month '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ContasError>;
