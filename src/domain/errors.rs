use thiserror::Error;

/// Failure to obtain the course list from a data source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch course data.")]
    Status { status: u16 },
    #[error("Failed to fetch course data: {0}")]
    Transport(String),
    #[error("Failed to read course data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Course data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;
