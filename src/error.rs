use thiserror::Error;

/// Main error type for scour operations
#[derive(Error, Debug)]
pub enum ScourError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad index format: {0}")]
    BadFormat(String),

    #[error("postings data truncated at byte {offset}")]
    BufferUnderrun { offset: usize },
}

/// Result type alias for scour operations
pub type Result<T> = std::result::Result<T, ScourError>;

impl ScourError {
    /// Whether this error indicates corrupted persistent state (always fatal).
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            ScourError::BadFormat(_) | ScourError::BufferUnderrun { .. }
        )
    }
}
