use std::fmt;
use std::io;

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Reading the question file or talking to the terminal failed.
    Io(io::Error),
    /// The local key-value store could not be read or written.
    Storage(rusqlite::Error),
    /// A stored value could not be encoded.
    Json(serde_json::Error),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::Io(e) => write!(f, "IO error: {}", e),
            QuizError::Storage(e) => write!(f, "Storage error: {}", e),
            QuizError::Json(e) => write!(f, "Encoding error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Io(e) => Some(e),
            QuizError::Storage(e) => Some(e),
            QuizError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

impl From<rusqlite::Error> for QuizError {
    fn from(err: rusqlite::Error) -> Self {
        QuizError::Storage(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Json(err)
    }
}
