//! Error types for the core library

use thiserror::Error;
use uuid::Uuid;

/// Coarse classification of an [`Error`], used by callers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    Validation,
    Persistence,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("Access denied: user {user_id} does not own task {task_id}")]
    AccessDenied { task_id: Uuid, user_id: Uuid },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Io(_) | Self::Serialization(_) | Self::Storage(_) => ErrorKind::Persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let id = Uuid::new_v4();
        assert_eq!(Error::TaskNotFound(id).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::AccessDenied {
                task_id: id,
                user_id: Uuid::new_v4()
            }
            .kind(),
            ErrorKind::AccessDenied
        );
        assert_eq!(
            Error::InvalidInput("bad".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::Storage("disk full".to_string()).kind(),
            ErrorKind::Persistence
        );
    }
}
