use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("Invalid icon pattern: {0}")]
    InvalidPattern(String),

    #[error("Unexpected icon name: {}", .0.display())]
    UnexpectedIconName(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HookResult<T> = Result<T, HookError>;
